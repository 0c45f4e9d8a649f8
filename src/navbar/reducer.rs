use crate::mvi::Reducer;
use crate::navbar::intent::NavbarIntent;
use crate::navbar::state::ScrollState;

pub struct NavbarReducer;

impl Reducer for NavbarReducer {
    type State = ScrollState;
    type Intent = NavbarIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            NavbarIntent::Recompute {
                offset,
                dead_zone,
                shadow_offset,
            } => {
                let hidden = if offset <= 0.0 {
                    false
                } else if offset > state.last_offset && offset > dead_zone {
                    // Scrolling down past the dead zone
                    true
                } else if offset < state.last_offset {
                    // Any upward movement
                    false
                } else {
                    state.hidden
                };

                ScrollState {
                    last_offset: offset,
                    hidden,
                    scrolled: offset > shadow_offset,
                }
            }
        }
    }
}
