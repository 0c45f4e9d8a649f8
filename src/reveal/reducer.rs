use crate::mvi::Reducer;
use crate::reveal::intent::RevealIntent;
use crate::reveal::state::{RevealPhase, RevealState};

pub struct RevealReducer;

impl Reducer for RevealReducer {
    type State = RevealState;
    type Intent = RevealIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            RevealIntent::Initialize { elements, observe } => {
                for (element, is_initial) in elements {
                    let entry = state.elements.entry(element).or_default();
                    entry.is_initial = is_initial;
                    if entry.revealed() {
                        continue;
                    }
                    entry.phase = if is_initial || !observe {
                        RevealPhase::Revealed
                    } else {
                        RevealPhase::Observing
                    };
                }
                state
            }
            RevealIntent::Intersected { target } => {
                if let Some(entry) = state.elements.get_mut(&target) {
                    // Only a waiting element can be revealed by the viewport;
                    // repeats within a batch land on `Revealed` and do nothing.
                    if entry.phase == RevealPhase::Observing {
                        entry.phase = RevealPhase::Revealed;
                    }
                }
                state
            }
            RevealIntent::Release => {
                for entry in state.elements.values_mut() {
                    if entry.phase == RevealPhase::Observing {
                        entry.phase = RevealPhase::Unobserved;
                    }
                }
                state
            }
        }
    }
}
