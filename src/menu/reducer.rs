use crate::menu::intent::MenuIntent;
use crate::menu::state::MenuState;
use crate::mvi::Reducer;

pub struct MenuReducer;

impl Reducer for MenuReducer {
    type State = MenuState;
    type Intent = MenuIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (intent, state) {
            (MenuIntent::Toggle, MenuState::Closed) => MenuState::Open,
            (MenuIntent::Toggle, MenuState::Open) => MenuState::Closed,
            (MenuIntent::Close, _) => MenuState::Closed,
        }
    }
}
