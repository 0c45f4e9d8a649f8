use crate::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl UiState for MenuState {}

impl MenuState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}
