use crate::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIntent {
    /// Toggle button pressed.
    Toggle,
    /// A nav link was followed or the close key pressed.
    Close,
}

impl Intent for MenuIntent {}
