use crate::mvi::UiState;

/// Navbar state, recomputed at most once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Offset seen by the previous recomputation.
    pub last_offset: f64,
    pub hidden: bool,
    /// Past the shadow offset; the bar draws its drop shadow.
    pub scrolled: bool,
}

impl UiState for ScrollState {}
