//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place a feature's state changes.
///
/// `reduce` must be pure: it never touches the host. Controllers compare the
/// returned state with the previous one to decide which classes and styles
/// to write.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
