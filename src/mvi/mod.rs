//! Model-View-Intent primitives shared by every page feature.
//!
//! Each feature keeps its state in a [`UiState`] value and changes it only
//! through a [`Reducer`]. Controllers feed host events in as [`Intent`]s and
//! turn the difference between the old and new state into host mutations.
//!
//! ```text
//! HostEvent ──→ Intent ──→ Reducer ──→ State ──→ Host mutations
//!     ↑                                              │
//!     └──────────────────────────────────────────────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
