//! Hide-on-scroll navigation bar.

mod controller;
mod intent;
mod reducer;
mod state;

pub use controller::NavbarVisibilityController;
pub use intent::NavbarIntent;
pub use reducer::NavbarReducer;
pub use state::ScrollState;
