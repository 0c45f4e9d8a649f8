//! Scroll-triggered reveal animations.

mod intent;
mod reducer;
mod state;
mod trigger;

pub use intent::RevealIntent;
pub use reducer::RevealReducer;
pub use state::{RevealPhase, RevealState, TriggerElement};
pub use trigger::ViewportAnimationTrigger;
