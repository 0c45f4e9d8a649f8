//! Interactive behavior for a single-page portfolio: scroll-triggered
//! reveals, a hide-on-scroll navbar, a mobile menu, smooth anchor scrolling,
//! active-link tracking, hero parallax and counting stats.
//!
//! All behavior runs against the [`host::Host`] trait and is driven by
//! [`events::HostEvent`]s passed to [`page::Page::dispatch`].

pub mod active_link;
pub mod anchor;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod logging;
pub mod menu;
pub mod mvi;
pub mod navbar;
pub mod page;
pub mod parallax;
pub mod reveal;
pub mod stats;

pub use config::PageConfig;
pub use error::{Degradation, Feature, HostError};
pub use events::{EventOutcome, HostEvent};
pub use host::{ElementId, Host, MotionPreference};
pub use page::{Page, PagePhase};
