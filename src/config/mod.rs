//! Page configuration.
//!
//! Selectors, class names, thresholds and timings for every feature, loaded
//! from TOML. Defaults match the stock portfolio markup.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{
    ActiveLinkConfig, AnchorConfig, MenuConfig, NavbarConfig, PageConfig, ParallaxConfig,
    RevealConfig, StatsConfig,
};
