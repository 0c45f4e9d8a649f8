use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::PageConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse page config: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl PageConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PageConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError { source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `PageConfig::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(PageConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Thresholds lie within `0..=1` and margins within `0..1`
    /// - Selectors and class names are not empty
    /// - Durations and step counts are positive
    /// - Offsets are finite and not negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("reveal.threshold", self.reveal.threshold, true)?;
        check_fraction("reveal.bottom_margin", self.reveal.bottom_margin, false)?;
        check_fraction("stats.threshold", self.stats.threshold, true)?;

        check_non_empty("reveal.selector", &self.reveal.selector)?;
        check_non_empty("reveal.revealed_class", &self.reveal.revealed_class)?;
        check_non_empty("reveal.hint_property", &self.reveal.hint_property)?;
        for region in &self.reveal.initial_regions {
            check_non_empty("reveal.initial_regions", region)?;
        }
        check_non_empty("navbar.selector", &self.navbar.selector)?;
        check_non_empty("navbar.hidden_class", &self.navbar.hidden_class)?;
        check_non_empty("navbar.scrolled_class", &self.navbar.scrolled_class)?;
        check_non_empty("menu.toggle_selector", &self.menu.toggle_selector)?;
        check_non_empty("menu.menu_selector", &self.menu.menu_selector)?;
        check_non_empty("menu.link_selector", &self.menu.link_selector)?;
        check_non_empty("menu.open_class", &self.menu.open_class)?;
        check_non_empty("anchor.selector", &self.anchor.selector)?;
        check_non_empty("active_link.section_selector", &self.active_link.section_selector)?;
        check_non_empty("active_link.link_selector", &self.active_link.link_selector)?;
        check_non_empty("active_link.active_class", &self.active_link.active_class)?;
        check_non_empty("parallax.selector", &self.parallax.selector)?;
        check_non_empty("stats.trigger_selector", &self.stats.trigger_selector)?;
        check_non_empty("stats.counter_selector", &self.stats.counter_selector)?;

        check_offset("navbar.dead_zone", self.navbar.dead_zone)?;
        check_offset("navbar.shadow_offset", self.navbar.shadow_offset)?;
        check_offset("active_link.lead_offset", self.active_link.lead_offset)?;
        if !self.parallax.factor.is_finite() {
            return Err(invalid("parallax.factor must be a finite number"));
        }

        if self.reveal.cleanup_delay_ms == 0 {
            return Err(invalid("reveal.cleanup_delay_ms must be positive"));
        }
        if self.stats.steps == 0 {
            return Err(invalid("stats.steps must be positive"));
        }
        if self.stats.tick_ms == 0 {
            return Err(invalid("stats.tick_ms must be positive"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}

fn check_fraction(field: &str, value: f64, inclusive: bool) -> Result<(), ConfigError> {
    let in_range = if inclusive {
        (0.0..=1.0).contains(&value)
    } else {
        (0.0..1.0).contains(&value)
    };
    if in_range {
        Ok(())
    } else {
        Err(invalid(format!("{} must be between 0 and 1, got {}", field, value)))
    }
}

fn check_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn check_offset(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}
