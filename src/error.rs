use std::fmt;
use thiserror::Error;

/// Page features, used to attribute degradations and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Reveal,
    Navbar,
    Menu,
    Anchor,
    ActiveLink,
    Parallax,
    Stats,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::Reveal => "reveal",
            Feature::Navbar => "navbar",
            Feature::Menu => "menu",
            Feature::Anchor => "anchor",
            Feature::ActiveLink => "active-link",
            Feature::Parallax => "parallax",
            Feature::Stats => "stats",
        };
        f.write_str(name)
    }
}

/// Errors reported by a [`Host`](crate::host::Host) implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    #[error("host does not support {capability}")]
    UnsupportedCapability { capability: &'static str },

    /// A browser API call threw.
    #[error("browser call failed: {message}")]
    Js { message: String },
}

/// A feature that was switched off or reduced while the page kept running.
///
/// None of these are fatal. The page records them so callers and tests can
/// see which features are inactive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Degradation {
    #[error("{feature} disabled: no element matches '{selector}'")]
    MissingElement {
        feature: Feature,
        selector: String,
    },

    #[error("{feature} fell back to immediate rendering: {source}")]
    UnsupportedCapability {
        feature: Feature,
        #[source]
        source: HostError,
    },

    #[error("{feature} has nothing to do")]
    NoOp { feature: Feature },
}

impl Degradation {
    pub fn feature(&self) -> Feature {
        match self {
            Degradation::MissingElement { feature, .. }
            | Degradation::UnsupportedCapability { feature, .. }
            | Degradation::NoOp { feature } => *feature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_message_names_selector() {
        let degradation = Degradation::MissingElement {
            feature: Feature::Navbar,
            selector: ".navbar".to_string(),
        };
        assert_eq!(
            degradation.to_string(),
            "navbar disabled: no element matches '.navbar'"
        );
        assert_eq!(degradation.feature(), Feature::Navbar);
    }

    #[test]
    fn unsupported_capability_keeps_source() {
        let degradation = Degradation::UnsupportedCapability {
            feature: Feature::Reveal,
            source: HostError::UnsupportedCapability {
                capability: "IntersectionObserver",
            },
        };
        let source = std::error::Error::source(&degradation).map(|e| e.to_string());
        assert_eq!(
            source.as_deref(),
            Some("host does not support IntersectionObserver")
        );
    }
}
