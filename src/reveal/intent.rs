use crate::host::ElementId;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum RevealIntent {
    /// Registers trigger elements as `(element, is_initial)` pairs.
    /// With `observe` false every element is revealed at once
    /// (reduced motion, or no observation capability).
    Initialize {
        elements: Vec<(ElementId, bool)>,
        observe: bool,
    },
    /// The element reached the intersection threshold.
    Intersected { target: ElementId },
    /// Observation ended (page teardown). Waiting elements go back to
    /// `Unobserved`; revealed elements stay revealed.
    Release,
}

impl Intent for RevealIntent {}
