//! Per-element reveal state.

use crate::host::ElementId;
use crate::mvi::UiState;
use std::collections::BTreeMap;

/// Lifecycle of a trigger element.
///
/// `Unobserved → Observing → Revealed` for elements that wait for the
/// viewport, `Unobserved → Revealed` for elements shown on load. `Revealed`
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPhase {
    #[default]
    Unobserved,
    Observing,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerElement {
    pub phase: RevealPhase,
    /// Lies within a region that is shown on load (hero, navigation).
    pub is_initial: bool,
}

impl TriggerElement {
    pub fn revealed(&self) -> bool {
        self.phase == RevealPhase::Revealed
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevealState {
    pub elements: BTreeMap<ElementId, TriggerElement>,
}

impl UiState for RevealState {}

impl RevealState {
    pub fn phase(&self, element: ElementId) -> Option<RevealPhase> {
        self.elements.get(&element).map(|e| e.phase)
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.elements.get(&element).is_some_and(TriggerElement::revealed)
    }

    /// Elements still waiting for the viewport.
    pub fn observing(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements
            .iter()
            .filter(|(_, e)| e.phase == RevealPhase::Observing)
            .map(|(id, _)| *id)
    }

    pub fn revealed_count(&self) -> usize {
        self.elements.values().filter(|e| e.revealed()).count()
    }

    pub fn all_revealed(&self) -> bool {
        self.elements.values().all(TriggerElement::revealed)
    }
}
