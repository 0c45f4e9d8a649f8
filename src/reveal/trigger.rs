use std::collections::BTreeMap;

use crate::config::RevealConfig;
use crate::error::{Degradation, Feature};
use crate::host::{ElementId, Host, IntersectionEntry, MotionPreference, ObserverId, TimerId};
use crate::mvi::Reducer;
use crate::reveal::intent::RevealIntent;
use crate::reveal::reducer::RevealReducer;
use crate::reveal::state::{RevealPhase, RevealState};

const PLAY_STATE: &str = "animation-play-state";

/// Reveals elements once as they scroll into view.
///
/// Elements inside an initial region (hero, navigation) are revealed during
/// [`initialize`](Self::initialize) and never observed. The rest are observed
/// until their first intersection, then unobserved in the same callback.
pub struct ViewportAnimationTrigger {
    config: RevealConfig,
    state: RevealState,
    motion: MotionPreference,
    observer: Option<ObserverId>,
    paused: bool,
    /// Pending rendering-hint cleanups.
    cleanups: BTreeMap<TimerId, ElementId>,
}

impl ViewportAnimationTrigger {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            state: RevealState::default(),
            motion: MotionPreference::Full,
            observer: None,
            paused: false,
            cleanups: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.state.is_revealed(element)
    }

    /// Elements currently holding a rendering hint.
    pub fn animating(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.cleanups.values().copied()
    }

    pub fn initialize<H: Host>(
        &mut self,
        host: &mut H,
        elements: &[ElementId],
        motion: MotionPreference,
    ) -> Option<Degradation> {
        self.motion = motion;
        if elements.is_empty() {
            return Some(Degradation::NoOp {
                feature: Feature::Reveal,
            });
        }

        let mut degradation = None;
        let observe = if motion.is_reduced() {
            tracing::debug!("Reduced motion: revealing {} elements", elements.len());
            false
        } else {
            match host.create_observer(self.config.observer_options()) {
                Ok(observer) => {
                    self.observer = Some(observer);
                    true
                }
                Err(source) => {
                    tracing::warn!("Reveal observer unavailable, revealing all: {}", source);
                    degradation = Some(Degradation::UnsupportedCapability {
                        feature: Feature::Reveal,
                        source,
                    });
                    false
                }
            }
        };

        let classified: Vec<(ElementId, bool)> = elements
            .iter()
            .map(|&element| (element, self.is_initial(&*host, element)))
            .collect();
        let before = self.state.clone();
        self.state = RevealReducer::reduce(
            std::mem::take(&mut self.state),
            RevealIntent::Initialize {
                elements: classified,
                observe,
            },
        );

        let entered = |phase: RevealPhase, element: ElementId| {
            self.state.phase(element) == Some(phase) && before.phase(element) != Some(phase)
        };
        let revealed: Vec<ElementId> = elements
            .iter()
            .copied()
            .filter(|&element| entered(RevealPhase::Revealed, element))
            .collect();
        let observing: Vec<ElementId> = elements
            .iter()
            .copied()
            .filter(|&element| entered(RevealPhase::Observing, element))
            .collect();

        // Initial elements are shown before observation starts.
        for element in revealed {
            self.reveal(host, element);
        }
        if let Some(observer) = self.observer {
            for element in observing {
                host.observe(observer, element);
            }
        }

        tracing::debug!(
            revealed = self.state.revealed_count(),
            observing = self.state.observing().count(),
            "Reveal trigger initialized"
        );
        degradation
    }

    /// Handles one observer batch. Entries that are not intersecting are
    /// ignored; a reveal never reverts.
    pub fn handle_intersections<H: Host>(&mut self, host: &mut H, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            if self.state.phase(entry.target) != Some(RevealPhase::Observing) {
                continue;
            }

            self.state = RevealReducer::reduce(
                std::mem::take(&mut self.state),
                RevealIntent::Intersected {
                    target: entry.target,
                },
            );

            if let Some(observer) = self.observer {
                host.unobserve(observer, entry.target);
            }
            self.reveal(host, entry.target);
            tracing::debug!(element = entry.target.0, ratio = entry.ratio, "Revealed");
        }
    }

    /// Returns `true` if `timer` was a cleanup owned by this trigger.
    pub fn handle_timer<H: Host>(&mut self, host: &mut H, timer: TimerId) -> bool {
        let Some(element) = self.cleanups.remove(&timer) else {
            return false;
        };
        host.remove_style(element, &self.config.hint_property);
        host.remove_style(element, PLAY_STATE);
        true
    }

    /// Pauses or resumes animations that are still running. Reveals made
    /// while paused start paused.
    pub fn set_paused<H: Host>(&mut self, host: &mut H, paused: bool) {
        self.paused = paused;
        let value = if paused { "paused" } else { "running" };
        for element in self.animating() {
            host.set_style(element, PLAY_STATE, value);
        }
    }

    /// Releases the observer and cancels pending cleanups.
    pub fn teardown<H: Host>(&mut self, host: &mut H) {
        if let Some(observer) = self.observer.take() {
            for element in self.state.observing() {
                host.unobserve(observer, element);
            }
            host.disconnect(observer);
        }
        self.state = RevealReducer::reduce(std::mem::take(&mut self.state), RevealIntent::Release);

        for (timer, _) in std::mem::take(&mut self.cleanups) {
            host.clear_timeout(timer);
        }
    }

    fn is_initial<H: Host>(&self, host: &H, element: ElementId) -> bool {
        self.config
            .initial_regions
            .iter()
            .any(|region| host.is_within(element, region))
    }

    fn reveal<H: Host>(&mut self, host: &mut H, element: ElementId) {
        host.add_class(element, &self.config.revealed_class);
        if self.motion.is_reduced() {
            return;
        }
        host.set_style(element, &self.config.hint_property, &self.config.hint_value);
        if self.paused {
            host.set_style(element, PLAY_STATE, "paused");
        }
        let timer = host.set_timeout(self.config.cleanup_delay());
        self.cleanups.insert(timer, element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemElement, MemoryHost, Mutation};

    fn setup() -> (MemoryHost, ElementId, Vec<ElementId>) {
        let mut host = MemoryHost::new().with_viewport_height(1000.0);
        let hero = host.add(MemElement::new("header").with_class("hero").at(0.0, 900.0));
        let intro = host.add(
            MemElement::new("div")
                .with_class("reveal")
                .at(200.0, 100.0)
                .inside(hero),
        );
        let work = host.add(MemElement::new("section").with_class("section").at(1200.0, 600.0));
        let contact = host.add(MemElement::new("section").with_class("section").at(2400.0, 600.0));
        (host, intro, vec![intro, work, contact])
    }

    #[test]
    fn initial_elements_revealed_without_observation() {
        let (mut host, intro, elements) = setup();
        let mut trigger = ViewportAnimationTrigger::new(RevealConfig::default());
        let degradation = trigger.initialize(&mut host, &elements, MotionPreference::Full);

        assert!(degradation.is_none());
        assert!(trigger.is_revealed(intro));
        assert!(host.element(intro).has_class("visible"));
        assert!(!host.is_observed(intro));
        assert!(host.is_observed(elements[1]));
        assert!(host.is_observed(elements[2]));
    }

    #[test]
    fn cleanup_timer_removes_hint() {
        let (mut host, intro, elements) = setup();
        let mut trigger = ViewportAnimationTrigger::new(RevealConfig::default());
        trigger.initialize(&mut host, &elements, MotionPreference::Full);
        assert_eq!(host.element(intro).style("will-change"), Some("opacity, transform"));

        let due = host.advance(std::time::Duration::from_millis(800));
        assert_eq!(due.len(), 1);
        for event in due {
            if let crate::events::HostEvent::Timer(timer) = event {
                assert!(trigger.handle_timer(&mut host, timer));
            }
        }
        assert_eq!(host.element(intro).style("will-change"), None);
        assert_eq!(trigger.animating().count(), 0);
    }

    #[test]
    fn initial_elements_revealed_before_observation_starts() {
        let (mut host, intro, elements) = setup();
        let ordered = [elements[1], intro, elements[2]];
        let mut trigger = ViewportAnimationTrigger::new(RevealConfig::default());
        trigger.initialize(&mut host, &ordered, MotionPreference::Full);

        let position = |wanted: &Mutation| host.mutations().iter().position(|m| m == wanted);
        let shown = position(&Mutation::AddClass {
            element: intro,
            class: "visible".to_string(),
        })
        .unwrap();
        let first_observe = host
            .mutations()
            .iter()
            .position(|m| matches!(m, Mutation::Observe { .. }))
            .unwrap();
        assert!(shown < first_observe);
    }

    #[test]
    fn reveal_while_paused_starts_paused() {
        let (mut host, _, elements) = setup();
        let mut trigger = ViewportAnimationTrigger::new(RevealConfig::default());
        trigger.initialize(&mut host, &elements, MotionPreference::Full);

        trigger.set_paused(&mut host, true);
        trigger.handle_intersections(&mut host, &[IntersectionEntry::entering(elements[1])]);
        assert_eq!(host.element(elements[1]).style(PLAY_STATE), Some("paused"));

        trigger.set_paused(&mut host, false);
        assert_eq!(host.element(elements[1]).style(PLAY_STATE), Some("running"));
    }

    #[test]
    fn leaving_entries_are_ignored() {
        let (mut host, _, elements) = setup();
        let mut trigger = ViewportAnimationTrigger::new(RevealConfig::default());
        trigger.initialize(&mut host, &elements, MotionPreference::Full);

        trigger.handle_intersections(&mut host, &[IntersectionEntry::leaving(elements[1])]);
        assert!(!trigger.is_revealed(elements[1]));
        assert!(host.is_observed(elements[1]));
    }

    #[test]
    fn empty_selection_is_noop() {
        let mut host = MemoryHost::new();
        let mut trigger = ViewportAnimationTrigger::new(RevealConfig::default());
        assert_eq!(
            trigger.initialize(&mut host, &[], MotionPreference::Full),
            Some(Degradation::NoOp {
                feature: Feature::Reveal
            })
        );
        assert_eq!(host.connected_observers(), 0);
    }

    #[test]
    fn teardown_releases_waiting_elements_only() {
        let (mut host, _, elements) = setup();
        let mut trigger = ViewportAnimationTrigger::new(RevealConfig::default());
        trigger.initialize(&mut host, &elements, MotionPreference::Full);
        trigger.handle_intersections(&mut host, &[IntersectionEntry::entering(elements[1])]);

        trigger.teardown(&mut host);
        assert_eq!(host.connected_observers(), 0);
        assert_eq!(host.pending_timers(), 0);
        assert!(trigger.is_revealed(elements[1]));
        assert_eq!(trigger.state().phase(elements[2]), Some(RevealPhase::Unobserved));
        let unobserved: Vec<_> = host.unobserve_calls().iter().map(|(_, e)| *e).collect();
        assert_eq!(unobserved, vec![elements[1], elements[2]]);
    }
}
