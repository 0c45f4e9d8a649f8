//! Count-up animation for the numeric stats in the about section.

mod counter;

pub use counter::StatCounter;

use crate::config::StatsConfig;
use crate::error::{Degradation, Feature};
use crate::host::{ElementId, Host, IntersectionEntry, MotionPreference, ObserverId, TimerId};

/// Starts every stat counter the first time the trigger section is at
/// least half visible, then drives them from a single repeating timer.
pub struct StatsAnimator {
    config: StatsConfig,
    trigger: Option<ElementId>,
    observer: Option<ObserverId>,
    counters: Vec<StatCounter>,
    timer: Option<TimerId>,
    started: bool,
    paused: bool,
}

impl StatsAnimator {
    pub fn new(config: StatsConfig) -> Self {
        Self {
            config,
            trigger: None,
            observer: None,
            counters: Vec::new(),
            timer: None,
            started: false,
            paused: false,
        }
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    pub fn counters(&self) -> &[StatCounter] {
        &self.counters
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.counters.iter().all(StatCounter::is_done)
    }

    pub fn initialize<H: Host>(&mut self, host: &mut H, motion: MotionPreference) -> Option<Degradation> {
        let steps = self.config.steps;
        self.counters = host
            .query_all(&self.config.counter_selector)
            .into_iter()
            .filter_map(|element| {
                StatCounter::parse_target(&host.text(element))
                    .map(|target| StatCounter::new(element, target, steps))
            })
            .collect();
        if self.counters.is_empty() {
            return Some(Degradation::NoOp {
                feature: Feature::Stats,
            });
        }

        if motion.is_reduced() {
            self.finish_all(host);
            return None;
        }

        let Some(trigger) = host.query(&self.config.trigger_selector) else {
            return Some(Degradation::MissingElement {
                feature: Feature::Stats,
                selector: self.config.trigger_selector.clone(),
            });
        };
        self.trigger = Some(trigger);

        match host.create_observer(self.config.observer_options()) {
            Ok(observer) => {
                host.observe(observer, trigger);
                self.observer = Some(observer);
                None
            }
            Err(source) => {
                tracing::warn!("Stats observer unavailable, showing final values: {}", source);
                self.finish_all(host);
                Some(Degradation::UnsupportedCapability {
                    feature: Feature::Stats,
                    source,
                })
            }
        }
    }

    pub fn handle_intersections<H: Host>(&mut self, host: &mut H, entries: &[IntersectionEntry]) {
        if self.started {
            return;
        }
        let Some(trigger) = self.trigger else {
            return;
        };
        if !entries
            .iter()
            .any(|entry| entry.target == trigger && entry.is_intersecting)
        {
            return;
        }

        if let Some(observer) = self.observer {
            host.unobserve(observer, trigger);
        }
        self.started = true;
        tracing::debug!(counters = self.counters.len(), "Stat counters started");
        self.schedule(host);
    }

    /// Returns `true` if `timer` was the counter tick.
    pub fn handle_timer<H: Host>(&mut self, host: &mut H, timer: TimerId) -> bool {
        if self.timer != Some(timer) {
            return false;
        }
        self.timer = None;

        for counter in self.counters.iter_mut().filter(|c| !c.is_done()) {
            let text = counter.step();
            host.set_text(counter.element(), &text);
        }
        self.schedule(host);
        true
    }

    /// Suspends ticking while the page is hidden.
    pub fn set_paused<H: Host>(&mut self, host: &mut H, paused: bool) {
        self.paused = paused;
        if paused {
            if let Some(timer) = self.timer.take() {
                host.clear_timeout(timer);
            }
        } else {
            self.schedule(host);
        }
    }

    pub fn teardown<H: Host>(&mut self, host: &mut H) {
        if let Some(observer) = self.observer.take() {
            if let (false, Some(trigger)) = (self.started, self.trigger) {
                host.unobserve(observer, trigger);
            }
            host.disconnect(observer);
        }
        if let Some(timer) = self.timer.take() {
            host.clear_timeout(timer);
        }
    }

    fn schedule<H: Host>(&mut self, host: &mut H) {
        if self.started && !self.paused && self.timer.is_none() && !self.is_finished() {
            self.timer = Some(host.set_timeout(self.config.tick_interval()));
        }
    }

    fn finish_all<H: Host>(&mut self, host: &mut H) {
        self.started = true;
        for counter in &mut self.counters {
            let text = counter.finish();
            host.set_text(counter.element(), &text);
        }
    }
}
