//! In-memory host.
//!
//! Holds a flat element tree with vertical geometry, simulates intersection
//! observers against a scrollable viewport and queues frames and timers on a
//! virtual clock. Nothing is delivered automatically: the driver pulls
//! pending events with [`MemoryHost::take_frame`],
//! [`MemoryHost::take_intersections`] and [`MemoryHost::advance`] and passes
//! them to [`Page::dispatch`](crate::page::Page::dispatch).

mod selector;

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::error::HostError;
use crate::events::HostEvent;
use crate::host::{
    Bounds, ElementId, Host, IntersectionEntry, MotionPreference, ObserverId, ObserverOptions,
    ScrollBehavior, TimerId,
};

use selector::SelectorList;

/// An element stored by [`MemoryHost`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemElement {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    bounds: Bounds,
    parent: Option<ElementId>,
}

impl MemElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Places the element at `top` with the given height, in document pixels.
    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.bounds = Bounds::new(top, height);
        self
    }

    pub fn inside(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        if name == "id" {
            return self.id.as_deref();
        }
        self.attributes.get(name).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

#[derive(Debug)]
struct MemObserver {
    options: ObserverOptions,
    /// Observed targets with the intersection state last reported for each.
    targets: BTreeMap<ElementId, Option<bool>>,
    connected: bool,
}

/// Order-sensitive host calls, recorded in [`MemoryHost::mutations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    AddClass { element: ElementId, class: String },
    Observe { observer: ObserverId, element: ElementId },
}

#[derive(Debug)]
pub struct MemoryHost {
    elements: Vec<MemElement>,
    scroll_offset: f64,
    viewport_height: f64,
    motion: MotionPreference,
    observation_supported: bool,
    observers: Vec<MemObserver>,
    frame_pending: bool,
    frame_requests: usize,
    now: Duration,
    next_timer: u64,
    timers: BTreeMap<TimerId, Duration>,
    unobserved: Vec<(ObserverId, ElementId)>,
    scrolled_into_view: Vec<(ElementId, ScrollBehavior)>,
    mutations: Vec<Mutation>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            scroll_offset: 0.0,
            viewport_height: 800.0,
            motion: MotionPreference::Full,
            observation_supported: true,
            observers: Vec::new(),
            frame_pending: false,
            frame_requests: 0,
            now: Duration::ZERO,
            next_timer: 1,
            timers: BTreeMap::new(),
            unobserved: Vec::new(),
            scrolled_into_view: Vec::new(),
            mutations: Vec::new(),
        }
    }

    pub fn with_viewport_height(mut self, height: f64) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn with_motion(mut self, motion: MotionPreference) -> Self {
        self.motion = motion;
        self
    }

    /// Simulates an environment without intersection observation.
    pub fn without_observation(mut self) -> Self {
        self.observation_supported = false;
        self
    }

    pub fn add(&mut self, element: MemElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// # Panics
    ///
    /// Panics if `id` was not returned by [`MemoryHost::add`].
    pub fn element(&self, id: ElementId) -> &MemElement {
        &self.elements[id.0]
    }

    /// Moves the viewport without emitting anything.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
    }

    /// Takes the pending animation frame, if one was requested.
    pub fn take_frame(&mut self) -> Option<HostEvent> {
        if std::mem::take(&mut self.frame_pending) {
            Some(HostEvent::FrameTick)
        } else {
            None
        }
    }

    /// Intersection batches for every observed element whose state changed
    /// since it was last reported. Newly observed elements always report.
    pub fn take_intersections(&mut self) -> Vec<HostEvent> {
        let mut events = Vec::new();
        for (index, observer) in self.observers.iter_mut().enumerate() {
            if !observer.connected {
                continue;
            }
            let mut entries = Vec::new();
            for (target, last) in observer.targets.iter_mut() {
                let bounds = self.elements[target.0].bounds;
                let (ratio, is_intersecting) =
                    observer
                        .options
                        .evaluate(bounds, self.scroll_offset, self.viewport_height);
                if *last != Some(is_intersecting) {
                    *last = Some(is_intersecting);
                    entries.push(IntersectionEntry {
                        target: *target,
                        is_intersecting,
                        ratio,
                    });
                }
            }
            if !entries.is_empty() {
                events.push(HostEvent::Intersections {
                    observer: ObserverId(index),
                    entries,
                });
            }
        }
        events
    }

    /// Advances the virtual clock and returns the timers that came due,
    /// earliest first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<HostEvent> {
        self.now += elapsed;
        let mut due: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, at)| **at <= self.now)
            .map(|(id, at)| (*at, *id))
            .collect();
        due.sort();
        due.iter()
            .map(|(_, id)| {
                self.timers.remove(id);
                HostEvent::Timer(*id)
            })
            .collect()
    }

    pub fn frame_requests(&self) -> usize {
        self.frame_requests
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Every `unobserve` call received, in order.
    pub fn unobserve_calls(&self) -> &[(ObserverId, ElementId)] {
        &self.unobserved
    }

    pub fn is_observed(&self, element: ElementId) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.connected && observer.targets.contains_key(&element))
    }

    pub fn observed_count(&self) -> usize {
        self.observers
            .iter()
            .filter(|observer| observer.connected)
            .map(|observer| observer.targets.len())
            .sum()
    }

    pub fn connected_observers(&self) -> usize {
        self.observers.iter().filter(|observer| observer.connected).count()
    }

    pub fn scrolled_into_view(&self) -> &[(ElementId, ScrollBehavior)] {
        &self.scrolled_into_view
    }

    /// Class additions and `observe` calls, in call order.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut MemElement> {
        self.elements.get_mut(id.0)
    }
}

impl Host for MemoryHost {
    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        let Some(selector) = SelectorList::parse(selector) else {
            return Vec::new();
        };
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| selector.matches(element))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    fn is_within(&self, element: ElementId, selector: &str) -> bool {
        let Some(selector) = SelectorList::parse(selector) else {
            return false;
        };
        let mut current = Some(element);
        while let Some(id) = current {
            let Some(node) = self.elements.get(id.0) else {
                return false;
            };
            if selector.matches(node) {
                return true;
            }
            current = node.parent;
        }
        false
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        self.mutations.push(Mutation::AddClass {
            element,
            class: class.to_string(),
        });
        if let Some(node) = self.get_mut(element) {
            node.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.get_mut(element) {
            node.classes.remove(class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.elements
            .get(element.0)
            .is_some_and(|node| node.classes.contains(class))
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.get_mut(element) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn remove_style(&mut self, element: ElementId, property: &str) {
        if let Some(node) = self.get_mut(element) {
            node.styles.remove(property);
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.elements
            .get(element.0)
            .and_then(|node| node.attribute(name))
            .map(str::to_string)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.get_mut(element) {
            if name == "id" {
                node.id = Some(value.to_string());
            } else {
                node.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn text(&self, element: ElementId) -> String {
        self.elements
            .get(element.0)
            .map(|node| node.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.get_mut(element) {
            node.text = text.to_string();
        }
    }

    fn offset_top(&self, element: ElementId) -> f64 {
        self.elements
            .get(element.0)
            .map(|node| node.bounds.top)
            .unwrap_or_default()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn motion_preference(&self) -> MotionPreference {
        self.motion
    }

    fn create_observer(&mut self, options: ObserverOptions) -> Result<ObserverId, HostError> {
        if !self.observation_supported {
            return Err(HostError::UnsupportedCapability {
                capability: "IntersectionObserver",
            });
        }
        self.observers.push(MemObserver {
            options,
            targets: BTreeMap::new(),
            connected: true,
        });
        Ok(ObserverId(self.observers.len() - 1))
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId) {
        self.mutations.push(Mutation::Observe { observer, element });
        if let Some(observer) = self.observers.get_mut(observer.0) {
            observer.targets.entry(element).or_insert(None);
        }
    }

    fn unobserve(&mut self, observer: ObserverId, element: ElementId) {
        self.unobserved.push((observer, element));
        if let Some(observer) = self.observers.get_mut(observer.0) {
            observer.targets.remove(&element);
        }
    }

    fn disconnect(&mut self, observer: ObserverId) {
        if let Some(observer) = self.observers.get_mut(observer.0) {
            observer.targets.clear();
            observer.connected = false;
        }
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
        self.frame_pending = true;
    }

    fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.insert(id, self.now + delay);
        id
    }

    fn clear_timeout(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior) {
        self.scrolled_into_view.push((element, behavior));
        let top = self.offset_top(element);
        self.set_scroll_offset(top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (MemoryHost, ElementId, ElementId) {
        let mut host = MemoryHost::new().with_viewport_height(1000.0);
        let hero = host.add(MemElement::new("header").with_class("hero").at(0.0, 800.0));
        host.add(MemElement::new("h1").with_class("reveal").at(100.0, 80.0).inside(hero));
        let about = host.add(
            MemElement::new("section")
                .with_id("about")
                .with_class("section")
                .at(1500.0, 600.0),
        );
        (host, hero, about)
    }

    #[test]
    fn query_all_returns_document_order() {
        let (mut host, _, about) = page();
        assert_eq!(host.query_all(".section"), vec![about]);
        assert_eq!(host.query("#about"), Some(about));
        assert!(host.query(".missing").is_none());
    }

    #[test]
    fn is_within_walks_ancestors() {
        let (mut host, hero, about) = page();
        let title = host.query(".reveal").unwrap();
        assert!(host.is_within(title, ".hero"));
        assert!(host.is_within(hero, ".hero"));
        assert!(!host.is_within(about, ".hero"));
    }

    #[test]
    fn intersections_report_initial_state_then_changes_only() {
        let (mut host, _, about) = page();
        let observer = host.create_observer(ObserverOptions::new(0.15, 0.05)).unwrap();
        host.observe(observer, about);

        let events = host.take_intersections();
        assert_eq!(
            events,
            vec![HostEvent::Intersections {
                observer,
                entries: vec![IntersectionEntry {
                    target: about,
                    is_intersecting: false,
                    ratio: 0.0,
                }],
            }]
        );
        assert!(host.take_intersections().is_empty());

        host.set_scroll_offset(1000.0);
        let events = host.take_intersections();
        assert!(matches!(
            &events[..],
            [HostEvent::Intersections { entries, .. }] if entries[0].is_intersecting
        ));
    }

    #[test]
    fn unsupported_observation_errors() {
        let mut host = MemoryHost::new().without_observation();
        assert!(matches!(
            host.create_observer(ObserverOptions::new(0.15, 0.05)),
            Err(HostError::UnsupportedCapability { .. })
        ));
    }

    #[test]
    fn timers_fire_in_due_order() {
        let mut host = MemoryHost::new();
        let late = host.set_timeout(Duration::from_millis(800));
        let early = host.set_timeout(Duration::from_millis(30));
        let cleared = host.set_timeout(Duration::from_millis(10));
        host.clear_timeout(cleared);

        assert_eq!(host.advance(Duration::from_millis(29)), vec![]);
        assert_eq!(
            host.advance(Duration::from_millis(1000)),
            vec![HostEvent::Timer(early), HostEvent::Timer(late)]
        );
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn frame_requests_coalesce_until_taken() {
        let mut host = MemoryHost::new();
        host.request_frame();
        host.request_frame();
        assert_eq!(host.take_frame(), Some(HostEvent::FrameTick));
        assert_eq!(host.take_frame(), None);
        assert_eq!(host.frame_requests(), 2);
    }
}
