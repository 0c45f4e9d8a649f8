//! The host environment the page runs in.
//!
//! Everything the page needs from a browser goes through [`Host`]: element
//! lookups, class and style writes, layout reads, intersection observers,
//! animation frames and timers. Events flow the other way as
//! [`HostEvent`](crate::events::HostEvent)s passed to
//! [`Page::dispatch`](crate::page::Page::dispatch).
//!
//! [`memory::MemoryHost`] implements the trait without a browser for tests
//! and simulations; `web::WebHost` (feature `web`) binds it to `web-sys`.

pub mod memory;
#[cfg(feature = "web")]
pub mod web;

use std::time::Duration;

use crate::error::HostError;

/// Handle to an element known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Handle to an intersection observer created through [`Host::create_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub usize);

/// Handle to a pending timer created through [`Host::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// User preference for animations, read once when the page starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn is_reduced(self) -> bool {
        self == MotionPreference::Reduced
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// One element's intersection change, as delivered in an observer batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element inside the observer's root region.
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn entering(target: ElementId) -> Self {
        Self {
            target,
            is_intersecting: true,
            ratio: 1.0,
        }
    }

    pub fn leaving(target: ElementId) -> Self {
        Self {
            target,
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Observation policy: an element intersects once `threshold` of its area
/// lies inside the viewport with `bottom_margin` of its height cut off at the
/// bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub bottom_margin: f64,
}

impl ObserverOptions {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold,
            bottom_margin,
        }
    }

    /// CSS `rootMargin` string for browser observers.
    pub fn root_margin(&self) -> String {
        let percent = (self.bottom_margin * 100.0).round() as i64;
        if percent == 0 {
            "0px".to_string()
        } else {
            format!("0px 0px -{}% 0px", percent)
        }
    }

    /// Computes the intersection of `bounds` with the shrunk viewport
    /// starting at `scroll_offset`. Returns `(ratio, is_intersecting)`.
    pub fn evaluate(&self, bounds: Bounds, scroll_offset: f64, viewport_height: f64) -> (f64, bool) {
        let root_top = scroll_offset;
        let root_bottom = scroll_offset + viewport_height * (1.0 - self.bottom_margin);

        let overlap = (bounds.bottom().min(root_bottom) - bounds.top.max(root_top)).max(0.0);
        if bounds.height <= 0.0 {
            let inside = bounds.top >= root_top && bounds.top <= root_bottom;
            return (if inside { 1.0 } else { 0.0 }, inside);
        }

        let ratio = (overlap / bounds.height).clamp(0.0, 1.0);
        let intersecting = if self.threshold <= 0.0 {
            overlap > 0.0
        } else {
            ratio >= self.threshold
        };
        (ratio, intersecting)
    }
}

/// Capabilities the page consumes from its environment.
///
/// Lookups return `Option`/empty collections rather than errors: a missing
/// element switches the dependent feature off. Only observer creation can
/// fail, when the environment has no intersection observation at all.
pub trait Host {
    /// All elements matching `selector`, in document order.
    fn query_all(&mut self, selector: &str) -> Vec<ElementId>;

    fn query(&mut self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    /// Whether `element` or one of its ancestors matches `selector`.
    fn is_within(&self, element: ElementId, selector: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn set_style(&mut self, element: ElementId, property: &str, value: &str);
    fn remove_style(&mut self, element: ElementId, property: &str);

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn text(&self, element: ElementId) -> String;
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Distance from the top of the document to the element's top edge.
    fn offset_top(&self, element: ElementId) -> f64;

    /// Current vertical scroll position of the page.
    fn scroll_offset(&self) -> f64;

    fn motion_preference(&self) -> MotionPreference;

    fn create_observer(&mut self, options: ObserverOptions) -> Result<ObserverId, HostError>;
    fn observe(&mut self, observer: ObserverId, element: ElementId);
    fn unobserve(&mut self, observer: ObserverId, element: ElementId);
    fn disconnect(&mut self, observer: ObserverId);

    /// Asks for one `FrameTick` before the next repaint.
    fn request_frame(&mut self);
    fn cancel_frame(&mut self);

    fn set_timeout(&mut self, delay: Duration) -> TimerId;
    fn clear_timeout(&mut self, timer: TimerId);

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_margin_formats_bottom_shrink() {
        assert_eq!(ObserverOptions::new(0.15, 0.05).root_margin(), "0px 0px -5% 0px");
        assert_eq!(ObserverOptions::new(0.5, 0.0).root_margin(), "0px");
    }

    #[test]
    fn evaluate_requires_threshold_inside_shrunk_viewport() {
        let options = ObserverOptions::new(0.15, 0.05);
        // Viewport 0..1000, shrunk root 0..950. Element 900..1100 has 50px inside.
        let (ratio, intersecting) = options.evaluate(Bounds::new(900.0, 200.0), 0.0, 1000.0);
        assert!((ratio - 0.25).abs() < 1e-9);
        assert!(intersecting);

        // Element 930..1130 has 20px inside: 10%, below threshold.
        let (ratio, intersecting) = options.evaluate(Bounds::new(930.0, 200.0), 0.0, 1000.0);
        assert!((ratio - 0.1).abs() < 1e-9);
        assert!(!intersecting);
    }

    #[test]
    fn evaluate_bottom_margin_delays_trigger() {
        let options = ObserverOptions::new(0.15, 0.05);
        // 40px of a 200px element visible in the full viewport (20%),
        // but the bottom 50px are cut off.
        let (_, intersecting) = options.evaluate(Bounds::new(960.0, 200.0), 0.0, 1000.0);
        assert!(!intersecting);
    }

    #[test]
    fn evaluate_follows_scroll_offset() {
        let options = ObserverOptions::new(0.15, 0.05);
        let bounds = Bounds::new(2000.0, 400.0);
        assert!(!options.evaluate(bounds, 0.0, 1000.0).1);
        assert!(options.evaluate(bounds, 1500.0, 1000.0).1);
        assert!(!options.evaluate(bounds, 3000.0, 1000.0).1);
    }
}
