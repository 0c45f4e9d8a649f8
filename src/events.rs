use crate::host::{ElementId, IntersectionEntry, ObserverId, TimerId};

/// Notifications delivered by the host environment.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The page scrolled. Fires at input rate; the page coalesces these to
    /// one recomputation per frame.
    Scroll { offset: f64 },
    /// A batch of intersection changes from one observer.
    Intersections {
        observer: ObserverId,
        entries: Vec<IntersectionEntry>,
    },
    /// The tab was hidden or shown.
    VisibilityChange { hidden: bool },
    /// The animation frame requested through `Host::request_frame`.
    FrameTick,
    Timer(TimerId),
    Click { target: ElementId },
    Key { key: String },
    /// The page is going away; release every subscription.
    Unload,
}

/// What the host should do with the native event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub default_prevented: bool,
}

impl EventOutcome {
    pub fn handled() -> Self {
        Self {
            default_prevented: true,
        }
    }

    pub fn ignored() -> Self {
        Self::default()
    }
}
