use crate::config::NavbarConfig;
use crate::host::{ElementId, Host};
use crate::mvi::Reducer;
use crate::navbar::intent::NavbarIntent;
use crate::navbar::reducer::NavbarReducer;
use crate::navbar::state::ScrollState;

/// Hides the fixed header while scrolling down and shows it again on any
/// upward scroll.
///
/// Scroll notifications only record the latest offset; the first one in a
/// frame requests an animation frame and [`on_frame`](Self::on_frame) does
/// the single recomputation for that frame. Without a navbar element the
/// controller still paces frames for the other scroll-driven features but
/// writes nothing.
pub struct NavbarVisibilityController {
    config: NavbarConfig,
    navbar: Option<ElementId>,
    state: ScrollState,
    pending_offset: Option<f64>,
    ticking: bool,
    recomputations: u64,
}

impl NavbarVisibilityController {
    pub fn new(config: NavbarConfig, navbar: Option<ElementId>) -> Self {
        Self {
            config,
            navbar,
            state: ScrollState::default(),
            pending_offset: None,
            ticking: false,
            recomputations: 0,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state.hidden
    }

    /// A frame has been requested and not yet delivered.
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn on_scroll<H: Host>(&mut self, host: &mut H, offset: f64) {
        self.pending_offset = Some(offset);
        if !self.ticking {
            self.ticking = true;
            host.request_frame();
        }
    }

    /// Runs the frame's recomputation. Returns the offset it used, or `None`
    /// if no scroll arrived since the last frame.
    pub fn on_frame<H: Host>(&mut self, host: &mut H) -> Option<f64> {
        if !std::mem::take(&mut self.ticking) {
            return None;
        }
        let offset = self.pending_offset.take()?;

        let before = self.state;
        self.state = NavbarReducer::reduce(
            self.state,
            NavbarIntent::Recompute {
                offset,
                dead_zone: self.config.dead_zone,
                shadow_offset: self.config.shadow_offset,
            },
        );
        self.recomputations += 1;

        if let Some(navbar) = self.navbar {
            if before.hidden != self.state.hidden {
                tracing::debug!(offset, hidden = self.state.hidden, "Navbar visibility changed");
                toggle_class(host, navbar, &self.config.hidden_class, self.state.hidden);
            }
            if before.scrolled != self.state.scrolled {
                toggle_class(host, navbar, &self.config.scrolled_class, self.state.scrolled);
            }
        }

        Some(offset)
    }

    /// Drops any pending frame.
    pub fn cancel<H: Host>(&mut self, host: &mut H) {
        if std::mem::take(&mut self.ticking) {
            host.cancel_frame();
        }
        self.pending_offset = None;
    }
}

fn toggle_class<H: Host>(host: &mut H, element: ElementId, class: &str, on: bool) {
    if on {
        host.add_class(element, class);
    } else {
        host.remove_class(element, class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemElement, MemoryHost};

    fn controller() -> (MemoryHost, ElementId, NavbarVisibilityController) {
        let mut host = MemoryHost::new();
        let navbar = host.add(MemElement::new("nav").with_class("navbar"));
        let controller = NavbarVisibilityController::new(NavbarConfig::default(), Some(navbar));
        (host, navbar, controller)
    }

    #[test]
    fn frame_without_scroll_does_nothing() {
        let (mut host, _, mut controller) = controller();
        assert_eq!(controller.on_frame(&mut host), None);
        assert_eq!(controller.recomputations(), 0);
    }

    #[test]
    fn hidden_and_scrolled_classes_follow_state() {
        let (mut host, navbar, mut controller) = controller();

        controller.on_scroll(&mut host, 120.0);
        assert_eq!(controller.on_frame(&mut host), Some(120.0));
        assert!(host.element(navbar).has_class("navbar--hidden"));
        assert!(host.element(navbar).has_class("scrolled"));

        controller.on_scroll(&mut host, 30.0);
        controller.on_frame(&mut host);
        assert!(!host.element(navbar).has_class("navbar--hidden"));
        assert!(!host.element(navbar).has_class("scrolled"));
    }

    #[test]
    fn missing_navbar_still_paces_frames() {
        let mut host = MemoryHost::new();
        let mut controller = NavbarVisibilityController::new(NavbarConfig::default(), None);
        controller.on_scroll(&mut host, 500.0);
        assert_eq!(controller.on_frame(&mut host), Some(500.0));
        assert!(controller.is_hidden());
    }

    #[test]
    fn cancel_drops_pending_frame() {
        let (mut host, _, mut controller) = controller();
        controller.on_scroll(&mut host, 200.0);
        controller.cancel(&mut host);
        assert!(!host.frame_pending());
        assert_eq!(controller.on_frame(&mut host), None);
    }
}
