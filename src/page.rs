//! Page runtime: owns the host and every feature, and routes host events.

use crate::active_link::ActiveLinkTracker;
use crate::anchor::AnchorScroller;
use crate::config::PageConfig;
use crate::error::{Degradation, Feature};
use crate::events::{EventOutcome, HostEvent};
use crate::host::{Host, MotionPreference};
use crate::menu::MobileMenu;
use crate::navbar::NavbarVisibilityController;
use crate::parallax::Parallax;
use crate::reveal::ViewportAnimationTrigger;
use crate::stats::StatsAnimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Running,
    /// Tab hidden; cosmetic animations paused.
    Hidden,
    /// Unloaded. Every event is ignored.
    TornDown,
}

pub struct Page<H: Host> {
    host: H,
    motion: MotionPreference,
    phase: PagePhase,
    reveal: ViewportAnimationTrigger,
    navbar: NavbarVisibilityController,
    menu: Option<MobileMenu>,
    anchors: AnchorScroller,
    active_links: ActiveLinkTracker,
    parallax: Option<Parallax>,
    stats: StatsAnimator,
    degradations: Vec<Degradation>,
}

impl<H: Host> Page<H> {
    /// Reads the motion preference, attaches every feature and reveals the
    /// initial elements. Features whose elements are missing are recorded
    /// in [`degradations`](Self::degradations) and stay inactive.
    pub fn init(mut host: H, config: PageConfig) -> Self {
        let motion = host.motion_preference();
        let mut degradations = Vec::new();

        let reveal_elements = host.query_all(&config.reveal.selector);
        let mut reveal = ViewportAnimationTrigger::new(config.reveal.clone());
        degradations.extend(reveal.initialize(&mut host, &reveal_elements, motion));

        let navbar_element = host.query(&config.navbar.selector);
        if navbar_element.is_none() {
            degradations.push(missing(Feature::Navbar, &config.navbar.selector));
        }
        let navbar = NavbarVisibilityController::new(config.navbar.clone(), navbar_element);

        let menu = match (
            host.query(&config.menu.toggle_selector),
            host.query(&config.menu.menu_selector),
        ) {
            (Some(toggle), Some(menu)) => {
                Some(MobileMenu::attach(&mut host, config.menu.clone(), toggle, menu))
            }
            (None, _) => {
                degradations.push(missing(Feature::Menu, &config.menu.toggle_selector));
                None
            }
            (_, None) => {
                degradations.push(missing(Feature::Menu, &config.menu.menu_selector));
                None
            }
        };

        let anchors = AnchorScroller::attach(&mut host, &config.anchor, motion);
        if anchors.is_empty() {
            degradations.push(Degradation::NoOp {
                feature: Feature::Anchor,
            });
        }

        let active_links = ActiveLinkTracker::attach(&mut host, config.active_link.clone());
        if active_links.is_empty() {
            degradations.push(Degradation::NoOp {
                feature: Feature::ActiveLink,
            });
        }

        let parallax = if motion.is_reduced() {
            None
        } else {
            match host.query(&config.parallax.selector) {
                Some(hero) => Some(Parallax::new(&config.parallax, hero)),
                None => {
                    degradations.push(missing(Feature::Parallax, &config.parallax.selector));
                    None
                }
            }
        };

        let mut stats = StatsAnimator::new(config.stats.clone());
        degradations.extend(stats.initialize(&mut host, motion));

        for degradation in &degradations {
            tracing::warn!("{}", degradation);
        }

        let mut page = Self {
            host,
            motion,
            phase: PagePhase::Running,
            reveal,
            navbar,
            menu,
            anchors,
            active_links,
            parallax,
            stats,
            degradations,
        };

        // Sync scroll-driven features with the offset the page loaded at.
        let offset = page.host.scroll_offset();
        page.navbar.on_scroll(&mut page.host, offset);

        tracing::info!(
            motion = ?motion,
            revealed = page.reveal.state().revealed_count(),
            degraded = page.degradations.len(),
            "Page initialized"
        );
        page
    }

    pub fn dispatch(&mut self, event: HostEvent) -> EventOutcome {
        if self.phase == PagePhase::TornDown {
            return EventOutcome::ignored();
        }

        match event {
            HostEvent::Scroll { offset } => {
                self.navbar.on_scroll(&mut self.host, offset);
            }
            HostEvent::FrameTick => self.on_frame(),
            HostEvent::Intersections { observer, entries } => {
                if self.reveal.observer() == Some(observer) {
                    self.reveal.handle_intersections(&mut self.host, &entries);
                } else if self.stats.observer() == Some(observer) {
                    self.stats.handle_intersections(&mut self.host, &entries);
                }
            }
            HostEvent::Timer(timer) => {
                if !self.reveal.handle_timer(&mut self.host, timer) {
                    self.stats.handle_timer(&mut self.host, timer);
                }
            }
            HostEvent::VisibilityChange { hidden } => self.set_hidden(hidden),
            HostEvent::Click { target } => {
                if let Some(menu) = self.menu.as_mut() {
                    if menu.on_click(&mut self.host, target) {
                        return EventOutcome::handled();
                    }
                }
                if self.anchors.on_click(&mut self.host, target) {
                    return EventOutcome::handled();
                }
            }
            HostEvent::Key { key } => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.on_key(&mut self.host, &key);
                }
            }
            HostEvent::Unload => self.teardown(),
        }
        EventOutcome::ignored()
    }

    /// Releases every observer, timer and pending frame.
    pub fn teardown(&mut self) {
        if self.phase == PagePhase::TornDown {
            return;
        }
        self.reveal.teardown(&mut self.host);
        self.stats.teardown(&mut self.host);
        self.navbar.cancel(&mut self.host);
        self.phase = PagePhase::TornDown;
        tracing::info!("Page torn down");
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    pub fn reveal(&self) -> &ViewportAnimationTrigger {
        &self.reveal
    }

    pub fn navbar(&self) -> &NavbarVisibilityController {
        &self.navbar
    }

    pub fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }

    pub fn active_links(&self) -> &ActiveLinkTracker {
        &self.active_links
    }

    pub fn stats(&self) -> &StatsAnimator {
        &self.stats
    }

    fn on_frame(&mut self) {
        let Some(offset) = self.navbar.on_frame(&mut self.host) else {
            return;
        };
        self.active_links.update(&mut self.host, offset);
        if let Some(parallax) = &self.parallax {
            parallax.apply(&mut self.host, offset);
        }
    }

    fn set_hidden(&mut self, hidden: bool) {
        let phase = if hidden {
            PagePhase::Hidden
        } else {
            PagePhase::Running
        };
        if phase == self.phase {
            return;
        }
        self.phase = phase;
        self.reveal.set_paused(&mut self.host, hidden);
        self.stats.set_paused(&mut self.host, hidden);
        tracing::debug!(hidden, "Page visibility changed");
    }
}

fn missing(feature: Feature, selector: &str) -> Degradation {
    Degradation::MissingElement {
        feature,
        selector: selector.to_string(),
    }
}
