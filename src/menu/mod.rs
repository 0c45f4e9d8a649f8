//! Collapsible navigation menu for narrow viewports.

mod intent;
mod reducer;
mod state;

pub use intent::MenuIntent;
pub use reducer::MenuReducer;
pub use state::MenuState;

use crate::config::MenuConfig;
use crate::host::{ElementId, Host};
use crate::mvi::Reducer;

pub struct MobileMenu {
    config: MenuConfig,
    toggle: ElementId,
    menu: ElementId,
    links: Vec<ElementId>,
    state: MenuState,
}

impl MobileMenu {
    /// Sets the toggle's initial `aria-expanded`.
    pub fn attach<H: Host>(host: &mut H, config: MenuConfig, toggle: ElementId, menu: ElementId) -> Self {
        let links = host.query_all(&config.link_selector);
        host.set_attribute(toggle, "aria-expanded", "false");
        Self {
            config,
            toggle,
            menu,
            links,
            state: MenuState::Closed,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Handles a click. Returns `true` when the click hit the toggle button;
    /// link clicks close the menu but are left to the other handlers.
    pub fn on_click<H: Host>(&mut self, host: &mut H, target: ElementId) -> bool {
        if target == self.toggle {
            self.apply(host, MenuIntent::Toggle);
            return true;
        }
        if self.links.contains(&target) {
            self.apply(host, MenuIntent::Close);
        }
        false
    }

    pub fn on_key<H: Host>(&mut self, host: &mut H, key: &str) {
        if key == self.config.close_key {
            self.apply(host, MenuIntent::Close);
        }
    }

    fn apply<H: Host>(&mut self, host: &mut H, intent: MenuIntent) {
        let before = self.state;
        self.state = MenuReducer::reduce(self.state, intent);
        if before == self.state {
            return;
        }

        let open = self.state.is_open();
        tracing::debug!(open, "Menu toggled");
        for element in [self.toggle, self.menu] {
            if open {
                host.add_class(element, &self.config.open_class);
            } else {
                host.remove_class(element, &self.config.open_class);
            }
        }
        host.set_attribute(self.toggle, "aria-expanded", if open { "true" } else { "false" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemElement, MemoryHost};

    fn attach() -> (MemoryHost, ElementId, ElementId, ElementId, MobileMenu) {
        let mut host = MemoryHost::new();
        let toggle = host.add(MemElement::new("button").with_class("nav-toggle"));
        let menu = host.add(MemElement::new("ul").with_class("nav-menu"));
        let link = host.add(
            MemElement::new("a")
                .with_class("nav-link")
                .with_attr("href", "#about")
                .inside(menu),
        );
        let mobile = MobileMenu::attach(&mut host, MenuConfig::default(), toggle, menu);
        (host, toggle, menu, link, mobile)
    }

    #[test]
    fn toggle_opens_and_closes() {
        let (mut host, toggle, menu, _, mut mobile) = attach();
        assert_eq!(host.element(toggle).attribute("aria-expanded"), Some("false"));

        assert!(mobile.on_click(&mut host, toggle));
        assert!(mobile.state().is_open());
        assert!(host.element(menu).has_class("active"));
        assert!(host.element(toggle).has_class("active"));
        assert_eq!(host.element(toggle).attribute("aria-expanded"), Some("true"));

        mobile.on_click(&mut host, toggle);
        assert!(!mobile.state().is_open());
        assert!(!host.element(menu).has_class("active"));
    }

    #[test]
    fn link_click_closes_without_claiming_event() {
        let (mut host, toggle, menu, link, mut mobile) = attach();
        mobile.on_click(&mut host, toggle);

        assert!(!mobile.on_click(&mut host, link));
        assert_eq!(mobile.state(), MenuState::Closed);
        assert!(!host.element(menu).has_class("active"));
    }

    #[test]
    fn escape_closes() {
        let (mut host, toggle, _, _, mut mobile) = attach();
        mobile.on_click(&mut host, toggle);
        mobile.on_key(&mut host, "Enter");
        assert!(mobile.state().is_open());
        mobile.on_key(&mut host, "Escape");
        assert!(!mobile.state().is_open());
    }
}
