//! Marks the nav link of the section currently under the scroll position.

use crate::config::ActiveLinkConfig;
use crate::host::{ElementId, Host};

pub struct ActiveLinkTracker {
    config: ActiveLinkConfig,
    sections: Vec<ElementId>,
    links: Vec<ElementId>,
    current: Option<String>,
}

impl ActiveLinkTracker {
    pub fn attach<H: Host>(host: &mut H, config: ActiveLinkConfig) -> Self {
        let sections = host.query_all(&config.section_selector);
        let links = host.query_all(&config.link_selector);
        Self {
            config,
            sections,
            links,
            current: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() || self.links.is_empty()
    }

    /// Id of the current section.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn update<H: Host>(&mut self, host: &mut H, offset: f64) {
        if self.is_empty() {
            return;
        }

        // Sections are in document order; the last one started wins.
        let current = self
            .sections
            .iter()
            .filter(|&&section| offset >= host.offset_top(section) - self.config.lead_offset)
            .filter_map(|&section| host.attribute(section, "id"))
            .last();
        if current == self.current {
            return;
        }

        for &link in &self.links {
            host.remove_class(link, &self.config.active_class);
            let matches = match (&current, host.attribute(link, "href")) {
                (Some(id), Some(href)) => href.contains(id.as_str()),
                _ => false,
            };
            if matches {
                host.add_class(link, &self.config.active_class);
            }
        }
        tracing::debug!(section = ?current, "Active section changed");
        self.current = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemElement, MemoryHost};

    fn page() -> (MemoryHost, [ElementId; 2], ActiveLinkTracker) {
        let mut host = MemoryHost::new();
        for (id, top) in [("about", 800.0), ("work", 1600.0)] {
            host.add(
                MemElement::new("section")
                    .with_id(id)
                    .with_class("section")
                    .at(top, 800.0),
            );
        }
        let about = host.add(MemElement::new("a").with_class("nav-link").with_attr("href", "#about"));
        let work = host.add(MemElement::new("a").with_class("nav-link").with_attr("href", "#work"));
        let tracker = ActiveLinkTracker::attach(&mut host, ActiveLinkConfig::default());
        (host, [about, work], tracker)
    }

    #[test]
    fn no_section_reached_leaves_links_inactive() {
        let (mut host, [about, work], mut tracker) = page();
        tracker.update(&mut host, 100.0);
        assert_eq!(tracker.current(), None);
        assert!(!host.element(about).has_class("active"));
        assert!(!host.element(work).has_class("active"));
    }

    #[test]
    fn section_becomes_current_before_reaching_top() {
        let (mut host, [about, work], mut tracker) = page();
        tracker.update(&mut host, 600.0);
        assert_eq!(tracker.current(), Some("about"));
        assert!(host.element(about).has_class("active"));

        tracker.update(&mut host, 1400.0);
        assert_eq!(tracker.current(), Some("work"));
        assert!(!host.element(about).has_class("active"));
        assert!(host.element(work).has_class("active"));
    }

    #[test]
    fn scrolling_back_to_top_clears_active() {
        let (mut host, [about, _], mut tracker) = page();
        tracker.update(&mut host, 700.0);
        tracker.update(&mut host, 0.0);
        assert_eq!(tracker.current(), None);
        assert!(!host.element(about).has_class("active"));
    }
}
