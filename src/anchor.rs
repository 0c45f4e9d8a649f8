//! Smooth scrolling for in-page anchors.

use crate::config::AnchorConfig;
use crate::host::{ElementId, Host, MotionPreference, ScrollBehavior};

pub struct AnchorScroller {
    anchors: Vec<ElementId>,
    behavior: ScrollBehavior,
}

impl AnchorScroller {
    pub fn attach<H: Host>(host: &mut H, config: &AnchorConfig, motion: MotionPreference) -> Self {
        let behavior = if motion.is_reduced() {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        };
        Self {
            anchors: host.query_all(&config.selector),
            behavior,
        }
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Scrolls to the anchor's destination. Returns `true` when the default
    /// navigation should be suppressed; a bare `#` or a fragment with no
    /// matching element is left to the browser.
    pub fn on_click<H: Host>(&self, host: &mut H, target: ElementId) -> bool {
        if !self.anchors.contains(&target) {
            return false;
        }
        let Some(href) = host.attribute(target, "href") else {
            return false;
        };
        let Some(fragment) = href.strip_prefix('#').filter(|f| !f.is_empty()) else {
            return false;
        };
        let Some(destination) = host.query(&format!("#{}", fragment)) else {
            tracing::debug!("Anchor target #{} not found", fragment);
            return false;
        };

        host.scroll_into_view(destination, self.behavior);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemElement, MemoryHost};

    #[test]
    fn scrolls_to_existing_fragment() {
        let mut host = MemoryHost::new();
        let link = host.add(MemElement::new("a").with_attr("href", "#work"));
        let work = host.add(MemElement::new("section").with_id("work").at(1800.0, 500.0));
        let scroller = AnchorScroller::attach(&mut host, &AnchorConfig::default(), MotionPreference::Full);

        assert!(scroller.on_click(&mut host, link));
        assert_eq!(host.scrolled_into_view(), &[(work, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn reduced_motion_jumps() {
        let mut host = MemoryHost::new();
        let link = host.add(MemElement::new("a").with_attr("href", "#work"));
        let work = host.add(MemElement::new("section").with_id("work"));
        let scroller =
            AnchorScroller::attach(&mut host, &AnchorConfig::default(), MotionPreference::Reduced);

        scroller.on_click(&mut host, link);
        assert_eq!(host.scrolled_into_view(), &[(work, ScrollBehavior::Instant)]);
    }

    #[test]
    fn bare_hash_and_missing_target_keep_default() {
        let mut host = MemoryHost::new();
        let top = host.add(MemElement::new("a").with_attr("href", "#"));
        let dangling = host.add(MemElement::new("a").with_attr("href", "#nowhere"));
        let external = host.add(MemElement::new("a").with_attr("href", "https://example.com"));
        let scroller = AnchorScroller::attach(&mut host, &AnchorConfig::default(), MotionPreference::Full);

        assert_eq!(scroller.len(), 2);
        assert!(!scroller.on_click(&mut host, top));
        assert!(!scroller.on_click(&mut host, dangling));
        assert!(!scroller.on_click(&mut host, external));
        assert!(host.scrolled_into_view().is_empty());
    }
}
