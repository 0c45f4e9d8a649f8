use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::host::ObserverOptions;

/// Root configuration for a page.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub navbar: NavbarConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub anchor: AnchorConfig,
    #[serde(default)]
    pub active_link: ActiveLinkConfig,
    #[serde(default)]
    pub parallax: ParallaxConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Scroll-triggered reveal animations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Elements that animate in (default: ".section, .reveal").
    #[serde(default = "default_reveal_selector")]
    pub selector: String,
    /// Regions whose elements are shown on load without observation
    /// (default: ".hero", ".navbar").
    #[serde(default = "default_initial_regions")]
    pub initial_regions: Vec<String>,
    /// Class added when an element is revealed (default: "visible").
    #[serde(default = "default_revealed_class")]
    pub revealed_class: String,
    /// Fraction of the element that must be inside the viewport (default: 0.15).
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Fraction of the viewport cut off at the bottom edge (default: 0.05).
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: f64,
    /// Delay before the rendering hint is removed (default: 800).
    #[serde(default = "default_cleanup_delay_ms")]
    pub cleanup_delay_ms: u64,
    #[serde(default = "default_hint_property")]
    pub hint_property: String,
    #[serde(default = "default_hint_value")]
    pub hint_value: String,
}

/// Hide-on-scroll navigation bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavbarConfig {
    #[serde(default = "default_navbar_selector")]
    pub selector: String,
    /// Offset below which scrolling down never hides the bar (default: 80).
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f64,
    /// Offset above which the bar carries its shadow class (default: 50).
    #[serde(default = "default_shadow_offset")]
    pub shadow_offset: f64,
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,
    #[serde(default = "default_scrolled_class")]
    pub scrolled_class: String,
}

/// Collapsible mobile menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default = "default_toggle_selector")]
    pub toggle_selector: String,
    #[serde(default = "default_menu_selector")]
    pub menu_selector: String,
    #[serde(default = "default_nav_link_selector")]
    pub link_selector: String,
    #[serde(default = "default_active_class")]
    pub open_class: String,
    /// Key that closes an open menu (default: "Escape").
    #[serde(default = "default_close_key")]
    pub close_key: String,
}

/// Smooth scrolling for in-page anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorConfig {
    #[serde(default = "default_anchor_selector")]
    pub selector: String,
}

/// Highlighting of the nav link for the section under the scroll position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveLinkConfig {
    #[serde(default = "default_section_selector")]
    pub section_selector: String,
    #[serde(default = "default_nav_link_selector")]
    pub link_selector: String,
    /// A section becomes current this many pixels before its top edge
    /// reaches the top of the viewport (default: 200).
    #[serde(default = "default_lead_offset")]
    pub lead_offset: f64,
    #[serde(default = "default_active_class")]
    pub active_class: String,
}

/// Hero parallax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default = "default_hero_selector")]
    pub selector: String,
    /// Hero translation per scrolled pixel (default: 0.5).
    #[serde(default = "default_parallax_factor")]
    pub factor: f64,
}

/// Count-up animation of numeric stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Element whose visibility starts the counters (default: "#about").
    #[serde(default = "default_stats_trigger")]
    pub trigger_selector: String,
    #[serde(default = "default_counter_selector")]
    pub counter_selector: String,
    #[serde(default = "default_stats_threshold")]
    pub threshold: f64,
    /// Number of ticks from zero to the target (default: 50).
    #[serde(default = "default_stats_steps")]
    pub steps: u32,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl PageConfig {
    /// Selector for elements whose clicks are routed to the page: the menu
    /// toggle, the menu links and in-page anchors.
    pub fn click_selector(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for selector in [
            &self.menu.toggle_selector,
            &self.menu.link_selector,
            &self.anchor.selector,
        ] {
            let selector = selector.trim();
            if !parts.contains(&selector) {
                parts.push(selector);
            }
        }
        parts.join(", ")
    }
}

impl RevealConfig {
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions::new(self.threshold, self.bottom_margin)
    }

    pub fn cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.cleanup_delay_ms)
    }
}

impl StatsConfig {
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions::new(self.threshold, 0.0)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn default_reveal_selector() -> String {
    ".section, .reveal".to_string()
}

fn default_initial_regions() -> Vec<String> {
    vec![".hero".to_string(), ".navbar".to_string()]
}

fn default_revealed_class() -> String {
    "visible".to_string()
}

fn default_reveal_threshold() -> f64 {
    0.15
}

fn default_bottom_margin() -> f64 {
    0.05
}

fn default_cleanup_delay_ms() -> u64 {
    800
}

fn default_hint_property() -> String {
    "will-change".to_string()
}

fn default_hint_value() -> String {
    "opacity, transform".to_string()
}

fn default_navbar_selector() -> String {
    ".navbar".to_string()
}

fn default_dead_zone() -> f64 {
    80.0
}

fn default_shadow_offset() -> f64 {
    50.0
}

fn default_hidden_class() -> String {
    "navbar--hidden".to_string()
}

fn default_scrolled_class() -> String {
    "scrolled".to_string()
}

fn default_toggle_selector() -> String {
    ".nav-toggle".to_string()
}

fn default_menu_selector() -> String {
    ".nav-menu".to_string()
}

fn default_nav_link_selector() -> String {
    ".nav-link".to_string()
}

fn default_active_class() -> String {
    "active".to_string()
}

fn default_close_key() -> String {
    "Escape".to_string()
}

fn default_anchor_selector() -> String {
    r##"a[href^="#"]"##.to_string()
}

fn default_section_selector() -> String {
    ".section".to_string()
}

fn default_lead_offset() -> f64 {
    200.0
}

fn default_hero_selector() -> String {
    ".hero".to_string()
}

fn default_parallax_factor() -> f64 {
    0.5
}

fn default_stats_trigger() -> String {
    "#about".to_string()
}

fn default_counter_selector() -> String {
    ".stat-number".to_string()
}

fn default_stats_threshold() -> f64 {
    0.5
}

fn default_stats_steps() -> u32 {
    50
}

fn default_tick_ms() -> u64 {
    30
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: default_reveal_selector(),
            initial_regions: default_initial_regions(),
            revealed_class: default_revealed_class(),
            threshold: default_reveal_threshold(),
            bottom_margin: default_bottom_margin(),
            cleanup_delay_ms: default_cleanup_delay_ms(),
            hint_property: default_hint_property(),
            hint_value: default_hint_value(),
        }
    }
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: default_navbar_selector(),
            dead_zone: default_dead_zone(),
            shadow_offset: default_shadow_offset(),
            hidden_class: default_hidden_class(),
            scrolled_class: default_scrolled_class(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle_selector: default_toggle_selector(),
            menu_selector: default_menu_selector(),
            link_selector: default_nav_link_selector(),
            open_class: default_active_class(),
            close_key: default_close_key(),
        }
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            selector: default_anchor_selector(),
        }
    }
}

impl Default for ActiveLinkConfig {
    fn default() -> Self {
        Self {
            section_selector: default_section_selector(),
            link_selector: default_nav_link_selector(),
            lead_offset: default_lead_offset(),
            active_class: default_active_class(),
        }
    }
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            selector: default_hero_selector(),
            factor: default_parallax_factor(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            trigger_selector: default_stats_trigger(),
            counter_selector: default_counter_selector(),
            threshold: default_stats_threshold(),
            steps: default_stats_steps(),
            tick_ms: default_tick_ms(),
        }
    }
}
