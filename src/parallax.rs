//! Hero parallax.

use crate::config::ParallaxConfig;
use crate::host::{ElementId, Host};

pub struct Parallax {
    hero: ElementId,
    factor: f64,
}

impl Parallax {
    pub fn new(config: &ParallaxConfig, hero: ElementId) -> Self {
        Self {
            hero,
            factor: config.factor,
        }
    }

    pub fn apply<H: Host>(&self, host: &mut H, offset: f64) {
        let shift = offset.max(0.0) * self.factor;
        host.set_style(self.hero, "transform", &format!("translateY({}px)", shift));
    }
}
