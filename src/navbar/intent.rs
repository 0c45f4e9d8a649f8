use crate::mvi::Intent;

#[derive(Debug, Clone, Copy)]
pub enum NavbarIntent {
    /// Re-evaluate visibility for the offset sampled on this frame.
    Recompute {
        offset: f64,
        dead_zone: f64,
        shadow_offset: f64,
    },
}

impl Intent for NavbarIntent {}
