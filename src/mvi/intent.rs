//! Marker trait for page intents.

/// Something that happened on the page and may change a feature's state:
/// a scroll position sampled on a frame, an element entering the viewport,
/// a click on the menu toggle.
pub trait Intent: 'static {}
