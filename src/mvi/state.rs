//! Marker trait for feature state.

/// Feature state snapshot.
///
/// States are plain values (`Clone` to derive the next one, `PartialEq` so a
/// controller can skip host writes when nothing changed). Page state never
/// leaves the UI thread, so no `Send` bound is required.
pub trait UiState: Clone + PartialEq + Default + 'static {}
