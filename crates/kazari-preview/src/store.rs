//! Shared, mutable beautification parameters.
//!
//! The store is the single place parameter edits land. Renders never
//! read it directly; the controller takes a [`snapshot`] at render
//! start so an in-flight render sees one consistent set of values no
//! matter how the user keeps editing.
//!
//! [`snapshot`]: ParameterStore::snapshot

use std::sync::{Mutex, MutexGuard, PoisonError};

use kazari_pipeline::{BeautifierOptions, GradientSpec};

/// Thread-safe holder of the current [`BeautifierOptions`].
///
/// Setters update one field at a time; none of them trigger a render.
/// Callers decide when to ask the controller for a preview update.
#[derive(Debug)]
pub struct ParameterStore {
    options: Mutex<BeautifierOptions>,
}

impl ParameterStore {
    /// Create a store with the given initial options.
    #[must_use]
    pub fn new(options: BeautifierOptions) -> Self {
        Self {
            options: Mutex::new(options),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BeautifierOptions> {
        // The options value is plain data; a panic mid-update cannot
        // leave it torn, so a poisoned lock is still usable.
        self.options.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A consistent copy of the current options.
    #[must_use]
    pub fn snapshot(&self) -> BeautifierOptions {
        self.lock().clone()
    }

    /// Replace all options at once.
    pub fn replace(&self, options: BeautifierOptions) {
        *self.lock() = options;
    }

    /// Current margin in pixels.
    #[must_use]
    pub fn margin(&self) -> u32 {
        self.lock().margin
    }

    /// Set the margin in pixels.
    pub fn set_margin(&self, margin: u32) {
        self.lock().margin = margin;
    }

    /// Current padding in pixels.
    #[must_use]
    pub fn padding(&self) -> u32 {
        self.lock().padding
    }

    /// Set the padding in pixels.
    pub fn set_padding(&self, padding: u32) {
        self.lock().padding = padding;
    }

    /// Whether smart padding is enabled.
    #[must_use]
    pub fn smart_padding(&self) -> bool {
        self.lock().smart_padding
    }

    /// Enable or disable smart padding.
    pub fn set_smart_padding(&self, enabled: bool) {
        self.lock().smart_padding = enabled;
    }

    /// Current rounded corner radius in pixels.
    #[must_use]
    pub fn rounded_corner(&self) -> u32 {
        self.lock().rounded_corner
    }

    /// Set the rounded corner radius in pixels.
    pub fn set_rounded_corner(&self, radius: u32) {
        self.lock().rounded_corner = radius;
    }

    /// Current shadow blur radius in pixels.
    #[must_use]
    pub fn shadow_size(&self) -> u32 {
        self.lock().shadow_size
    }

    /// Set the shadow blur radius in pixels.
    pub fn set_shadow_size(&self, size: u32) {
        self.lock().shadow_size = size;
    }

    /// Current background gradient, if any.
    #[must_use]
    pub fn background(&self) -> Option<GradientSpec> {
        self.lock().background.clone()
    }

    /// Set or clear the background gradient.
    pub fn set_background(&self, background: Option<GradientSpec>) {
        self.lock().background = background;
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(BeautifierOptions::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use kazari_pipeline::{Color, GradientDirection};

    #[test]
    fn setters_are_visible_through_getters() {
        let store = ParameterStore::new(BeautifierOptions::disabled());
        store.set_margin(12);
        store.set_padding(34);
        store.set_smart_padding(true);
        store.set_rounded_corner(5);
        store.set_shadow_size(9);
        assert_eq!(store.margin(), 12);
        assert_eq!(store.padding(), 34);
        assert!(store.smart_padding());
        assert_eq!(store.rounded_corner(), 5);
        assert_eq!(store.shadow_size(), 9);
    }

    #[test]
    fn snapshot_is_isolated_from_later_edits() {
        let store = ParameterStore::new(BeautifierOptions::disabled());
        store.set_margin(10);
        let snapshot = store.snapshot();
        store.set_margin(99);
        assert_eq!(snapshot.margin, 10);
        assert_eq!(store.margin(), 99);
    }

    #[test]
    fn background_can_be_set_and_cleared() {
        let store = ParameterStore::default();
        let gradient = GradientSpec::two_point(
            GradientDirection::Horizontal,
            Color::BLACK,
            Color::WHITE,
        );
        store.set_background(Some(gradient.clone()));
        assert_eq!(store.background(), Some(gradient));
        store.set_background(None);
        assert_eq!(store.background(), None);
    }

    #[test]
    fn replace_swaps_every_field() {
        let store = ParameterStore::default();
        store.replace(BeautifierOptions::disabled());
        assert_eq!(store.snapshot(), BeautifierOptions::disabled());
    }
}
