//! Keeps the focused tab centered in a scrollable tab strip.

use crate::error::ScrollToIndexError;
use crate::layout::TabLayoutRegistry;

/// Fires when an observed value differs from the last observation, including
/// the very first observation.
#[derive(Debug, Clone, Default)]
pub struct ChangeListener<T> {
    last: Option<T>,
}

impl<T: PartialEq + Clone> ChangeListener<T> {
    /// Create a listener that has observed nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Observe `value`. Returns true if it changed.
    pub fn observe(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }

    /// Forget the last observation so the next one fires.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// A horizontally scrollable strip of tabs.
pub trait TabScroller {
    /// Scroll so tab `index` starts `view_offset` pixels from the viewport's
    /// left edge.
    fn scroll_to_index(&mut self, index: usize, view_offset: f32)
        -> Result<(), ScrollToIndexError>;

    /// Scroll to an absolute content offset.
    fn scroll_to_offset(&mut self, offset: f32);
}

/// Which path an auto-scroll took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPath {
    /// Scrolled by index
    Index,
    /// Index scrolling failed; scrolled by computed offset
    OffsetFallback,
}

/// Auto-scroll controller for the tab strip.
#[derive(Debug, Clone)]
pub struct AutoScrollController {
    registry: TabLayoutRegistry,
    listener: ChangeListener<usize>,
}

impl AutoScrollController {
    /// Create a controller reading tab widths from `registry`.
    #[must_use]
    pub fn new(registry: TabLayoutRegistry) -> Self {
        Self {
            registry,
            listener: ChangeListener::new(),
        }
    }

    /// Distance from the viewport's left edge at which tab `index` must start
    /// to be centered.
    #[must_use]
    pub fn view_offset(&self, index: usize, viewport_width: f32) -> f32 {
        let width = self.registry.width(index).unwrap_or(0.0);
        viewport_width / 2.0 - width / 2.0
    }

    /// React to the committed index. Scrolls only when it changed since the
    /// last call (or on the first call).
    pub fn on_index(
        &mut self,
        scroller: &mut dyn TabScroller,
        index: usize,
        viewport_width: f32,
    ) -> Option<ScrollPath> {
        if !self.listener.observe(&index) {
            return None;
        }
        Some(self.scroll_to(scroller, index, viewport_width))
    }

    /// Forget the last index so the next call scrolls again, e.g. after the
    /// viewport was resized.
    pub fn reset(&mut self) {
        self.listener.reset();
    }

    /// Center tab `index`, falling back to offset scrolling when the strip
    /// cannot resolve the index.
    pub fn scroll_to(
        &self,
        scroller: &mut dyn TabScroller,
        index: usize,
        viewport_width: f32,
    ) -> ScrollPath {
        let view_offset = self.view_offset(index, viewport_width);
        match scroller.scroll_to_index(index, view_offset) {
            Ok(()) => ScrollPath::Index,
            Err(err) => {
                let offset = self.registry.offset(index).unwrap_or(0.0) - view_offset;
                tracing::debug!(%err, offset, "falling back to offset scroll");
                scroller.scroll_to_offset(offset);
                ScrollPath::OffsetFallback
            }
        }
    }
}
