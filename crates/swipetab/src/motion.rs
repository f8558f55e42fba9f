//! Carousel track geometry and the frame-synchronous values that move it.

use swipetab_core::{Easing, SharedValue, SharedValueReader, TimedValue};

/// Geometry of the scene track: viewport width and number of routes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    /// Viewport width in pixels
    pub width: f64,
    /// Number of routes
    pub route_count: usize,
}

impl Track {
    /// Create a track. Negative or non-finite widths are treated as 0.
    #[must_use]
    pub fn new(width: f64, route_count: usize) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        Self { width, route_count }
    }

    /// Whether the viewport has been measured.
    #[must_use]
    pub fn has_width(&self) -> bool {
        self.width > 0.0
    }

    /// Largest valid route index.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.route_count.saturating_sub(1)
    }

    /// Translation that shows route `index`.
    #[must_use]
    pub fn translation_for(&self, index: usize) -> f64 {
        -(index as f64) * self.width
    }

    /// Clamp a translation to `[-(count - 1) * width, 0]`.
    #[must_use]
    pub fn clamp_translation(&self, translation: f64) -> f64 {
        translation.clamp(self.translation_for(self.last_index()), 0.0)
    }

    /// Route position for a translation. With no width there is no visible
    /// offset, so the position is `fallback`.
    #[must_use]
    pub fn position_for(&self, translation: f64, fallback: usize) -> f64 {
        if self.has_width() {
            -translation / self.width
        } else {
            fallback as f64
        }
    }
}

/// The carousel's three shared values.
///
/// `translation` moves every scene container in lockstep, `position` is the
/// continuous route index presentation reads, and `previous_offset` shifts
/// only the previous route's container during a staged jump.
#[derive(Debug)]
pub struct CarouselMotion {
    translation: TimedValue,
    position: TimedValue,
    previous_offset: SharedValue,
}

impl CarouselMotion {
    /// Values at rest on route `index`.
    #[must_use]
    pub fn at_rest(track: Track, index: usize) -> Self {
        Self {
            translation: TimedValue::new(track.translation_for(index)),
            position: TimedValue::new(index as f64),
            previous_offset: SharedValue::new(0.0),
        }
    }

    /// Current translation.
    #[must_use]
    pub fn translation(&self) -> f64 {
        self.translation.get()
    }

    /// Current route position.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position.get()
    }

    /// Current previous-route offset.
    #[must_use]
    pub fn previous_offset(&self) -> f64 {
        self.previous_offset.get()
    }

    /// Reader for the translation.
    #[must_use]
    pub fn translation_reader(&self) -> SharedValueReader {
        self.translation.reader()
    }

    /// Reader for the route position.
    #[must_use]
    pub fn position_reader(&self) -> SharedValueReader {
        self.position.reader()
    }

    /// Reader for the previous-route offset.
    #[must_use]
    pub fn previous_offset_reader(&self) -> SharedValueReader {
        self.previous_offset.reader()
    }

    /// Write a finger-tracking translation and derive the position from it.
    /// Cancels running animations.
    pub fn drag_to(&mut self, track: Track, translation: f64, fallback: usize) {
        self.translation.set_immediate(translation);
        self.position
            .set_immediate(track.position_for(translation, fallback));
    }

    /// Place the translation without animation, leaving the position alone.
    pub fn stage_translation(&mut self, translation: f64) {
        self.translation.set_immediate(translation);
    }

    /// Set the previous-route offset.
    pub fn set_previous_offset(&self, offset: f64) {
        self.previous_offset.set(offset);
    }

    /// Snap both values to route `index`.
    pub fn rest_at(&mut self, track: Track, index: usize) {
        self.translation.set_immediate(track.translation_for(index));
        self.position.set_immediate(index as f64);
    }

    /// Animate both values to route `index`.
    pub fn animate_to(&mut self, track: Track, index: usize, duration: f64, easing: Easing) {
        self.translation
            .animate_to(track.translation_for(index), duration, easing);
        self.position.animate_to(index as f64, duration, easing);
    }

    /// Whether either value is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.translation.is_animating() || self.position.is_animating()
    }

    /// Advance running animations. Returns true if the last running animation
    /// finished during this step.
    pub fn tick(&mut self, dt: f64) -> bool {
        let was_animating = self.is_animating();
        self.translation.tick(dt);
        self.position.tick(dt);
        was_animating && !self.is_animating()
    }
}
