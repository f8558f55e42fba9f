//! Fixed-duration animations with easing.
//!
//! A single deceleration family is enough for a paging carousel: every
//! transition runs for a fixed duration along an easing curve. [`Timing`] is
//! the pure curve; [`TimedValue`] drives a [`SharedValue`] with it.

use crate::shared::{SharedValue, SharedValueReader};

// =============================================================================
// Easing Functions
// =============================================================================

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end), the settle curve for released swipes
    EaseOut,
    /// Ease in and out (slow start and end), the jump curve
    EaseInOut,
    /// Cubic ease out
    CubicOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

// =============================================================================
// Timing - eased interpolation over a fixed duration
// =============================================================================

/// An easing-based interpolation from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Elapsed time
    pub elapsed: f64,
    /// Easing function
    pub easing: Easing,
}

impl Timing {
    /// Create new timing.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    /// Set easing function.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Get current value. Lands exactly on `to` once complete.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }
}

// =============================================================================
// TimedValue - a SharedValue with an optional running Timing
// =============================================================================

/// A frame-synchronous value that is either at rest or running a [`Timing`].
///
/// Writing with [`TimedValue::set_immediate`] cancels a running animation,
/// the same way assigning a value mid-flight does in an animation runtime.
#[derive(Debug)]
pub struct TimedValue {
    value: SharedValue,
    timing: Option<Timing>,
}

impl TimedValue {
    /// Create a value at rest.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self {
            value: SharedValue::new(initial),
            timing: None,
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.value.get()
    }

    /// Read-only handle for presentation consumers.
    #[must_use]
    pub fn reader(&self) -> SharedValueReader {
        self.value.reader()
    }

    /// Jump to `value` with no animation.
    pub fn set_immediate(&mut self, value: f64) {
        self.timing = None;
        self.value.set(value);
    }

    /// Start animating from the current value to `target`.
    pub fn animate_to(&mut self, target: f64, duration: f64, easing: Easing) {
        let timing = Timing::new(self.value.get(), target, duration).with_easing(easing);
        if timing.is_complete() {
            self.set_immediate(target);
        } else {
            self.timing = Some(timing);
        }
    }

    /// Whether an animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.timing.is_some()
    }

    /// Target of the running animation, or the resting value.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.timing.as_ref().map_or_else(|| self.get(), |t| t.to)
    }

    /// Advance the running animation. Returns true if an animation finished
    /// during this step.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(timing) = self.timing.as_mut() else {
            return false;
        };
        timing.update(dt);
        self.value.set(timing.value());
        if timing.is_complete() {
            self.timing = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicOut,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-12, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?}");
        }
    }

    #[test]
    fn test_ease_out_is_ahead_of_linear() {
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_timing_lands_exactly_on_target() {
        let mut t = Timing::new(-320.0, -300.0, 0.3).with_easing(Easing::EaseOut);
        t.update(0.1);
        assert!(t.value() > -320.0 && t.value() < -300.0);
        t.update(0.5);
        assert!(t.is_complete());
        assert_eq!(t.value(), -300.0);
    }

    #[test]
    fn test_timing_zero_duration_is_complete() {
        let t = Timing::new(0.0, 5.0, 0.0);
        assert!(t.is_complete());
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.value(), 5.0);
    }

    #[test]
    fn test_timing_ignores_bad_dt() {
        let mut t = Timing::new(0.0, 1.0, 1.0);
        t.update(f64::NAN);
        t.update(-1.0);
        assert_eq!(t.elapsed, 0.0);
    }

    #[test]
    fn test_timed_value_tick_reports_completion_once() {
        let mut v = TimedValue::new(0.0);
        v.animate_to(-900.0, 0.3, Easing::EaseInOut);
        assert!(v.is_animating());
        assert_eq!(v.target(), -900.0);
        assert!(!v.tick(0.1));
        assert!(v.tick(0.25));
        assert_eq!(v.get(), -900.0);
        assert!(!v.tick(0.1));
    }

    #[test]
    fn test_set_immediate_cancels_animation() {
        let mut v = TimedValue::new(0.0);
        v.animate_to(10.0, 1.0, Easing::Linear);
        v.tick(0.5);
        v.set_immediate(-600.0);
        assert!(!v.is_animating());
        assert!(!v.tick(1.0));
        assert_eq!(v.get(), -600.0);
    }

    #[test]
    fn test_reader_tracks_animation() {
        let mut v = TimedValue::new(0.0);
        let reader = v.reader();
        v.animate_to(1.0, 1.0, Easing::Linear);
        v.tick(0.25);
        assert!((reader.get() - 0.25).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_timing_stays_between_endpoints(
            from in -2000.0f64..2000.0,
            to in -2000.0f64..2000.0,
            steps in proptest::collection::vec(0.0f64..0.2, 1..20),
        ) {
            let mut t = Timing::new(from, to, 0.3).with_easing(Easing::EaseOut);
            let (lo, hi) = if from < to { (from, to) } else { (to, from) };
            for dt in steps {
                t.update(dt);
                let v = t.value();
                prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
            }
        }
    }
}
