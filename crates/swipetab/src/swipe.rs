//! Swipe gesture controller.
//!
//! Turns a horizontal pan into carousel motion. While dragging, the
//! translation tracks the finger, bounded to one viewport of travel from
//! where the drag began and to the route range. On release it either snaps
//! back or advances exactly one route, never more, regardless of distance or
//! velocity.

use crate::motion::{CarouselMotion, Track};
use swipetab_core::Easing;

/// Phase of the swipe state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipePhase {
    /// No gesture
    #[default]
    Idle,
    /// Finger down, translation tracks it
    Dragging,
    /// Released, settle animation running
    Settling,
}

/// How a released swipe resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Returned to the index the drag started on. Not an index change.
    SnapBack {
        /// Index settled on
        index: usize,
    },
    /// Moved one route.
    Advance {
        /// Index the drag started on
        from: usize,
        /// Newly committed index
        to: usize,
    },
}

/// Swipe gesture controller.
#[derive(Debug, Clone, Default)]
pub struct SwipeController {
    phase: SwipePhase,
    baseline: f64,
    start_index: usize,
    last_translation_x: f64,
}

impl SwipeController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SwipePhase {
        self.phase
    }

    /// Whether a finger is down.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == SwipePhase::Dragging
    }

    /// Start a drag from route `current`. The baseline is wherever the
    /// carousel is right now, so a drag can interrupt a running settle.
    pub fn begin(&mut self, motion: &mut CarouselMotion, track: Track, current: usize) {
        self.baseline = motion.translation();
        self.start_index = current;
        self.last_translation_x = 0.0;
        self.phase = SwipePhase::Dragging;
        motion.drag_to(track, self.baseline, current);
        tracing::debug!(current, baseline = self.baseline, "swipe started");
    }

    /// Follow the finger. `translation_x` is the displacement from where the
    /// touch went down.
    pub fn update(&mut self, motion: &mut CarouselMotion, track: Track, translation_x: f64) {
        if self.phase != SwipePhase::Dragging {
            return;
        }
        let translation_x = finite_or_zero(translation_x);
        self.last_translation_x = translation_x;
        let bounded = translation_x.clamp(-track.width, track.width);
        let translation = track.clamp_translation(self.baseline + bounded);
        motion.drag_to(track, translation, self.start_index);
        tracing::trace!(translation, position = motion.position(), "swipe moved");
    }

    /// Release the finger and start settling.
    ///
    /// The target predicted from position plus velocity decides between snap
    /// back and advance; the direction of the drag decides which neighbor.
    pub fn end(
        &mut self,
        motion: &mut CarouselMotion,
        track: Track,
        translation_x: f64,
        velocity_x: f64,
        duration: f64,
    ) -> Option<SwipeOutcome> {
        if self.phase != SwipePhase::Dragging {
            return None;
        }
        self.update(motion, track, translation_x);
        let translation_x = self.last_translation_x;
        let current = self.start_index;

        let predicted = if track.has_width() {
            (-(motion.translation() + finite_or_zero(velocity_x)) / track.width).round()
        } else {
            current as f64
        };

        let target = if predicted == current as f64 {
            current
        } else if translation_x > 0.0 {
            current.saturating_sub(1)
        } else {
            (current + 1).min(track.last_index())
        };

        motion.animate_to(track, target, duration, Easing::EaseOut);
        self.phase = SwipePhase::Settling;

        let outcome = if target == current {
            SwipeOutcome::SnapBack { index: current }
        } else {
            SwipeOutcome::Advance {
                from: current,
                to: target,
            }
        };
        tracing::debug!(?outcome, predicted, velocity_x, "swipe ended");
        Some(outcome)
    }

    /// The pointer was cancelled: resolve like a release with no velocity at
    /// the last reported translation.
    pub fn cancel(
        &mut self,
        motion: &mut CarouselMotion,
        track: Track,
        duration: f64,
    ) -> Option<SwipeOutcome> {
        let last = self.last_translation_x;
        self.end(motion, track, last, 0.0, duration)
    }

    /// The settle animation finished, or was superseded.
    pub fn settle_finished(&mut self) {
        if self.phase == SwipePhase::Settling {
            self.phase = SwipePhase::Idle;
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DURATION: f64 = 0.3;

    fn setup(index: usize) -> (SwipeController, CarouselMotion, Track) {
        let track = Track::new(300.0, 4);
        (SwipeController::new(), CarouselMotion::at_rest(track, index), track)
    }

    fn settle(motion: &mut CarouselMotion) {
        while motion.is_animating() {
            motion.tick(0.016);
        }
    }

    #[test]
    fn test_drag_tracks_finger() {
        let (mut swipe, mut motion, track) = setup(1);
        swipe.begin(&mut motion, track, 1);
        assert!(swipe.is_dragging());
        swipe.update(&mut motion, track, -75.0);
        assert_eq!(motion.translation(), -375.0);
        assert_eq!(motion.position(), 1.25);
    }

    #[test]
    fn test_displacement_bounded_to_one_viewport() {
        let (mut swipe, mut motion, track) = setup(1);
        swipe.begin(&mut motion, track, 1);
        swipe.update(&mut motion, track, -1000.0);
        assert_eq!(motion.translation(), -600.0);
        swipe.update(&mut motion, track, 1000.0);
        assert_eq!(motion.translation(), 0.0);
    }

    #[test]
    fn test_drag_clamped_at_route_range() {
        let (mut swipe, mut motion, track) = setup(0);
        swipe.begin(&mut motion, track, 0);
        swipe.update(&mut motion, track, 120.0);
        assert_eq!(motion.translation(), 0.0);

        let (mut swipe, mut motion, track) = setup(3);
        swipe.begin(&mut motion, track, 3);
        swipe.update(&mut motion, track, -120.0);
        assert_eq!(motion.translation(), -900.0);
    }

    #[test]
    fn test_far_fast_drag_advances_one() {
        let (mut swipe, mut motion, track) = setup(0);
        swipe.begin(&mut motion, track, 0);
        let outcome = swipe.end(&mut motion, track, -320.0, -50.0, DURATION);
        assert_eq!(outcome, Some(SwipeOutcome::Advance { from: 0, to: 1 }));
        assert_eq!(swipe.phase(), SwipePhase::Settling);
        settle(&mut motion);
        assert_eq!(motion.translation(), -300.0);
        assert_eq!(motion.position(), 1.0);
    }

    #[test]
    fn test_short_slow_drag_snaps_back() {
        let (mut swipe, mut motion, track) = setup(2);
        swipe.begin(&mut motion, track, 2);
        let outcome = swipe.end(&mut motion, track, 60.0, 10.0, DURATION);
        assert_eq!(outcome, Some(SwipeOutcome::SnapBack { index: 2 }));
        settle(&mut motion);
        assert_eq!(motion.translation(), -600.0);
        assert_eq!(motion.position(), 2.0);
    }

    #[test]
    fn test_flick_advances_despite_short_distance() {
        let (mut swipe, mut motion, track) = setup(2);
        swipe.begin(&mut motion, track, 2);
        let outcome = swipe.end(&mut motion, track, 30.0, 400.0, DURATION);
        assert_eq!(outcome, Some(SwipeOutcome::Advance { from: 2, to: 1 }));
    }

    #[test]
    fn test_edge_overscroll_snaps_back() {
        let (mut swipe, mut motion, track) = setup(0);
        swipe.begin(&mut motion, track, 0);
        let outcome = swipe.end(&mut motion, track, 200.0, 2000.0, DURATION);
        assert_eq!(outcome, Some(SwipeOutcome::SnapBack { index: 0 }));
    }

    #[test]
    fn test_cancel_uses_last_translation() {
        let (mut swipe, mut motion, track) = setup(0);
        swipe.begin(&mut motion, track, 0);
        swipe.update(&mut motion, track, -250.0);
        let outcome = swipe.cancel(&mut motion, track, DURATION);
        assert_eq!(outcome, Some(SwipeOutcome::Advance { from: 0, to: 1 }));
    }

    #[test]
    fn test_end_without_begin_is_ignored() {
        let (mut swipe, mut motion, track) = setup(0);
        assert_eq!(swipe.end(&mut motion, track, -300.0, 0.0, DURATION), None);
        assert_eq!(motion.translation(), 0.0);
    }

    #[test]
    fn test_zero_width_snaps_back() {
        let track = Track::new(0.0, 4);
        let mut motion = CarouselMotion::at_rest(track, 1);
        let mut swipe = SwipeController::new();
        swipe.begin(&mut motion, track, 1);
        swipe.update(&mut motion, track, -40.0);
        assert_eq!(motion.position(), 1.0);
        let outcome = swipe.end(&mut motion, track, -40.0, f64::NAN, DURATION);
        assert_eq!(outcome, Some(SwipeOutcome::SnapBack { index: 1 }));
        assert!(motion.translation().is_finite());
    }

    #[test]
    fn test_drag_interrupts_settle() {
        let (mut swipe, mut motion, track) = setup(0);
        swipe.begin(&mut motion, track, 0);
        swipe.end(&mut motion, track, -200.0, 0.0, DURATION);
        motion.tick(0.1);
        let mid = motion.translation();
        swipe.begin(&mut motion, track, 1);
        assert!(!motion.is_animating());
        assert_eq!(motion.translation(), mid);
    }

    #[test]
    fn test_settle_finished_returns_to_idle() {
        let (mut swipe, mut motion, track) = setup(0);
        swipe.begin(&mut motion, track, 0);
        swipe.end(&mut motion, track, -10.0, 0.0, DURATION);
        swipe.settle_finished();
        assert_eq!(swipe.phase(), SwipePhase::Idle);
    }

    proptest! {
        #[test]
        fn prop_release_moves_at_most_one(
            start in 0usize..4,
            moves in proptest::collection::vec(-2000.0f64..2000.0, 1..10),
            velocity in -5000.0f64..5000.0,
        ) {
            let (mut swipe, mut motion, track) = setup(start);
            swipe.begin(&mut motion, track, start);
            for m in &moves {
                swipe.update(&mut motion, track, *m);
                let t = motion.translation();
                prop_assert!((-900.0..=0.0).contains(&t));
            }
            let last = *moves.last().unwrap();
            match swipe.end(&mut motion, track, last, velocity, DURATION).unwrap() {
                SwipeOutcome::SnapBack { index } => prop_assert_eq!(index, start),
                SwipeOutcome::Advance { from, to } => {
                    prop_assert_eq!(from, start);
                    prop_assert_eq!(from.abs_diff(to), 1);
                }
            }
        }

        #[test]
        fn prop_snap_back_lands_exactly(start in 0usize..4, dx in -100.0f64..100.0) {
            let (mut swipe, mut motion, track) = setup(start);
            swipe.begin(&mut motion, track, start);
            let outcome = swipe.end(&mut motion, track, dx, 0.0, DURATION);
            if let Some(SwipeOutcome::SnapBack { index }) = outcome {
                settle(&mut motion);
                prop_assert_eq!(motion.translation(), -(index as f64) * 300.0);
            }
        }
    }
}
