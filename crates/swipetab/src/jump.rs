//! Programmatic jumps between routes.
//!
//! A jump to a distant tab does not fly over every tab in between. With
//! smooth jumps enabled, the track is first placed discontinuously on the
//! neighbor of the target (the staging route) while the departing scene is
//! held in place by the previous-route offset, then both slide one viewport.

use crate::motion::{CarouselMotion, Track};
use crate::route::NavigationState;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use swipetab_core::Easing;
use thiserror::Error;

/// Why a jump request was dropped. Never surfaced to the host; used for
/// diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JumpRejection {
    /// No route has the key.
    #[error("no route with key {0:?}")]
    UnknownKey(String),
    /// The route is already current.
    #[error("route {0} is already current")]
    AlreadyCurrent(usize),
    /// Another jump has not finished.
    #[error("a jump is already in progress")]
    JumpInProgress,
    /// A finger is dragging the carousel.
    #[error("a swipe is in progress")]
    SwipeInProgress,
}

/// A started jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpPlan {
    /// Index the jump leaves
    pub from: usize,
    /// Index the jump lands on
    pub to: usize,
    /// Route the track was staged on, for smooth jumps over more than one
    /// route
    pub staging: Option<usize>,
}

/// Programmatic jump controller.
#[derive(Debug, Clone, Default)]
pub struct JumpController {
    smooth: bool,
    target: Option<usize>,
}

impl JumpController {
    /// Create a controller.
    #[must_use]
    pub const fn new(smooth: bool) -> Self {
        Self {
            smooth,
            target: None,
        }
    }

    /// Whether a jump is in progress.
    #[must_use]
    pub const fn is_jumping(&self) -> bool {
        self.target.is_some()
    }

    /// In-flight jump target.
    #[must_use]
    pub const fn target(&self) -> Option<usize> {
        self.target
    }

    /// Resolve `key` to a jump target, or say why not. A resolved key is
    /// always in range since it indexes the current route list.
    pub fn validate(
        &self,
        navigation: &NavigationState,
        key: &str,
        current: usize,
        dragging: bool,
    ) -> Result<usize, JumpRejection> {
        let index = navigation
            .index_of(key)
            .ok_or_else(|| JumpRejection::UnknownKey(key.to_string()))?;
        if index == current {
            return Err(JumpRejection::AlreadyCurrent(index));
        }
        if self.is_jumping() {
            return Err(JumpRejection::JumpInProgress);
        }
        if dragging {
            return Err(JumpRejection::SwipeInProgress);
        }
        Ok(index)
    }

    /// Start a jump from `current` to `target`. The caller commits the new
    /// index; [`JumpController::finish`] must run once `duration` has elapsed.
    pub fn start(
        &mut self,
        motion: &mut CarouselMotion,
        track: Track,
        current: usize,
        target: usize,
        duration: f64,
    ) -> JumpPlan {
        self.target = Some(target);

        let staging = (self.smooth && current.abs_diff(target) > 1).then(|| {
            let staging = if target > current { target - 1 } else { target + 1 };
            motion.stage_translation(track.translation_for(staging));
            motion.set_previous_offset((staging as f64 - current as f64) * track.width);
            staging
        });

        motion.animate_to(track, target, duration, Easing::EaseInOut);
        let plan = JumpPlan {
            from: current,
            to: target,
            staging,
        };
        tracing::debug!(?plan, "jump started");
        plan
    }

    /// Complete the in-flight jump: clear the target and the previous-route
    /// offset. Returns the target that finished.
    pub fn finish(&mut self, motion: &CarouselMotion) -> Option<usize> {
        let target = self.target.take()?;
        motion.set_previous_offset(0.0);
        tracing::debug!(target, "jump finished");
        Some(target)
    }
}

/// Cloneable handle for requesting jumps by route key.
///
/// Handed to scene renderers and tab bars. Requests are queued and applied by
/// the carousel on its next event or frame; invalid ones are dropped then.
#[derive(Debug, Clone, Default)]
pub struct JumpHandle {
    queue: Arc<Mutex<VecDeque<String>>>,
}

impl JumpHandle {
    /// Create a handle with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a jump to the route with `key`.
    pub fn jump_to(&self, key: impl Into<String>) {
        self.queue.lock().push_back(key.into());
    }

    /// Number of queued requests.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Take every queued request, oldest first.
    pub(crate) fn drain(&self) -> Vec<String> {
        self.queue.lock().drain(..).collect()
    }
}
