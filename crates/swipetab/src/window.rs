//! Route windows and scene mount policy.

use crate::config::RenderMode;
use std::collections::BTreeSet;

/// Inclusive range of route indices eligible for mounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteWindow {
    /// Smallest index in the window
    pub min: usize,
    /// Largest index in the window
    pub max: usize,
}

impl RouteWindow {
    /// Whether `index` lies inside the window.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.min && index <= self.max
    }
}

/// Window of `radius` routes on each side of `current`, clamped to the route
/// range. `None` when there are no routes.
#[must_use]
pub fn compute_window(current: usize, route_count: usize, radius: usize) -> Option<RouteWindow> {
    let last = route_count.checked_sub(1)?;
    let current = current.min(last);
    Some(RouteWindow {
        min: current.saturating_sub(radius),
        max: current.saturating_add(radius).min(last),
    })
}

/// Decides which scenes are mounted and when their content appears.
///
/// In lazy mode the visited set only grows. A scene other than the initial
/// one mounts its container as soon as it is visited but renders content
/// only after the next [`ScenePolicy::promote_pending`], so the transition
/// toward it starts before its content is built.
#[derive(Debug, Clone)]
pub struct ScenePolicy {
    mode: RenderMode,
    radius: usize,
    visited: BTreeSet<usize>,
    pending: BTreeSet<usize>,
}

impl ScenePolicy {
    /// Create a policy whose initial scene is `initial_index`.
    #[must_use]
    pub fn new(mode: RenderMode, radius: usize, initial_index: usize) -> Self {
        Self {
            mode,
            radius,
            visited: BTreeSet::from([initial_index]),
            pending: BTreeSet::new(),
        }
    }

    /// The render mode.
    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Record that `index` became current.
    pub fn mark_visited(&mut self, index: usize) {
        if self.visited.insert(index) && self.mode == RenderMode::Lazy {
            self.pending.insert(index);
        }
    }

    /// Whether the scene at `index` is mounted.
    #[must_use]
    pub fn should_render(
        &self,
        index: usize,
        current: usize,
        previous: usize,
        route_count: usize,
    ) -> bool {
        if index >= route_count {
            return false;
        }
        match self.mode {
            RenderMode::Normal => true,
            RenderMode::Windowed => {
                index == previous
                    || compute_window(current, route_count, self.radius)
                        .is_some_and(|w| w.contains(index))
            }
            RenderMode::Lazy => self.visited.contains(&index),
        }
    }

    /// Whether a mounted scene should render its content this frame.
    #[must_use]
    pub fn is_content_ready(&self, index: usize) -> bool {
        !self.pending.contains(&index)
    }

    /// Make deferred content ready. Returns true if anything changed.
    pub fn promote_pending(&mut self) -> bool {
        let changed = !self.pending.is_empty();
        self.pending.clear();
        changed
    }

    /// Visited indices in ascending order.
    pub fn visited(&self) -> impl Iterator<Item = usize> + '_ {
        self.visited.iter().copied()
    }
}
