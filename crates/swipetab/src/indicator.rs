//! Tab indicator placement.

use crate::layout::TabLayoutRegistry;

/// Horizontal placement of the indicator within the tab strip's content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorGeometry {
    /// Left edge, in content coordinates
    pub x: f32,
    /// Width
    pub width: f32,
}

/// Follows the route position across the measured tab offsets.
#[derive(Debug, Clone)]
pub struct TabIndicator {
    registry: TabLayoutRegistry,
}

impl TabIndicator {
    /// Create an indicator reading from `registry`.
    #[must_use]
    pub const fn new(registry: TabLayoutRegistry) -> Self {
        Self { registry }
    }

    /// Placement for a continuous route position. Between two tabs both the
    /// left edge and the width are interpolated linearly. Returns `None` when
    /// there are no tabs.
    #[must_use]
    pub fn geometry(&self, position: f64) -> Option<IndicatorGeometry> {
        let last = self.registry.route_count().checked_sub(1)?;
        let position = if position.is_finite() {
            position.clamp(0.0, last as f64)
        } else {
            0.0
        };
        let floor = position.floor() as usize;
        let ceil = position.ceil() as usize;
        let fraction = (position - position.floor()) as f32;

        let offset = |i: usize| self.registry.offset(i).unwrap_or(0.0);
        let span = |i: usize| offset(i + 1) - offset(i);

        Some(IndicatorGeometry {
            x: lerp(offset(floor), offset(ceil), fraction),
            width: lerp(span(floor), span(ceil), fraction),
        })
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    (to - from).mul_add(t, from)
}
