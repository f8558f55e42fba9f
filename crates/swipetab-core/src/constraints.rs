//! Layout constraints for widgets.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Layout constraints that specify minimum and maximum sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Minimum width
    pub min_width: f32,
    /// Maximum width
    pub max_width: f32,
    /// Minimum height
    pub min_height: f32,
    /// Maximum height
    pub max_height: f32,
}

impl Constraints {
    /// Create new constraints.
    #[must_use]
    pub const fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Create tight constraints that allow only the exact size.
    #[must_use]
    pub const fn tight(size: Size) -> Self {
        Self::new(size.width, size.width, size.height, size.height)
    }

    /// Create loose constraints that allow any size up to the given maximum.
    #[must_use]
    pub const fn loose(size: Size) -> Self {
        Self::new(0.0, size.width, 0.0, size.height)
    }

    /// Constrain a size to fit within these constraints.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min_width, self.max_width.max(self.min_width)),
            size.height.clamp(self.min_height, self.max_height.max(self.min_height)),
        )
    }

    /// Get the biggest size that satisfies these constraints.
    ///
    /// Unbounded axes fall back to their minimum.
    #[must_use]
    pub fn biggest(&self) -> Size {
        Size::new(
            if self.max_width.is_finite() {
                self.max_width
            } else {
                self.min_width
            },
            if self.max_height.is_finite() {
                self.max_height
            } else {
                self.min_height
            },
        )
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new(0.0, f32::INFINITY, 0.0, f32::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain_clamps() {
        let c = Constraints::loose(Size::new(300.0, 48.0));
        assert_eq!(c.constrain(Size::new(500.0, 10.0)), Size::new(300.0, 10.0));
    }

    #[test]
    fn test_tight() {
        let c = Constraints::tight(Size::new(320.0, 640.0));
        assert_eq!(c.constrain(Size::ZERO), Size::new(320.0, 640.0));
    }

    #[test]
    fn test_biggest_unbounded_falls_back_to_min() {
        let c = Constraints::default();
        assert_eq!(c.biggest(), Size::ZERO);
        let c = Constraints::new(0.0, 300.0, 0.0, f32::INFINITY);
        assert_eq!(c.biggest(), Size::new(300.0, 0.0));
    }
}
