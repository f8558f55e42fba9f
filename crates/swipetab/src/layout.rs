//! Tab measurement registry.
//!
//! Tabs report their measured widths as they are laid out; the registry keeps
//! a prefix-sum offset table readers use for indicator placement and strip
//! scrolling. The registry is a cheap cloneable handle shared by the tab bar,
//! the indicator and the auto-scroll controller.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct TabLayoutMaps {
    route_count: usize,
    tab_widths: BTreeMap<usize, f32>,
    tab_offsets: BTreeMap<usize, f32>,
    item_widths: BTreeMap<usize, f32>,
}

impl TabLayoutMaps {
    /// Offsets for `0..=route_count`, unmeasured widths counting as 0.
    fn rebuild_offsets(&mut self) {
        let mut offset = 0.0;
        self.tab_offsets.clear();
        self.tab_offsets.insert(0, 0.0);
        for i in 1..=self.route_count {
            offset += self.tab_widths.get(&(i - 1)).copied().unwrap_or(0.0);
            self.tab_offsets.insert(i, offset);
        }
    }
}

/// Shared per-tab width and offset tables.
#[derive(Debug, Clone, Default)]
pub struct TabLayoutRegistry {
    inner: Arc<RwLock<TabLayoutMaps>>,
}

impl TabLayoutRegistry {
    /// Create a registry for `route_count` tabs.
    #[must_use]
    pub fn new(route_count: usize) -> Self {
        let registry = Self::default();
        registry.set_route_count(route_count);
        registry
    }

    /// Number of tabs the offset table covers.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.inner.read().route_count
    }

    /// Change the number of tabs. Known widths are kept.
    pub fn set_route_count(&self, route_count: usize) {
        let mut maps = self.inner.write();
        if maps.route_count != route_count || maps.tab_offsets.is_empty() {
            maps.route_count = route_count;
            maps.rebuild_offsets();
        }
    }

    /// Record the measured width of tab `index`. Returns true if the width
    /// changed and the offset table was rebuilt.
    pub fn report_width(&self, index: usize, width: f32) -> bool {
        let width = sanitize(width);
        let mut maps = self.inner.write();
        let previous = maps.tab_widths.get(&index).copied();
        if previous == Some(width) {
            return false;
        }
        maps.tab_widths.insert(index, width);
        maps.rebuild_offsets();
        tracing::trace!(index, width, "tab width changed");
        true
    }

    /// Record the measured width of the content of tab bar item `index`.
    /// Returns true if the width changed.
    pub fn report_item_width(&self, index: usize, width: f32) -> bool {
        let width = sanitize(width);
        self.inner.write().item_widths.insert(index, width) != Some(width)
    }

    /// Measured width of tab `index`.
    #[must_use]
    pub fn width(&self, index: usize) -> Option<f32> {
        self.inner.read().tab_widths.get(&index).copied()
    }

    /// Measured content width of tab bar item `index`.
    #[must_use]
    pub fn item_width(&self, index: usize) -> Option<f32> {
        self.inner.read().item_widths.get(&index).copied()
    }

    /// Offset of tab `index` from the start of the strip.
    #[must_use]
    pub fn offset(&self, index: usize) -> Option<f32> {
        self.inner.read().tab_offsets.get(&index).copied()
    }

    /// Snapshot of the offset table.
    #[must_use]
    pub fn offsets(&self) -> BTreeMap<usize, f32> {
        self.inner.read().tab_offsets.clone()
    }

    /// Total measured strip width: the offset just past the last tab.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        let maps = self.inner.read();
        maps.tab_offsets.get(&maps.route_count).copied().unwrap_or(0.0)
    }
}

fn sanitize(width: f32) -> f32 {
    if width.is_finite() {
        width.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_offsets_are_prefix_sums() {
        let registry = TabLayoutRegistry::new(3);
        registry.report_width(0, 80.0);
        registry.report_width(1, 100.0);
        registry.report_width(2, 60.0);
        assert_eq!(
            registry.offsets(),
            BTreeMap::from([(0, 0.0), (1, 80.0), (2, 180.0), (3, 240.0)])
        );
        assert_eq!(registry.content_width(), 240.0);
    }

    #[test]
    fn test_unmeasured_tabs_count_as_zero() {
        let registry = TabLayoutRegistry::new(3);
        registry.report_width(1, 50.0);
        assert_eq!(registry.offset(1), Some(0.0));
        assert_eq!(registry.offset(2), Some(50.0));
        assert_eq!(registry.offset(3), Some(50.0));
        assert_eq!(registry.width(0), None);
    }

    #[test]
    fn test_unchanged_width_is_ignored() {
        let registry = TabLayoutRegistry::new(2);
        assert!(registry.report_width(0, 40.0));
        assert!(!registry.report_width(0, 40.0));
        assert!(registry.report_width(0, 44.0));
        assert_eq!(registry.offset(1), Some(44.0));
    }

    #[test]
    fn test_later_change_rebuilds_following_offsets() {
        let registry = TabLayoutRegistry::new(3);
        for (i, w) in [80.0, 100.0, 60.0].into_iter().enumerate() {
            registry.report_width(i, w);
        }
        registry.report_width(0, 90.0);
        assert_eq!(registry.offset(2), Some(190.0));
        assert_eq!(registry.offset(3), Some(250.0));
    }

    #[test]
    fn test_route_count_change_keeps_widths() {
        let registry = TabLayoutRegistry::new(2);
        registry.report_width(0, 10.0);
        registry.report_width(1, 20.0);
        registry.report_width(2, 30.0);
        assert_eq!(registry.offset(3), None);
        registry.set_route_count(3);
        assert_eq!(registry.offset(3), Some(60.0));
    }

    #[test]
    fn test_bad_widths_are_sanitized() {
        let registry = TabLayoutRegistry::new(1);
        registry.report_width(0, f32::NAN);
        assert_eq!(registry.width(0), Some(0.0));
        registry.report_width(0, -5.0);
        assert_eq!(registry.offset(1), Some(0.0));
    }

    #[test]
    fn test_item_widths_are_separate() {
        let registry = TabLayoutRegistry::new(2);
        assert!(registry.report_item_width(1, 42.0));
        assert!(!registry.report_item_width(1, 42.0));
        assert_eq!(registry.item_width(1), Some(42.0));
        assert_eq!(registry.width(1), None);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = TabLayoutRegistry::new(2);
        let reader = registry.clone();
        registry.report_width(0, 12.0);
        assert_eq!(reader.offset(1), Some(12.0));
    }

    proptest! {
        #[test]
        fn prop_offset_is_sum_of_preceding_widths(
            reports in proptest::collection::vec((0usize..6, 0.0f32..300.0), 0..40),
        ) {
            let registry = TabLayoutRegistry::new(6);
            let mut widths = [0.0f32; 6];
            for (i, w) in reports {
                registry.report_width(i, w);
                widths[i] = w;
            }
            for i in 0..=6 {
                let expected: f32 = widths[..i].iter().sum();
                let actual = registry.offset(i).unwrap();
                prop_assert!((actual - expected).abs() < 1e-2);
            }
        }
    }
}
