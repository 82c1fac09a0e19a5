//! Measured item sizes and the offsets derived from them.
//!
//! Unmeasured items take the estimated size. The cache lives as long as the
//! list instance, so a list that is hidden and shown again lays out with the
//! sizes it already measured instead of falling back to estimates.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::lazy::item_provider::ItemProvider;

#[derive(Clone, Copy, Debug, PartialEq)]
struct MeasuredSize {
    key: u64,
    main_axis_size: f32,
}

/// Sub-pixel changes are layout noise.
const SIZE_CHANGE_TOLERANCE: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct ItemLayoutCache {
    sizes: BTreeMap<usize, MeasuredSize>,
    estimated_item_size: f32,
}

impl ItemLayoutCache {
    /// `estimated_item_size` must be positive; the list config validates it.
    pub fn new(estimated_item_size: f32) -> Self {
        Self {
            sizes: BTreeMap::new(),
            estimated_item_size,
        }
    }

    pub fn estimated_item_size(&self) -> f32 {
        self.estimated_item_size
    }

    /// Records a measurement. Returns `true` if the cached size changed.
    pub fn record(&mut self, index: usize, key: u64, main_axis_size: f32) -> bool {
        let entry = MeasuredSize {
            key,
            main_axis_size: main_axis_size.max(0.0),
        };
        match self.sizes.insert(index, entry) {
            Some(previous) => {
                previous.key != key
                    || (previous.main_axis_size - entry.main_axis_size).abs()
                        > SIZE_CHANGE_TOLERANCE
            }
            None => true,
        }
    }

    /// Measured size, if this index has been measured.
    pub fn measured(&self, index: usize) -> Option<f32> {
        self.sizes.get(&index).map(|entry| entry.main_axis_size)
    }

    pub fn size_of(&self, index: usize) -> f32 {
        self.measured(index).unwrap_or(self.estimated_item_size)
    }

    pub fn measured_count(&self) -> usize {
        self.sizes.len()
    }

    /// Start of `index` measured from the start of the content.
    pub fn offset_of(&self, index: usize) -> f32 {
        let correction: f32 = self
            .sizes
            .range(..index)
            .map(|(_, entry)| entry.main_axis_size - self.estimated_item_size)
            .sum();
        index as f32 * self.estimated_item_size + correction
    }

    pub fn total_size(&self, item_count: usize) -> f32 {
        self.offset_of(item_count)
    }

    /// Index of the item covering `offset`, clamped to the list.
    pub fn index_at_offset(&self, offset: f32, item_count: usize) -> usize {
        if item_count == 0 || offset <= 0.0 {
            return 0;
        }
        let estimated = self.estimated_item_size;
        let mut index = 0usize;
        let mut start = 0.0f32;
        for (&measured_index, entry) in self.sizes.range(..item_count) {
            let gap_end = start + (measured_index - index) as f32 * estimated;
            if offset < gap_end {
                let skipped = ((offset - start) / estimated).floor() as usize;
                return (index + skipped).min(item_count - 1);
            }
            start = gap_end;
            if offset < start + entry.main_axis_size {
                return measured_index;
            }
            start += entry.main_axis_size;
            index = measured_index + 1;
        }
        let skipped = ((offset - start) / estimated).floor() as usize;
        (index + skipped).min(item_count - 1)
    }

    /// Indices whose extent intersects `[start, end)`.
    pub fn range_between(&self, start: f32, end: f32, item_count: usize) -> Range<usize> {
        if item_count == 0 || end <= start {
            return 0..0;
        }
        let first = self.index_at_offset(start.max(0.0), item_count);
        let mut offset = self.offset_of(first);
        let mut last = first;
        while last < item_count && offset < end {
            offset += self.size_of(last);
            last += 1;
        }
        first..last
    }

    /// Moves measurements to wherever their item's key now lives and drops
    /// those whose key is gone.
    pub fn remap(&mut self, items: &dyn ItemProvider) {
        let count = items.item_count();
        let before = self.sizes.len();
        let mut moved = 0usize;
        for (index, entry) in std::mem::take(&mut self.sizes) {
            let target = if index < count && items.get_key(index) == entry.key {
                Some(index)
            } else {
                items.get_index(entry.key).filter(|&target| target < count)
            };
            if let Some(target) = target {
                moved += usize::from(target != index);
                self.sizes.insert(target, entry);
            }
        }
        let dropped = before - self.sizes.len();
        if dropped > 0 || moved > 0 {
            log::debug!("item measurements: {moved} moved, {dropped} dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmeasured_items_use_estimate() {
        let cache = ItemLayoutCache::new(100.0);
        assert_eq!(cache.size_of(3), 100.0);
        assert_eq!(cache.offset_of(3), 300.0);
        assert_eq!(cache.total_size(5), 500.0);
    }

    #[test]
    fn measured_sizes_shift_later_offsets() {
        let mut cache = ItemLayoutCache::new(50.0);
        assert!(cache.record(0, 0, 100.0));
        assert!(cache.record(2, 2, 20.0));

        assert_eq!(cache.offset_of(1), 100.0);
        assert_eq!(cache.offset_of(2), 150.0);
        assert_eq!(cache.offset_of(3), 170.0);
        assert_eq!(cache.offset_of(4), 220.0);
    }

    #[test]
    fn record_reports_real_changes_only() {
        let mut cache = ItemLayoutCache::new(50.0);
        assert!(cache.record(0, 7, 100.0));
        assert!(!cache.record(0, 7, 100.001));
        assert!(cache.record(0, 7, 120.0));
        assert!(cache.record(0, 8, 120.0));
    }

    #[test]
    fn index_at_offset_walks_measured_and_estimated_runs() {
        let mut cache = ItemLayoutCache::new(50.0);
        cache.record(1, 1, 200.0);

        assert_eq!(cache.index_at_offset(0.0, 10), 0);
        assert_eq!(cache.index_at_offset(49.0, 10), 0);
        assert_eq!(cache.index_at_offset(50.0, 10), 1);
        assert_eq!(cache.index_at_offset(249.0, 10), 1);
        assert_eq!(cache.index_at_offset(250.0, 10), 2);
        assert_eq!(cache.index_at_offset(330.0, 10), 3);
        assert_eq!(cache.index_at_offset(10_000.0, 10), 9);
    }

    #[test]
    fn range_between_covers_partially_visible_items() {
        let cache = ItemLayoutCache::new(100.0);
        assert_eq!(cache.range_between(0.0, 899.0, 5), 0..5);
        assert_eq!(cache.range_between(0.0, 899.0, 20), 0..9);
        assert_eq!(cache.range_between(150.0, 350.0, 20), 1..4);
        assert_eq!(cache.range_between(0.0, 0.0, 20), 0..0);
        assert_eq!(cache.range_between(0.0, 100.0, 0), 0..0);
    }

    #[test]
    fn remap_follows_moved_keys_and_drops_removed_ones() {
        struct Keys(Vec<u64>);
        impl ItemProvider for Keys {
            fn item_count(&self) -> usize {
                self.0.len()
            }
            fn get_key(&self, index: usize) -> u64 {
                self.0[index]
            }
        }

        let mut cache = ItemLayoutCache::new(50.0);
        cache.record(0, 10, 80.0);
        cache.record(1, 11, 90.0);
        cache.record(2, 12, 120.0);

        cache.remap(&Keys(vec![12, 10, 99]));
        assert_eq!(cache.measured(0), Some(120.0));
        assert_eq!(cache.measured(1), Some(80.0));
        assert_eq!(cache.measured(2), None);
        assert_eq!(cache.measured_count(), 2);
    }

    #[test]
    fn remap_with_index_keys_keeps_the_prefix() {
        let mut cache = ItemLayoutCache::new(50.0);
        cache.record(0, 0, 80.0);
        cache.record(4, 4, 80.0);

        cache.remap(&vec![(); 3]);
        assert_eq!(cache.measured(0), Some(80.0));
        assert_eq!(cache.measured(4), None);
    }
}
