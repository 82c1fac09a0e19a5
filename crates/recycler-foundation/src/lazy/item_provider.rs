//! Item provider trait for recycled lists.

use std::rc::Rc;

/// Provides what the recycler needs to know about the bound data.
///
/// Implementations should be immutable; a changed data set is a new provider
/// handed to [`RecyclerList::set_data`](crate::RecyclerList::set_data).
pub trait ItemProvider {
    /// The total number of items, visible or not.
    fn item_count(&self) -> usize;

    /// Stable key for the item at `index`. Cached measurements are kept only
    /// while the key at an index stays the same.
    ///
    /// Defaults to the index itself.
    fn get_key(&self, index: usize) -> u64 {
        index as u64
    }

    /// Items with the same content type can share pooled view holders.
    /// `None` is compatible only with other `None` items.
    fn get_content_type(&self, index: usize) -> Option<u64> {
        let _ = index;
        None
    }

    /// Index for `key`, if present. Used to carry measured sizes along when
    /// items move; the default scans every key.
    fn get_index(&self, key: u64) -> Option<usize> {
        (0..self.item_count()).find(|&i| self.get_key(i) == key)
    }

    fn has_data(&self) -> bool {
        self.item_count() > 0
    }
}

impl<T> ItemProvider for Vec<T> {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn get_index(&self, key: u64) -> Option<usize> {
        self.as_slice().get_index(key)
    }
}

impl<T> ItemProvider for [T] {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn get_index(&self, key: u64) -> Option<usize> {
        usize::try_from(key).ok().filter(|&index| index < self.len())
    }
}

impl<P: ItemProvider + ?Sized> ItemProvider for Rc<P> {
    fn item_count(&self) -> usize {
        (**self).item_count()
    }

    fn get_key(&self, index: usize) -> u64 {
        (**self).get_key(index)
    }

    fn get_content_type(&self, index: usize) -> Option<u64> {
        (**self).get_content_type(index)
    }

    fn get_index(&self, key: u64) -> Option<usize> {
        (**self).get_index(key)
    }
}
