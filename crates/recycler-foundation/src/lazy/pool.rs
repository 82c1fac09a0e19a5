//! Pool of unbound view holders, grouped by content type.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use recycler_core::ViewHolderId;

type PooledHolders = SmallVec<[ViewHolderId; 4]>;

/// Holders waiting to be rebound.
///
/// A holder is only handed back out for the content type it was created for.
/// Each type keeps at most `max_per_type` holders; extras are discarded.
#[derive(Debug)]
pub struct ViewHolderPool {
    free: FxHashMap<Option<u64>, PooledHolders>,
    next_id: u64,
    max_per_type: usize,
}

/// Where an acquired holder came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acquired {
    Reused(ViewHolderId),
    Created(ViewHolderId),
}

impl Acquired {
    pub fn id(self) -> ViewHolderId {
        match self {
            Acquired::Reused(id) | Acquired::Created(id) => id,
        }
    }
}

impl ViewHolderPool {
    pub fn new(max_per_type: usize) -> Self {
        Self {
            free: FxHashMap::default(),
            next_id: 0,
            max_per_type,
        }
    }

    pub fn acquire(&mut self, content_type: Option<u64>) -> Acquired {
        if let Some(id) = self.free.get_mut(&content_type).and_then(|holders| holders.pop()) {
            return Acquired::Reused(id);
        }
        let id = ViewHolderId(self.next_id);
        self.next_id += 1;
        Acquired::Created(id)
    }

    /// Returns `false` if the pool for this type was full and the holder was
    /// discarded.
    pub fn release(&mut self, id: ViewHolderId, content_type: Option<u64>) -> bool {
        let holders = self.free.entry(content_type).or_default();
        if holders.len() >= self.max_per_type {
            return false;
        }
        holders.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.free.values().map(|holders| holders.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn created_count(&self) -> u64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_released_holders_of_same_type() {
        let mut pool = ViewHolderPool::new(4);
        let first = pool.acquire(None);
        assert_eq!(first, Acquired::Created(ViewHolderId(0)));

        assert!(pool.release(first.id(), None));
        assert_eq!(pool.acquire(None), Acquired::Reused(ViewHolderId(0)));
        assert!(pool.is_empty());
    }

    #[test]
    fn content_types_do_not_mix() {
        let mut pool = ViewHolderPool::new(4);
        let header = pool.acquire(Some(1)).id();
        pool.release(header, Some(1));

        assert_eq!(pool.acquire(Some(2)), Acquired::Created(ViewHolderId(1)));
        assert_eq!(pool.acquire(None), Acquired::Created(ViewHolderId(2)));
        assert_eq!(pool.acquire(Some(1)), Acquired::Reused(header));
        assert_eq!(pool.created_count(), 3);
    }

    #[test]
    fn full_pool_discards_extras() {
        let mut pool = ViewHolderPool::new(1);
        assert!(pool.release(ViewHolderId(10), None));
        assert!(!pool.release(ViewHolderId(11), None));
        assert_eq!(pool.len(), 1);
    }
}
