//! Binds view holders to the indices inside the visible window.
//!
//! On every pass holders that left the window (or whose item changed content
//! type) go back to the pool first, then every index inside the window that
//! has no holder gets one, reusing pooled holders before creating new ones.

use std::ops::Range;

use rustc_hash::FxHashMap;

use recycler_core::{BindingSnapshot, RecyclerError, RenderStack, ViewHolderId};

use super::item_provider::ItemProvider;
use super::layout_cache::ItemLayoutCache;
use super::pool::{Acquired, ViewHolderPool};
use super::viewport::ViewportHandler;

/// Scroll position and container geometry for one recycling pass, all along
/// the main axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecycleWindow {
    pub scroll_offset: f32,
    pub viewport_size: f32,
    /// Where content starts inside the container (space taken by a header).
    pub content_origin: f32,
    /// Extra pixels bound before and after the viewport.
    pub draw_distance: f32,
}

/// Statistics about view holder lifecycle.
///
/// Used for testing and debugging recycling behavior.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutStats {
    /// Holders currently bound.
    pub items_in_use: usize,

    /// Holders waiting in the pool.
    pub items_in_pool: usize,

    /// Holders ever created by this list.
    pub total_created: u64,

    /// Binds served from the pool instead of a new holder.
    pub reuse_count: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecycleOutcome {
    pub range: Range<usize>,
    pub bound: usize,
    pub unbound: usize,
}

impl RecycleOutcome {
    pub fn changed(&self) -> bool {
        self.bound > 0 || self.unbound > 0
    }
}

#[derive(Debug)]
pub struct ViewHolderRecycler {
    pool: ViewHolderPool,
    holder_types: FxHashMap<ViewHolderId, Option<u64>>,
    reuse_count: usize,
}

impl ViewHolderRecycler {
    pub fn new(max_pool_size: usize) -> Self {
        Self {
            pool: ViewHolderPool::new(max_pool_size),
            holder_types: FxHashMap::default(),
            reuse_count: 0,
        }
    }

    /// Indices that should be bound for `window`.
    pub fn visible_range(
        cache: &ItemLayoutCache,
        item_count: usize,
        window: &RecycleWindow,
    ) -> Range<usize> {
        let viewport = ViewportHandler::new(window.viewport_size, cache.estimated_item_size());
        if viewport.is_collapsed() {
            return 0..0;
        }
        let content_scroll = window.scroll_offset - window.content_origin;
        let start = content_scroll - window.draw_distance;
        let end = content_scroll + viewport.effective_size() + window.draw_distance;
        cache.range_between(start.max(0.0), end, item_count)
    }

    /// Rebinds `stack` so it covers exactly the indices visible in `window`.
    pub fn fill(
        &mut self,
        stack: &mut RenderStack,
        items: &dyn ItemProvider,
        cache: &ItemLayoutCache,
        window: &RecycleWindow,
    ) -> Result<RecycleOutcome, RecyclerError> {
        let range = Self::visible_range(cache, items.item_count(), window);
        let mut outcome = RecycleOutcome {
            range: range.clone(),
            ..Default::default()
        };

        let stale: BindingSnapshot = stack
            .iter()
            .filter(|binding| {
                !range.contains(&binding.data_index)
                    || self.holder_type(binding.view_holder_id)
                        != items.get_content_type(binding.data_index)
            })
            .copied()
            .collect();
        for binding in stale {
            self.release(stack, binding.view_holder_id)?;
            outcome.unbound += 1;
        }

        for index in range {
            if stack.holder_for_index(index).is_some() {
                continue;
            }
            let content_type = items.get_content_type(index);
            let acquired = self.pool.acquire(content_type);
            if let Acquired::Reused(_) = acquired {
                self.reuse_count += 1;
            }
            let id = acquired.id();
            self.holder_types.insert(id, content_type);
            stack.bind(id, index)?;
            outcome.bound += 1;
        }

        if outcome.changed() {
            log::trace!(
                "recycled window {:?}: bound {} unbound {}",
                outcome.range,
                outcome.bound,
                outcome.unbound
            );
        }
        Ok(outcome)
    }

    /// Releases holders bound past the end of the data. Used while the
    /// container has no trustworthy geometry.
    pub fn trim(
        &mut self,
        stack: &mut RenderStack,
        item_count: usize,
    ) -> Result<usize, RecyclerError> {
        let stale: BindingSnapshot = stack
            .iter()
            .filter(|binding| binding.data_index >= item_count)
            .copied()
            .collect();
        for binding in &stale {
            self.release(stack, binding.view_holder_id)?;
        }
        Ok(stale.len())
    }

    pub fn stats(&self, stack: &RenderStack) -> LayoutStats {
        LayoutStats {
            items_in_use: stack.len(),
            items_in_pool: self.pool.len(),
            total_created: self.pool.created_count(),
            reuse_count: self.reuse_count,
        }
    }

    fn holder_type(&self, id: ViewHolderId) -> Option<u64> {
        self.holder_types.get(&id).copied().flatten()
    }

    fn release(&mut self, stack: &mut RenderStack, id: ViewHolderId) -> Result<(), RecyclerError> {
        stack.unbind(id)?;
        let content_type = self.holder_type(id);
        if !self.pool.release(id, content_type) {
            self.holder_types.remove(&id);
        }
        Ok(())
    }
}
