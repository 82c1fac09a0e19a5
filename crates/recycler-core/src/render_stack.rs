//! Render stack: the view holders currently instantiated and the data index
//! each one is bound to.
//!
//! The recycling collaborator decides which holders exist and what they show.
//! The commit machinery only reads two facts from here: whether the stack is
//! populated, and whether it changed since it was last observed.

use smallvec::SmallVec;

use crate::RecyclerError;

/// Identity of a reusable rendering slot.
///
/// Ids are handed out by the recycler and stay with the holder across rebinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHolderId(pub u64);

impl std::fmt::Display for ViewHolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One `{view holder, data index}` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewHolderBinding {
    pub view_holder_id: ViewHolderId,
    pub data_index: usize,
}

/// Inline capacity for snapshots. A phone-sized viewport rarely binds more.
pub type BindingSnapshot = SmallVec<[ViewHolderBinding; 16]>;

/// Ordered collection of bound view holders, sorted by data index.
#[derive(Debug, Default)]
pub struct RenderStack {
    bindings: Vec<ViewHolderBinding>,
    /// Bumped on every structural change.
    version: u64,
}

impl RenderStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populated iff at least one holder is bound.
    pub fn is_populated(&self) -> bool {
        !self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn bindings(&self) -> &[ViewHolderBinding] {
        &self.bindings
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewHolderBinding> {
        self.bindings.iter()
    }

    pub fn snapshot(&self) -> BindingSnapshot {
        self.bindings.iter().copied().collect()
    }

    pub fn holder_for_index(&self, data_index: usize) -> Option<ViewHolderId> {
        self.position_of_index(data_index)
            .ok()
            .map(|pos| self.bindings[pos].view_holder_id)
    }

    pub fn index_for_holder(&self, id: ViewHolderId) -> Option<usize> {
        self.bindings
            .iter()
            .find(|binding| binding.view_holder_id == id)
            .map(|binding| binding.data_index)
    }

    /// Binds an unbound holder to a data index not shown by any other holder.
    pub fn bind(&mut self, id: ViewHolderId, data_index: usize) -> Result<(), RecyclerError> {
        if let Some(bound) = self.index_for_holder(id) {
            return Err(RecyclerError::ViewHolderAlreadyBound {
                id,
                data_index: bound,
            });
        }
        match self.position_of_index(data_index) {
            Ok(pos) => Err(RecyclerError::DataIndexAlreadyBound {
                data_index,
                holder: self.bindings[pos].view_holder_id,
            }),
            Err(pos) => {
                self.bindings.insert(
                    pos,
                    ViewHolderBinding {
                        view_holder_id: id,
                        data_index,
                    },
                );
                self.version += 1;
                Ok(())
            }
        }
    }

    /// Removes a holder from the stack and returns what it was showing.
    pub fn unbind(&mut self, id: ViewHolderId) -> Result<ViewHolderBinding, RecyclerError> {
        let pos = self
            .bindings
            .iter()
            .position(|binding| binding.view_holder_id == id)
            .ok_or(RecyclerError::UnknownViewHolder { id })?;
        self.version += 1;
        Ok(self.bindings.remove(pos))
    }

    fn position_of_index(&self, data_index: usize) -> Result<usize, usize> {
        self.bindings
            .binary_search_by_key(&data_index, |binding| binding.data_index)
    }
}

/// Remembers the last observed state of a [`RenderStack`] so callers can tell
/// whether anything changed between two event turns.
#[derive(Debug, Default)]
pub struct RenderStackObserver {
    last_version: Option<u64>,
    last_populated: bool,
}

impl RenderStackObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(populated)` if the stack changed since the previous call.
    pub fn observe(&mut self, stack: &RenderStack) -> Option<bool> {
        if self.last_version == Some(stack.version()) {
            return None;
        }
        self.last_version = Some(stack.version());
        self.last_populated = stack.is_populated();
        Some(self.last_populated)
    }

    pub fn last_populated(&self) -> bool {
        self.last_populated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_stay_sorted_by_data_index() {
        let mut stack = RenderStack::new();
        stack.bind(ViewHolderId(1), 4).unwrap();
        stack.bind(ViewHolderId(2), 0).unwrap();
        stack.bind(ViewHolderId(3), 2).unwrap();

        let order: Vec<usize> = stack.iter().map(|b| b.data_index).collect();
        assert_eq!(order, vec![0, 2, 4]);
        assert_eq!(stack.holder_for_index(2), Some(ViewHolderId(3)));
    }

    #[test]
    fn populated_iff_non_empty() {
        let mut stack = RenderStack::new();
        assert!(!stack.is_populated());
        stack.bind(ViewHolderId(7), 0).unwrap();
        assert!(stack.is_populated());
        stack.unbind(ViewHolderId(7)).unwrap();
        assert!(!stack.is_populated());
    }

    #[test]
    fn double_binding_is_rejected() {
        let mut stack = RenderStack::new();
        stack.bind(ViewHolderId(1), 0).unwrap();

        assert_eq!(
            stack.bind(ViewHolderId(1), 3),
            Err(RecyclerError::ViewHolderAlreadyBound {
                id: ViewHolderId(1),
                data_index: 0
            })
        );
        assert_eq!(
            stack.bind(ViewHolderId(2), 0),
            Err(RecyclerError::DataIndexAlreadyBound {
                data_index: 0,
                holder: ViewHolderId(1)
            })
        );
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn unbinding_unknown_holder_errors() {
        let mut stack = RenderStack::new();
        assert_eq!(
            stack.unbind(ViewHolderId(9)),
            Err(RecyclerError::UnknownViewHolder { id: ViewHolderId(9) })
        );
    }

    #[test]
    fn observer_reports_only_changes() {
        let mut stack = RenderStack::new();
        let mut observer = RenderStackObserver::new();

        assert_eq!(observer.observe(&stack), Some(false));
        assert_eq!(observer.observe(&stack), None);

        stack.bind(ViewHolderId(1), 0).unwrap();
        assert_eq!(observer.observe(&stack), Some(true));
        assert_eq!(observer.observe(&stack), None);

        stack.unbind(ViewHolderId(1)).unwrap();
        assert_eq!(observer.observe(&stack), Some(false));
        assert!(!observer.last_populated());
    }
}
