//! Render generations and the tickets that tag in-flight measurements.

use std::rc::{Rc, Weak};

/// Commit generation of one mounted list.
///
/// Starts at [`RenderId::INITIAL`] for every new instance and only moves
/// forward while that instance is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RenderId(u64);

impl RenderId {
    pub const INITIAL: RenderId = RenderId(0);

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> RenderId {
        RenderId(self.0 + 1)
    }
}

impl std::fmt::Display for RenderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one mounted instance.
///
/// Tickets hold a weak handle to it, so a ticket issued by an instance that
/// has since been dropped can never match a later instance.
#[derive(Debug, Default)]
pub(crate) struct MountToken(Rc<()>);

impl MountToken {
    pub(crate) fn new() -> Self {
        Self(Rc::new(()))
    }

    fn downgrade(&self) -> Weak<()> {
        Rc::downgrade(&self.0)
    }

    fn owns(&self, handle: &Weak<()>) -> bool {
        Weak::ptr_eq(handle, &self.downgrade())
    }
}

/// Tag carried by a callback-based measurement request.
///
/// A delivery is accepted only if its ticket was issued by the same mounted
/// instance, in the same container epoch, and no commit happened since.
#[derive(Clone, Debug)]
pub struct LayoutTicket {
    mount: Weak<()>,
    epoch: u32,
    render_id: RenderId,
}

impl LayoutTicket {
    pub(crate) fn issue(mount: &MountToken, epoch: u32, render_id: RenderId) -> Self {
        Self {
            mount: mount.downgrade(),
            epoch,
            render_id,
        }
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn render_id(&self) -> RenderId {
        self.render_id
    }

    pub(crate) fn is_current(&self, mount: &MountToken, epoch: u32, render_id: RenderId) -> bool {
        mount.owns(&self.mount) && self.epoch == epoch && self.render_id == render_id
    }
}
