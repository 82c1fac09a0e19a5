//! Layout-commit and visibility-gating core for a view-recycling list.
//!
//! The list paints only once three independently arriving inputs agree: the
//! container has been measured, the bound data is non-empty, and the recycler
//! has bound at least one view holder. [`CommitLayoutStateMachine`] turns those
//! inputs into render generations; [`OpacityGate`] turns them into the single
//! visible/invisible decision for the rendering surface.
//!
//! Everything here is single-threaded and owned by one mounted list instance.

mod commit;
mod error;
mod measurement;
mod opacity;
mod render_stack;
mod ticket;

pub use commit::{CommitLayoutStateMachine, CommitPhase, CommitTrigger, Delivery, Evaluation};
pub use error::RecyclerError;
pub use measurement::{LayoutMeasurementService, MeasureHost};
pub use opacity::{Opacity, OpacityGate};
pub use render_stack::{
    BindingSnapshot, RenderStack, RenderStackObserver, ViewHolderBinding, ViewHolderId,
};
pub use ticket::{LayoutTicket, RenderId};

pub use recycler_ui_graphics::{Point, Rect, Size};

pub mod prelude {
    pub use crate::commit::{CommitLayoutStateMachine, CommitPhase};
    pub use crate::measurement::MeasureHost;
    pub use crate::opacity::Opacity;
    pub use crate::render_stack::{RenderStack, ViewHolderId};
    pub use crate::ticket::RenderId;
}
