//! View-holder recycling and the mounted list instance.
//!
//! [`lazy`] decides which data indices get a view holder; [`RecyclerList`]
//! wires it to the host's layout events and to the commit machinery in
//! `recycler-core`.

pub mod lazy;

mod config;
mod list;

pub use config::{
    ConfigError, RecyclerListConfig, DEFAULT_DRAW_DISTANCE, DEFAULT_ITEM_SIZE_ESTIMATE,
    DEFAULT_MAX_POOL_SIZE,
};
pub use lazy::{ItemProvider, LayoutStats};
pub use list::{CommitListener, RecyclerList};

pub use recycler_core::{
    CommitPhase, CommitTrigger, Delivery, Evaluation, LayoutTicket, MeasureHost, Opacity,
    RecyclerError, RenderId, ViewHolderBinding, ViewHolderId,
};
pub use recycler_ui_graphics::{Rect, Size};

pub mod prelude {
    pub use crate::config::RecyclerListConfig;
    pub use crate::lazy::ItemProvider;
    pub use crate::list::RecyclerList;
    pub use recycler_core::prelude::*;
}
