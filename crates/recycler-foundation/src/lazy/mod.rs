//! The recycling collaborator: decides which data indices get a view holder.

mod item_provider;
mod layout_cache;
mod pool;
mod recycler;
mod viewport;

pub use item_provider::ItemProvider;
pub use layout_cache::ItemLayoutCache;
pub use pool::{Acquired, ViewHolderPool};
pub use recycler::{LayoutStats, RecycleOutcome, RecycleWindow, ViewHolderRecycler};
pub use viewport::ViewportHandler;
