//! Viewport handling for the recycler.
//!
//! Validates the container's main-axis extent and falls back to a bounded
//! extent when the list sits in an unconstrained parent.

/// Extent beyond which the container is treated as unbounded.
const MAX_REASONABLE_VIEWPORT: f32 = 100_000.0;

/// Number of estimated items an unbounded viewport is sized for.
const INFINITE_VIEWPORT_ITEM_COUNT: f32 = 20.0;

#[derive(Clone, Copy, Debug)]
pub struct ViewportHandler {
    effective_size: f32,
    is_infinite: bool,
}

impl ViewportHandler {
    /// * `viewport_size` - container extent along the scrolling axis
    /// * `estimated_item_size` - size used for items not measured yet
    pub fn new(viewport_size: f32, estimated_item_size: f32) -> Self {
        let is_infinite = viewport_size.is_infinite() || viewport_size > MAX_REASONABLE_VIEWPORT;

        let effective_size = if is_infinite {
            let estimated_size = estimated_item_size * INFINITE_VIEWPORT_ITEM_COUNT;
            log::warn!(
                "RecyclerList: container extent {} is unbounded, using fallback {}. \
                 Give the list a constrained parent.",
                viewport_size,
                estimated_size
            );
            estimated_size
        } else if viewport_size.is_nan() {
            0.0
        } else {
            viewport_size.max(0.0)
        };

        Self {
            effective_size,
            is_infinite,
        }
    }

    #[inline]
    pub fn effective_size(&self) -> f32 {
        self.effective_size
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.is_infinite
    }

    /// Whether anything can be shown at all.
    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.effective_size <= 0.0
    }
}
