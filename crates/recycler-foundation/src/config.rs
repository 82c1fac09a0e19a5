//! Configuration for a mounted [`RecyclerList`](crate::RecyclerList).

/// Default estimated item size used before an item is measured.
/// 48.0 is a common list row height.
pub const DEFAULT_ITEM_SIZE_ESTIMATE: f32 = 48.0;

/// Default number of extra pixels bound on each side of the viewport.
pub const DEFAULT_DRAW_DISTANCE: f32 = 250.0;

/// Default number of pooled holders kept per content type.
pub const DEFAULT_MAX_POOL_SIZE: usize = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct RecyclerListConfig {
    /// Size along the main axis assumed for items not measured yet.
    pub estimated_item_size: f32,

    /// Extra pixels bound before and after the viewport.
    /// Higher values reduce blank areas during fast scrolling but bind more holders.
    pub draw_distance: f32,

    /// Whether the list scrolls vertically (true) or horizontally (false).
    pub is_vertical: bool,

    /// Unbound holders kept per content type.
    pub max_pool_size: usize,
}

impl Default for RecyclerListConfig {
    fn default() -> Self {
        Self {
            estimated_item_size: DEFAULT_ITEM_SIZE_ESTIMATE,
            draw_distance: DEFAULT_DRAW_DISTANCE,
            is_vertical: true,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }
}

impl RecyclerListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estimated_item_size(mut self, size: f32) -> Self {
        self.estimated_item_size = size;
        self
    }

    pub fn draw_distance(mut self, distance: f32) -> Self {
        self.draw_distance = distance;
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.is_vertical = false;
        self
    }

    pub fn max_pool_size(mut self, size: usize) -> Self {
        self.max_pool_size = size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.estimated_item_size.is_finite() && self.estimated_item_size > 0.0) {
            return Err(ConfigError::InvalidItemSize {
                size: self.estimated_item_size,
            });
        }
        if !(self.draw_distance.is_finite() && self.draw_distance >= 0.0) {
            return Err(ConfigError::InvalidDrawDistance {
                distance: self.draw_distance,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidItemSize { size: f32 },
    InvalidDrawDistance { distance: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidItemSize { size } => {
                write!(f, "estimated item size must be positive and finite, got {size}")
            }
            ConfigError::InvalidDrawDistance { distance } => {
                write!(f, "draw distance must be non-negative and finite, got {distance}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
