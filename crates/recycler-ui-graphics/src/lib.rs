//! Pure geometry data for the recycler crates
//!
//! Boxes reported by the host's measurement primitives and the sizes derived
//! from them.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
