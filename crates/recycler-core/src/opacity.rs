//! Visibility gate consumed by the rendering surface.

use recycler_ui_graphics::Rect;

/// The only two opacities the list surface is ever drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Opacity {
    #[default]
    Transparent,
    Opaque,
}

impl Opacity {
    pub fn is_visible(self) -> bool {
        matches!(self, Opacity::Opaque)
    }

    /// `0` or `1`.
    pub fn as_u8(self) -> u8 {
        match self {
            Opacity::Transparent => 0,
            Opacity::Opaque => 1,
        }
    }

    /// Alpha for a graphics layer.
    pub fn alpha(self) -> f32 {
        match self {
            Opacity::Transparent => 0.0,
            Opacity::Opaque => 1.0,
        }
    }
}

/// Derives the surface opacity from the commit inputs.
///
/// Holds no state. Content is shown only when the container has been measured
/// and at least one view holder is bound, so an unmeasured or empty surface can
/// never be opaque.
pub struct OpacityGate;

impl OpacityGate {
    pub fn evaluate(container_layout: Option<&Rect>, render_stack_populated: bool) -> Opacity {
        if container_layout.is_some() && render_stack_populated {
            Opacity::Opaque
        } else {
            Opacity::Transparent
        }
    }
}
