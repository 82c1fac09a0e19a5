//! Geometric primitives: Point, Size, Rect

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Extent along the scrolling axis.
    pub fn main_axis(&self, is_vertical: bool) -> f32 {
        if is_vertical {
            self.height
        } else {
            self.width
        }
    }

    /// Extent across the scrolling axis.
    pub fn cross_axis(&self, is_vertical: bool) -> f32 {
        if is_vertical {
            self.width
        } else {
            self.height
        }
    }
}

/// A bounding box in the coordinate space of the nearest scrollable ancestor.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }

    /// Compares two boxes allowing for float noise from the host's layout pass.
    pub fn approx_eq(&self, other: &Rect, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_axis_follows_orientation() {
        let size = Size::new(399.0, 899.0);
        assert_eq!(size.main_axis(true), 899.0);
        assert_eq!(size.main_axis(false), 399.0);
        assert_eq!(size.cross_axis(true), 399.0);
    }

    #[test]
    fn approx_eq_ignores_subpixel_noise() {
        let a = Rect::new(0.0, 0.0, 399.0, 899.0);
        let b = Rect::new(0.0, 0.0004, 399.0, 899.0003);
        assert!(a.approx_eq(&b, 0.001));
        assert!(!a.approx_eq(&a.translate(0.0, 1.0), 0.001));
    }

    #[test]
    fn origin_and_size_round_out_the_box() {
        let rect = Rect::from_origin_size(Point::new(4.0, 8.0), Size::new(10.0, 20.0));
        assert_eq!(rect.origin(), Point::new(4.0, 8.0));
        assert_eq!(rect.size(), Size::new(10.0, 20.0));
        assert!(rect.contains(14.0, 28.0));
        assert!(!rect.contains(15.0, 28.0));
    }
}
