use crate::units::*;

/// A rectangle, specified by two opposite corners. Unlike PDF space, the
/// y-axis grows downward: `y1` is the top edge and `y2` the bottom edge.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the left edge.
    pub x1: Pt,
    /// The y-coordinate of the top edge.
    pub y1: Pt,
    /// The x-coordinate of the right edge.
    pub x2: Pt,
    /// The y-coordinate of the bottom edge.
    pub y2: Pt,
}

impl Rect {
    /// Create a rectangle from its top-left corner and its size
    pub fn new(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Create a rectangle anchored at the origin
    pub fn sized(width: Pt, height: Pt) -> Rect {
        Rect::new(Pt::ZERO, Pt::ZERO, width, height)
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}
