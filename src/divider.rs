use crate::rect::Rect;
use crate::units::*;

/// Which end of a system a divider decorates
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DividerSide {
    Left,
    Right,
}

/// Who owns a divider. Generated dividers belong to the layout and are
/// deleted directly; user dividers are removed through an undoable edit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DividerOrigin {
    Generated,
    User,
}

/// The glyph drawn for a divider
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DividerSymbol {
    #[default]
    Standard,
    Long,
    ExtraLong,
}

impl DividerSymbol {
    /// Nominal glyph extents (width, height)
    fn extents(self) -> (Spatium, Spatium) {
        match self {
            DividerSymbol::Standard => (Spatium(3.2), Spatium(1.6)),
            DividerSymbol::Long => (Spatium(4.8), Spatium(1.6)),
            DividerSymbol::ExtraLong => (Spatium(6.4), Spatium(1.6)),
        }
    }
}

/// A system divider: the short slanted strokes printed between systems to
/// help the eye separate densely packed systems
#[derive(Debug, Clone, PartialEq)]
pub struct Divider {
    pub side: DividerSide,
    pub origin: DividerOrigin,
    pub symbol: DividerSymbol,
    /// Glyph box, relative to `pos`
    pub bbox: Rect,
    /// Position relative to the owning system
    pub pos: (Pt, Pt),
}

impl Divider {
    /// A divider created by the layout
    pub fn generated(side: DividerSide) -> Divider {
        Divider {
            side,
            origin: DividerOrigin::Generated,
            symbol: DividerSymbol::default(),
            bbox: Rect::default(),
            pos: (Pt::ZERO, Pt::ZERO),
        }
    }

    /// A divider placed explicitly by the user
    pub fn user(side: DividerSide, symbol: DividerSymbol) -> Divider {
        Divider {
            origin: DividerOrigin::User,
            symbol,
            ..Divider::generated(side)
        }
    }

    pub fn is_generated(&self) -> bool {
        self.origin == DividerOrigin::Generated
    }

    /// Size the glyph box for the current staff space
    pub fn layout(&mut self, spatium: Pt) {
        let (w, h) = self.symbol.extents();
        self.bbox = Rect::sized(w.to_pt(spatium), h.to_pt(spatium));
    }

    pub fn width(&self) -> Pt {
        self.bbox.width()
    }

    pub fn height(&self) -> Pt {
        self.bbox.height()
    }
}
