use crate::layout::Margins;
use crate::rect::Rect;
use crate::system::System;
use crate::units::*;
use id_arena::Id;

/// One output page: a box with margins holding an ordered list of systems
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 0-based index of the page in the document
    pub no: usize,
    /// The size of the page
    pub bbox: Rect,
    pub margins: Margins,
    /// Position of the page on the document canvas
    pub pos: (Pt, Pt),
    /// Systems on the page, in timeline order
    pub systems: Vec<Id<System>>,
    /// How far the header reaches below the top margin
    pub header_extension: Pt,
    /// How far the footer reaches above the bottom margin
    pub footer_extension: Pt,
}

impl Page {
    pub fn new(no: usize) -> Page {
        Page {
            no,
            bbox: Rect::default(),
            margins: Margins::empty(),
            pos: (Pt::ZERO, Pt::ZERO),
            systems: Vec::default(),
            header_extension: Pt::ZERO,
            footer_extension: Pt::ZERO,
        }
    }

    pub fn width(&self) -> Pt {
        self.bbox.width()
    }

    pub fn height(&self) -> Pt {
        self.bbox.height()
    }

    /// Top margin
    pub fn tm(&self) -> Pt {
        self.margins.top
    }

    /// Bottom margin
    pub fn bm(&self) -> Pt {
        self.margins.bottom
    }

    /// Left margin
    pub fn lm(&self) -> Pt {
        self.margins.left
    }

    pub fn contains(&self, system: Id<System>) -> bool {
        self.systems.contains(&system)
    }
}
