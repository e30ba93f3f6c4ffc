/// The kind of bracket joining a group of staves
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BracketKind {
    /// Square bracket
    Normal,
    /// Curly brace, typically joining the staves of one keyboard instrument
    Brace,
    /// Thin line bracket; ignored by vertical spreading
    Line,
}

/// A bracket starting at a staff and covering `span` staves
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BracketItem {
    pub kind: BracketKind,
    pub span: usize,
}

impl BracketItem {
    pub fn new(kind: BracketKind, span: usize) -> BracketItem {
        BracketItem { kind, span }
    }
}

/// A staff of the score, independent of any particular system
#[derive(Debug, Clone, PartialEq)]
pub struct Staff {
    /// Whether the staff is shown at all; hidden staves are skipped when
    /// finalizing page layout
    pub show: bool,
    /// Brackets that begin on this staff
    pub brackets: Vec<BracketItem>,
}

impl Default for Staff {
    fn default() -> Self {
        Staff {
            show: true,
            brackets: Vec::default(),
        }
    }
}

impl Staff {
    pub fn new() -> Staff {
        Staff::default()
    }

    pub fn with_bracket(mut self, kind: BracketKind, span: usize) -> Staff {
        self.brackets.push(BracketItem::new(kind, span));
        self
    }

    pub fn hidden(mut self) -> Staff {
        self.show = false;
        self
    }
}
