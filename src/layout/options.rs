//! Layout options and configuration.

use crate::pagesize::{self, PageSize};
use crate::units::Pt;

/// How systems are arranged on pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Fill fixed-size pages, spreading systems over each page
    #[default]
    Page,
    /// Fill fixed-size pages, centring the systems vertically instead of
    /// spreading them
    Float,
    /// A single page that grows with its content; no page breaks
    Continuous,
}

/// How successive pages are arranged on the document canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageOrientation {
    /// Pages stacked top to bottom
    #[default]
    Vertical,
    /// Pages side by side, as in a spread of facing pages
    Horizontal,
}

/// Options for paginating a document.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub mode: LayoutMode,
    /// Size of every page
    pub page_size: PageSize,
    pub orientation: PageOrientation,
    /// Gap between vertically stacked pages
    pub vertical_page_gap: Pt,
    /// Gap before a page whose index (plus numbering offset) is even
    pub horizontal_page_gap_even: Pt,
    /// Gap before a page whose index (plus numbering offset) is odd
    pub horizontal_page_gap_odd: Pt,
    /// Never stretch the space between systems
    pub no_vertical_stretch: bool,
    /// How far headers reach below the top margin (zero when there is no header)
    pub header_extension: Pt,
    /// How far footers reach above the bottom margin (zero when there is no footer)
    pub footer_extension: Pt,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Page,
            page_size: pagesize::A4,
            orientation: PageOrientation::Vertical,
            vertical_page_gap: Pt(5.0),
            horizontal_page_gap_even: Pt(1.0),
            horizontal_page_gap_odd: Pt(50.0),
            no_vertical_stretch: false,
            header_extension: Pt::ZERO,
            footer_extension: Pt::ZERO,
        }
    }
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout mode.
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set how pages are arranged on the canvas.
    pub fn with_orientation(mut self, orientation: PageOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the gaps between pages: vertical stacking gap, then the
    /// horizontal gaps before even and odd pages.
    pub fn with_page_gaps(mut self, vertical: Pt, even: Pt, odd: Pt) -> Self {
        self.vertical_page_gap = vertical;
        self.horizontal_page_gap_even = even;
        self.horizontal_page_gap_odd = odd;
        self
    }

    /// Enable or disable stretching of the space between systems.
    pub fn with_vertical_stretch(mut self, stretch: bool) -> Self {
        self.no_vertical_stretch = !stretch;
        self
    }

    /// Set the header and footer extensions.
    pub fn with_header_footer(mut self, header: Pt, footer: Pt) -> Self {
        self.header_extension = header;
        self.footer_extension = footer;
        self
    }

    /// Whether systems may be broken onto new pages.
    pub fn breaks_pages(&self) -> bool {
        self.mode != LayoutMode::Continuous
    }

    pub fn is_mode(&self, mode: LayoutMode) -> bool {
        self.mode == mode
    }

    pub fn page_width(&self) -> Pt {
        self.page_size.0
    }

    pub fn page_height(&self) -> Pt {
        self.page_size.1
    }
}
