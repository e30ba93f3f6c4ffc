use crate::style::{Style, StyleId};
use crate::units::Pt;

/// Page margins. Pagination places systems between the top and bottom
/// margins and anchors them at the left margin.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt::ZERO)
    }

    /// Margins for the page with the given 1-based page number. Two-sided
    /// documents use the even set of margins on even page numbers; the right
    /// margin is whatever the printable width leaves over.
    pub fn for_page(style: &Style, page_number: i64, page_width: Pt) -> Margins {
        let even = style.bool(StyleId::PageTwosided) && page_number % 2 == 0;
        let (top, bottom, left) = if even {
            (
                style.length(StyleId::PageEvenTopMargin),
                style.length(StyleId::PageEvenBottomMargin),
                style.length(StyleId::PageEvenLeftMargin),
            )
        } else {
            (
                style.length(StyleId::PageOddTopMargin),
                style.length(StyleId::PageOddBottomMargin),
                style.length(StyleId::PageOddLeftMargin),
            )
        };
        let right = (page_width - left - style.length(StyleId::PagePrintableWidth)).max(Pt::ZERO);
        Margins::trbl(top, right, bottom, left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_sided_pages_alternate_margin_sets() {
        let mut style = Style::new();
        style.set(StyleId::PageOddLeftMargin, Pt(40.0)).unwrap();
        style.set(StyleId::PageEvenLeftMargin, Pt(20.0)).unwrap();
        style.set(StyleId::PagePrintableWidth, Pt(500.0)).unwrap();

        let odd = Margins::for_page(&style, 1, Pt(600.0));
        let even = Margins::for_page(&style, 2, Pt(600.0));
        assert_eq!(odd.left, Pt(40.0));
        assert_eq!(odd.right, Pt(60.0));
        assert_eq!(even.left, Pt(20.0));
        assert_eq!(even.right, Pt(80.0));

        style.set(StyleId::PageTwosided, false).unwrap();
        assert_eq!(Margins::for_page(&style, 2, Pt(600.0)).left, Pt(40.0));
    }
}
