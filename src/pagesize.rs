//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//!
//! # Example
//!
//! ```
//! use score_pager::layout::LayoutOptions;
//! use score_pager::pagesize::LETTER;
//!
//! let options = LayoutOptions::new().with_page_size(LETTER);
//! assert_eq!(options.page_size, LETTER);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const TABLOID: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));

// iso a/b-series (converted from mm to points)
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
pub const B4: PageSize = (Pt(250.0 * 72.0 / 25.4), Pt(353.0 * 72.0 / 25.4));

// common part and score formats
pub const CONCERT: PageSize = (Pt(9.0 * 72.0), Pt(12.0 * 72.0));
pub const FOLIO: PageSize = (Pt(9.5 * 72.0), Pt(12.5 * 72.0));
