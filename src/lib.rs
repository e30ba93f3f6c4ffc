//! Pagination for engraved music: breaks a sequence of laid-out systems
//! into pages and spreads the leftover vertical space so that every page
//! looks balanced.
//!
//! A [Document] owns the style, the staves, the systems and the pages.
//! Systems come in through a [layout::SystemSource] and are placed by
//! [layout::Pager]:
//!
//! ```
//! use score_pager::layout::{LayoutMode, LayoutOptions, Pager, SystemSource};
//! use score_pager::{Document, Measure, Pt, Staff, Style, SysStaff, System};
//!
//! let staves = vec![Staff::new(), Staff::new()];
//! let mut document = Document::new(Style::new(), staves);
//!
//! let systems = (0..12).map(|i| {
//!     System::new(
//!         vec![Measure::new(i * 1920)],
//!         vec![SysStaff::new(Pt(0.0), Pt(20.0)), SysStaff::new(Pt(50.0), Pt(20.0))],
//!     )
//! });
//! let options = LayoutOptions::new().with_mode(LayoutMode::Page);
//! let pages = Pager::new(options).layout(&mut document, SystemSource::collect(systems));
//!
//! assert_eq!(document.npages(), pages);
//! assert_eq!(document.system_order.len(), 12);
//! ```

mod divider;
pub use divider::*;

mod document;
pub use document::*;

mod element;
pub use element::*;

mod error;
pub use error::*;

/// Page allocation, page filling and vertical space distribution
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

mod staff;
pub use staff::*;

mod style;
pub use style::*;

mod system;
pub use system::*;

mod undo;
pub use undo::*;

mod units;
pub use units::*;
