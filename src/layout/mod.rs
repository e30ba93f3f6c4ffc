//! Page layout: breaking systems into pages and spreading the space that
//! is left over on each page.
//!
//! A layout pass alternates between two steps until the systems run out:
//!
//! - [`get_next_page`] provides the next page (reusing it if an earlier pass
//!   created it) and positions it on the canvas
//! - [`collect_page`] stacks systems on that page at their minimum
//!   distances, decides where the page breaks and then spends the leftover
//!   height, either between systems ([`layout_page`]) or between every pair
//!   of staves ([`distribute_staves`])
//!
//! [`Pager`] drives the whole loop.
//!
//! # Example
//!
//! ```
//! use score_pager::layout::{LayoutOptions, Pager, SystemSource};
//! use score_pager::{Document, Measure, Pt, SysStaff, System};
//!
//! let systems: Vec<System> = (0..20)
//!     .map(|i| System::new(vec![Measure::new(i * 1920)], vec![SysStaff::new(Pt(0.0), Pt(40.0))]))
//!     .collect();
//!
//! let mut document = Document::default();
//! let pager = Pager::new(LayoutOptions::new());
//! let pages = pager.layout(&mut document, SystemSource::Drain(systems.into()));
//!
//! assert!(pages > 1);
//! for page in document.page_order.iter().map(|id| &document.pages[*id]) {
//!     let last = &document.systems[*page.systems.last().unwrap()];
//!     assert!(last.y() + last.height <= page.height() - page.bm());
//! }
//! ```

mod allocate;
mod collect;
mod context;
mod distribute;
mod divider;
mod equalize;
mod finalize;
mod gap;
mod margins;
mod options;
mod pager;

pub use allocate::*;
pub use collect::*;
pub use context::*;
pub use distribute::*;
pub use divider::*;
pub use equalize::*;
pub use finalize::*;
pub use margins::*;
pub use options::*;
pub use pager::*;
