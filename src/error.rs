use crate::style::{StyleId, StyleKind};
use thiserror::Error;

/// Result type alias for fallible document operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// All errors that the crate can generate. The layout passes themselves
/// never fail; these cover configuration and edit history.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("style {id:?} holds a {expected:?} value, got a {found:?} value")]
    /// A style value was set with the wrong kind of value
    StyleKind {
        id: StyleId,
        expected: StyleKind,
        found: StyleKind,
    },

    #[error("the staff space must be given in points")]
    /// The staff space was set relative to itself
    RelativeSpatium,

    #[error("system {0} is not part of the document")]
    /// An edit referred to a system that no longer exists
    SystemMissing(usize),

    #[error("nothing to undo")]
    /// Undo was requested with an empty history
    NothingToUndo,

    #[error("nothing to redo")]
    /// Redo was requested with nothing undone
    NothingToRedo,
}
