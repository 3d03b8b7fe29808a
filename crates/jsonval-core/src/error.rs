//! # Error Types — JSON Pointer Resolution
//!
//! Every variant carries the full pointer string so that a failure deep in
//! a schema parse can still be traced to the reference that caused it.

use thiserror::Error;

use crate::adapter::NodeKind;

/// Failure resolving a JSON Pointer against a document.
///
/// Resolution stops at the first failing token; a partially resolved node
/// is never returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// The pointer string is not well-formed.
    #[error("invalid JSON pointer '{pointer}': {reason}")]
    InvalidPointer {
        /// The pointer as supplied by the caller.
        pointer: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An object member or array element does not exist.
    #[error("JSON pointer '{pointer}' does not resolve: no element for reference token '{token}'")]
    NotFound {
        /// The pointer as supplied by the caller.
        pointer: String,
        /// The unescaped reference token that failed to match.
        token: String,
    },

    /// A token cannot be used as an array index.
    #[error("JSON pointer '{pointer}' has an invalid array index '{token}': {reason}")]
    InvalidIndexToken {
        /// The pointer as supplied by the caller.
        pointer: String,
        /// The offending reference token.
        token: String,
        /// Why the token was rejected.
        reason: String,
    },

    /// The pointer tries to descend into a scalar.
    #[error("JSON pointer '{pointer}' cannot descend into a {kind} with reference token '{token}'")]
    NotATraversable {
        /// The pointer as supplied by the caller.
        pointer: String,
        /// The reference token that could not be applied.
        token: String,
        /// Kind of the node the walk stopped at.
        kind: NodeKind,
    },
}

/// Field-less discriminant of [`PointerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerErrorKind {
    InvalidPointer,
    NotFound,
    InvalidIndexToken,
    NotATraversable,
}

impl PointerError {
    pub fn kind(&self) -> PointerErrorKind {
        match self {
            Self::InvalidPointer { .. } => PointerErrorKind::InvalidPointer,
            Self::NotFound { .. } => PointerErrorKind::NotFound,
            Self::InvalidIndexToken { .. } => PointerErrorKind::InvalidIndexToken,
            Self::NotATraversable { .. } => PointerErrorKind::NotATraversable,
        }
    }

    /// The pointer string the failure refers to.
    pub fn pointer(&self) -> &str {
        match self {
            Self::InvalidPointer { pointer, .. }
            | Self::NotFound { pointer, .. }
            | Self::InvalidIndexToken { pointer, .. }
            | Self::NotATraversable { pointer, .. } => pointer,
        }
    }
}
