//! # Error Types — Schema Graph Construction
//!
//! Every failure aborts the whole parse. Locations are rendered as
//! `<document-uri>#<json-pointer>`.

use jsonval_core::{NodeKind, PointerError};
use thiserror::Error;

use crate::cache::TransitionError;
use crate::resolver::ResolverError;

/// Failure building a [`SchemaGraph`](crate::SchemaGraph).
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A `$ref` pointer could not be resolved in its target document.
    #[error("cannot resolve $ref '{reference}' at {location}: {source}")]
    ReferenceResolution {
        /// The `$ref` value as written.
        reference: String,
        /// Location of the schema containing the `$ref`.
        location: String,
        /// The pointer resolver's failure.
        source: PointerError,
    },

    /// The external resolver failed to supply a referenced document.
    #[error("external resolver failed for '{uri}': {source}")]
    External {
        /// The resolved document URI that was requested.
        uri: String,
        /// The resolver's own error, passed through unchanged.
        source: ResolverError,
    },

    /// A `$ref` chain loops back to itself without reaching any schema
    /// keywords, so it can never describe a value.
    #[error("circular $ref at {reference}: {}", chain.join(" -> "))]
    CircularReference {
        /// The location at which the loop closed.
        reference: String,
        /// Every location on the loop, in the order it was followed.
        chain: Vec<String>,
    },

    /// A keyword value has the wrong shape.
    #[error("invalid '{keyword}' at {location}: {reason}")]
    InvalidKeyword {
        /// Location of the schema containing the keyword.
        location: String,
        /// The keyword name.
        keyword: String,
        /// What is wrong with its value.
        reason: String,
    },

    /// A value in schema position is neither an object nor, where the draft
    /// allows it, a boolean.
    #[error("value at {location} is a {kind}, not a schema")]
    NotASchema {
        /// Location of the offending value.
        location: String,
        /// Its node kind.
        kind: NodeKind,
    },

    /// The resolution cache rejected a state change.
    #[error("resolution state error at {location}: {source}")]
    InvalidTransition {
        /// The location whose state was being changed.
        location: String,
        /// The rejected transition.
        source: TransitionError,
    },

    /// A node was reserved in the store but never parsed.
    #[error("schema node at {location} was reserved but never parsed")]
    UnfinishedNode {
        /// Location of the reserved node.
        location: String,
    },
}
