//! # jsonval-schema — Schema Reference Graph Construction
//!
//! Parses a JSON Schema document, seen through any
//! [`jsonval_core::Adapter`], into a [`SchemaGraph`]: an arena of typed
//! [`SchemaNode`]s whose `$ref`s, `properties`, `items`, `allOf`, ... are
//! resolved to [`SchemaId`] edges.
//!
//! ## Reference Resolution
//!
//! - Local references (`#/definitions/a`) are resolved with the JSON Pointer
//!   resolver against the referring document.
//! - External references (`other.json#/a`) are fetched once per parse
//!   through an [`ExternalResolver`] supplied by the caller.
//! - Recursive schemas are legal: a `$ref` back to an ancestor binds to the
//!   ancestor's (possibly still unparsed) node, and the graph contains a
//!   cycle.
//! - A `$ref` chain that loops back on itself without ever reaching a schema
//!   with its own keywords is rejected with
//!   [`SchemaError::CircularReference`].
//!
//! ## Construction Model
//!
//! Parsing is iterative. A worklist of reserved nodes drives keyword
//! parsing and `$ref` chains are followed in a loop, with a per-parse
//! [`ResolutionCache`] recording which locations are in progress or
//! complete. Stack depth does not grow with schema depth.
//!
//! ## Crate Policy
//!
//! - Parsing is atomic: on any error no graph is returned.
//! - The resolution cache never outlives one parse.
//! - Unreferenced `definitions` are not parsed.

pub mod cache;
pub mod constraint;
pub mod error;
pub mod graph;
pub mod location;
pub mod options;
pub mod parser;
pub mod resolver;

mod keywords;
mod store;
mod uri;

pub use cache::{ResolutionCache, ResolutionState, TransitionError};
pub use constraint::{AdditionalSchema, Constraint, Dependency, Items};
pub use error::SchemaError;
pub use graph::{SchemaGraph, SchemaNode};
pub use location::{DocumentId, SchemaId, SchemaLocation};
pub use options::{Draft, OptionsError, ParserOptions};
pub use parser::{build_schema, SchemaParser};
pub use resolver::{ExternalResolver, LocalDocumentResolver, NoExternalResolver, ResolverError};
