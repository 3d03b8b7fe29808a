//! # jsonval-core — Document Abstraction and JSON Pointer Resolution
//!
//! This crate is the leaf of the jsonval crate DAG. It defines the
//! representation-agnostic view of a JSON-like document that every other
//! crate consumes, and the JSON Pointer resolver built on top of it.
//!
//! ## Key Design Principles
//!
//! 1. **Capability interface, not a tree type.** [`Adapter`] exposes node
//!    kind, scalar reads, array and object access, and equality. Nothing in
//!    this crate knows which JSON library produced the document.
//!
//! 2. **Pure pointer resolution.** [`resolve_json_pointer`] is a function of
//!    `(root, pointer)`. It never mutates the document and may be called
//!    concurrently on shared read-only trees.
//!
//! 3. **Canonical pointer identity.** [`JsonPointer`] drops no-op empty
//!    tokens and renders canonically, so `/a`, `/a/` and `//a//` compare
//!    equal. The schema layer keys its resolution cache on this form.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsonval-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod adapter;
pub mod error;
pub mod frozen;
pub mod pointer;

// Re-export primary types for ergonomic imports.
pub use adapter::{Adapter, JsonType, NodeKind};
pub use error::{PointerError, PointerErrorKind};
pub use frozen::{freeze, FrozenValue};
pub use pointer::{escape_token, resolve_json_pointer, unescape_token, JsonPointer};
