//! # jsonval-adapters — Concrete Document Backends
//!
//! Implements [`jsonval_core::Adapter`] for the JSON trees this workspace
//! loads documents into:
//!
//! - [`JsonAdapter`] — borrows a `serde_json::Value`.
//! - [`YamlAdapter`] — borrows a `serde_yaml::Value`. Tags are transparent
//!   and scalar mapping keys are stringified.
//! - [`DocumentRef`] — either of the above, so a single schema parse can
//!   follow `$ref`s from a JSON document into a YAML one.
//!
//! All three are `Copy` handles; none of them own or mutate the tree.

pub mod document;
pub mod json;
pub mod yaml;

pub use document::DocumentRef;
pub use json::JsonAdapter;
pub use yaml::YamlAdapter;
