//! # jsonval-cli — Command-Line Interface
//!
//! ## Subcommands
//!
//! - `pointer` — resolve a JSON Pointer in a JSON or YAML document
//! - `schema` — build a schema's reference graph and summarize it
//!
//! ## Crate Policy
//!
//! - Argument parsing lives with each subcommand; handlers return an exit
//!   code and delegate to the library crates.
//! - Logs go to stderr so that stdout carries only command output.
//!
//! ## Usage
//!
//! ```text
//! jsonval pointer config.yaml '#/servers/0/host'
//! jsonval schema schemas/root.schema.json --draft draft4 --json
//! ```

pub mod load;
pub mod pointer;
pub mod schema;
