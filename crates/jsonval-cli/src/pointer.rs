//! # Pointer Subcommand
//!
//! `jsonval pointer <FILE> <POINTER>`: print the value a JSON Pointer
//! refers to, as pretty JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use jsonval_core::{freeze, resolve_json_pointer, Adapter};

use crate::load::LoadedDocument;

/// Arguments for the `jsonval pointer` subcommand.
#[derive(Args, Debug)]
pub struct PointerArgs {
    /// JSON or YAML document to read.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// JSON Pointer, e.g. `/definitions/a` or `#/definitions/a`.
    #[arg(value_name = "POINTER", allow_hyphen_values = true)]
    pub pointer: String,
}

/// Execute the pointer subcommand.
pub fn run_pointer(args: &PointerArgs) -> Result<u8> {
    let document = LoadedDocument::load(&args.path)?;
    println!("{}", resolve_to_json(&document, &args.pointer)?);
    Ok(0)
}

/// Resolve `pointer` in `document` and render the target as pretty JSON.
///
/// A leading `#` (URI fragment form) is stripped first.
pub fn resolve_to_json(document: &LoadedDocument, pointer: &str) -> Result<String> {
    let pointer = pointer.strip_prefix('#').unwrap_or(pointer);
    let target = resolve_json_pointer(document.node(), pointer)
        .with_context(|| format!("failed to resolve pointer '{pointer}'"))?;
    tracing::debug!(pointer, kind = %target.kind(), "resolved pointer");
    serde_json::to_string_pretty(&freeze(target)).context("failed to render JSON")
}
