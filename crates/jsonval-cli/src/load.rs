//! # Document Loading
//!
//! Reads JSON or YAML files from disk. The format is chosen by extension:
//! `.json` is parsed as JSON, anything else as YAML (which also accepts
//! plain JSON).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jsonval_adapters::DocumentRef;

/// A parsed document, owned.
#[derive(Debug, Clone)]
pub enum LoadedDocument {
    Json(serde_json::Value),
    Yaml(serde_yaml::Value),
}

impl LoadedDocument {
    /// Load and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if is_json(path) {
            let value = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
            Ok(Self::Json(value))
        } else {
            let value = serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse YAML in {}", path.display()))?;
            Ok(Self::Yaml(value))
        }
    }

    /// Adapter over the document root.
    pub fn node(&self) -> DocumentRef<'_> {
        match self {
            Self::Json(value) => DocumentRef::from(value),
            Self::Yaml(value) => DocumentRef::from(value),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Whether `path` looks like a schema document (`.json`, `.yaml`, `.yml`).
pub fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ["json", "yaml", "yml"]
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Every schema document under `dir`, recursively, in sorted order.
pub fn find_schema_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(next) = pending.pop() {
        let entries = match std::fs::read_dir(&next) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %next.display(), error = %e, "skipping unreadable directory");
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if is_schema_file(&path) {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}
