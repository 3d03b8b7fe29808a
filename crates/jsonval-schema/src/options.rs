//! # Parser Options
//!
//! Configuration for one [`SchemaParser`](crate::SchemaParser). Options are
//! plain serde data so they can be loaded from a YAML or JSON file:
//!
//! ```yaml
//! draft: draft4
//! base_uri: https://example.com/schemas/root.json
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON Schema draft whose keyword semantics the parser applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Draft {
    Draft3,
    Draft4,
    #[default]
    Draft7,
}

impl Draft {
    /// The keyword a document uses to declare its own URI.
    pub fn id_keyword(&self) -> &'static str {
        match self {
            Self::Draft3 | Self::Draft4 => "id",
            Self::Draft7 => "$id",
        }
    }

    /// Whether `true` and `false` are valid schemas.
    pub fn allows_boolean_schemas(&self) -> bool {
        matches!(self, Self::Draft7)
    }

    /// Whether `exclusiveMinimum`/`exclusiveMaximum` are boolean modifiers
    /// of `minimum`/`maximum` (Draft 3 and 4) rather than limits of their
    /// own (Draft 7).
    pub fn boolean_exclusive_limits(&self) -> bool {
        matches!(self, Self::Draft3 | Self::Draft4)
    }
}

impl fmt::Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft3 => "draft3",
            Self::Draft4 => "draft4",
            Self::Draft7 => "draft7",
        };
        f.write_str(s)
    }
}

impl FromStr for Draft {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft3" | "3" => Ok(Self::Draft3),
            "draft4" | "4" => Ok(Self::Draft4),
            "draft7" | "7" => Ok(Self::Draft7),
            other => Err(format!(
                "unsupported draft '{other}' (expected draft3, draft4 or draft7)"
            )),
        }
    }
}

/// Options controlling how a schema document is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserOptions {
    /// Keyword semantics to apply.
    pub draft: Draft,
    /// URI of the root document. Overrides the document's own `$id`/`id`.
    /// Relative external `$ref`s are resolved against it.
    pub base_uri: Option<String>,
}

/// Error loading [`ParserOptions`] from a file.
#[derive(Error, Debug)]
pub enum OptionsError {
    /// The file could not be read.
    #[error("cannot read parser options '{path}': {source}")]
    Io {
        /// Path to the options file.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid YAML/JSON or has unknown fields.
    #[error("invalid parser options '{path}': {reason}")]
    Parse {
        /// Path to the options file.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },
}

impl ParserOptions {
    pub fn new(draft: Draft) -> Self {
        Self {
            draft,
            base_uri: None,
        }
    }

    /// Set the root document URI.
    pub fn with_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Load options from a file, choosing the format by extension
    /// (`.json` for JSON, anything else is read as YAML).
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::Io` if the file cannot be read and
    /// `OptionsError::Parse` if it does not describe valid options.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let parsed = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            _ => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|reason| OptionsError::Parse {
            path: path.display().to_string(),
            reason,
        })
    }
}
