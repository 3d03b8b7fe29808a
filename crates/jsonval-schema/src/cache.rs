//! # Resolution Cache
//!
//! Per-parse record of which schema locations have been reached and what
//! they resolved to.
//!
//! ## States
//!
//! ```text
//!            begin(None)                     complete(id)
//! Unseen ─────────────────▶ InProgress{None} ───────────────▶ Completed(id)
//!    │                                                              ▲
//!    │       begin(Some(id))                 complete(id)           │
//!    └────────────────────▶ InProgress{Some(id)} ───────────────────┘
//!
//! any state ── fail() ──▶ Failed (terminal)
//! ```
//!
//! - `InProgress { node: None }` marks a `$ref`-only location whose chain is
//!   currently being followed. Reaching it again before the chain ends is a
//!   circular reference.
//! - `InProgress { node: Some(id) }` marks a schema-bearing location whose
//!   node is reserved but whose keywords have not been parsed yet. A `$ref`
//!   reaching it binds to `id`; this is how recursive schemas are built.
//! - `Completed(id)` is final for a successful location. `$ref`-only
//!   locations complete to the id their chain ended at.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::location::{SchemaId, SchemaLocation};

/// Resolution state of one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionState {
    /// Being resolved. `node` is set once a schema node has been reserved.
    InProgress {
        node: Option<SchemaId>,
    },
    /// Resolved to `SchemaId`.
    Completed(SchemaId),
    /// Resolution aborted (terminal).
    Failed,
}

impl ResolutionState {
    /// The node this state is bound to, if any.
    pub fn bound_node(&self) -> Option<SchemaId> {
        match self {
            Self::InProgress { node } => *node,
            Self::Completed(id) => Some(*id),
            Self::Failed => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress { node: None } => f.write_str("IN_PROGRESS"),
            Self::InProgress { node: Some(id) } => write!(f, "IN_PROGRESS({id})"),
            Self::Completed(id) => write!(f, "COMPLETED({id})"),
            Self::Failed => f.write_str("FAILED"),
        }
    }
}

/// A state change the cache refused to make.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid transition from {from} to {to}")]
pub struct TransitionError {
    /// The current state (`UNSEEN` if the location has no entry).
    pub from: String,
    /// The requested state.
    pub to: String,
}

/// Mapping from location identity to [`ResolutionState`].
///
/// Local to one parse; never shared between parses.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    states: HashMap<SchemaLocation, ResolutionState>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, or `None` if the location is unseen.
    pub fn state(&self, location: &SchemaLocation) -> Option<ResolutionState> {
        self.states.get(location).copied()
    }

    /// Mark an unseen location as in progress.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the location already has a state.
    pub fn begin(
        &mut self,
        location: SchemaLocation,
        node: Option<SchemaId>,
    ) -> Result<(), TransitionError> {
        let to = ResolutionState::InProgress { node };
        if let Some(current) = self.states.get(&location) {
            return Err(TransitionError {
                from: current.to_string(),
                to: to.to_string(),
            });
        }
        self.states.insert(location, to);
        Ok(())
    }

    /// Mark an in-progress location as resolved to `id`.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the location is not in progress, or is
    /// in progress bound to a different node.
    pub fn complete(&mut self, location: &SchemaLocation, id: SchemaId) -> Result<(), TransitionError> {
        let to = ResolutionState::Completed(id);
        match self.states.get(location).copied() {
            Some(ResolutionState::InProgress { node }) if node.is_none() || node == Some(id) => {
                self.states.insert(location.clone(), to);
                Ok(())
            }
            Some(current) => Err(TransitionError {
                from: current.to_string(),
                to: to.to_string(),
            }),
            None => Err(TransitionError {
                from: "UNSEEN".to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Mark a location as failed. Allowed from any state.
    pub fn fail(&mut self, location: &SchemaLocation) {
        self.states.insert(location.clone(), ResolutionState::Failed);
    }

    /// Number of locations with a state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
