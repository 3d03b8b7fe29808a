//! # Identities
//!
//! Newtype identifiers for schema nodes and loaded documents, and the
//! location key the resolution cache is indexed by.

use std::fmt;

use jsonval_core::JsonPointer;
use serde::{Deserialize, Serialize};

/// Stable identity of a node in a [`SchemaGraph`](crate::SchemaGraph).
///
/// Ids are dense arena indices assigned in reservation order; the root
/// schema is always reserved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(usize);

impl SchemaId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in [`SchemaGraph::nodes`](crate::SchemaGraph::nodes).
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a document loaded during one parse. The root document is
/// always `DocumentId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(usize);

impl DocumentId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Where a schema lives: a document plus a canonical pointer into it.
///
/// Different spellings of the same pointer produce the same location, so
/// `#/a` and `#/a/` share one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaLocation {
    document: DocumentId,
    pointer: JsonPointer,
}

impl SchemaLocation {
    pub fn new(document: DocumentId, pointer: JsonPointer) -> Self {
        Self { document, pointer }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn pointer(&self) -> &JsonPointer {
        &self.pointer
    }

    /// The location of a value nested below this one.
    pub fn join<'t>(&self, tokens: impl IntoIterator<Item = &'t str>) -> Self {
        let pointer = tokens
            .into_iter()
            .fold(self.pointer.clone(), |p, token| p.child(token));
        Self::new(self.document, pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_pointer_spellings_share_a_location() {
        let doc = DocumentId::new(0);
        let a = SchemaLocation::new(doc, JsonPointer::parse("/definitions/a").unwrap());
        let b = SchemaLocation::new(doc, JsonPointer::parse("//definitions//a/").unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_join_appends_literal_tokens() {
        let root = SchemaLocation::new(DocumentId::new(1), JsonPointer::root());
        let child = root.join(["properties", "a/b"]);
        assert_eq!(child.pointer().to_string(), "/properties/a~1b");
        assert_eq!(child.document().index(), 1);
    }

    #[test]
    fn test_same_pointer_in_different_documents_differs() {
        let p = JsonPointer::parse("/a").unwrap();
        assert_ne!(
            SchemaLocation::new(DocumentId::new(0), p.clone()),
            SchemaLocation::new(DocumentId::new(1), p)
        );
    }
}
