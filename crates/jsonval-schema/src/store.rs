//! # Schema Node Store
//!
//! Arena owning every schema node for the duration of one parse. A node is
//! *reserved* (given its [`SchemaId`]) as soon as its location is reached,
//! and *filled* once its keywords are parsed. References bind to the id,
//! so a node can be pointed at while it is still being built.

use std::collections::BTreeMap;

use crate::constraint::Constraint;
use crate::error::SchemaError;
use crate::graph::{SchemaGraph, SchemaNode};
use crate::location::SchemaId;

/// Parsed content of a node, ready to be stored.
#[derive(Debug, Default)]
pub(crate) struct NodeBody {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) constraints: Vec<Constraint>,
}

#[derive(Debug)]
struct Slot {
    location: String,
    node: Option<SchemaNode>,
}

#[derive(Debug, Default)]
pub(crate) struct SchemaStore {
    slots: Vec<Slot>,
}

impl SchemaStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a node that will be parsed later.
    pub(crate) fn reserve(&mut self, location: String) -> SchemaId {
        let id = SchemaId::new(self.slots.len());
        self.slots.push(Slot {
            location,
            node: None,
        });
        id
    }

    /// Store the parsed body of a reserved node.
    pub(crate) fn fill(&mut self, id: SchemaId, body: NodeBody) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            slot.node = Some(SchemaNode {
                id,
                location: slot.location.clone(),
                title: body.title,
                description: body.description,
                constraints: body.constraints,
            });
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Hand the finished nodes over as an immutable graph.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnfinishedNode` if any reserved node was never
    /// filled.
    pub(crate) fn into_graph(
        self,
        root: SchemaId,
        documents: Vec<String>,
        locations: BTreeMap<String, SchemaId>,
    ) -> Result<SchemaGraph, SchemaError> {
        let nodes = self
            .slots
            .into_iter()
            .map(|slot| {
                slot.node.ok_or(SchemaError::UnfinishedNode {
                    location: slot.location,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SchemaGraph {
            root,
            nodes,
            documents,
            locations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_and_stable() {
        let mut store = SchemaStore::new();
        let a = store.reserve("#".into());
        let b = store.reserve("#/properties/x".into());
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_filled_store_becomes_graph() {
        let mut store = SchemaStore::new();
        let root = store.reserve("#".into());
        store.fill(
            root,
            NodeBody {
                title: Some("root".into()),
                ..NodeBody::default()
            },
        );
        let graph = store.into_graph(root, vec![String::new()], BTreeMap::new()).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.root_node().title(), Some("root"));
        assert_eq!(graph.root_node().location(), "#");
    }

    #[test]
    fn test_unfilled_slot_is_an_error() {
        let mut store = SchemaStore::new();
        let root = store.reserve("#".into());
        store.reserve("#/items".into());
        store.fill(root, NodeBody::default());
        let err = store
            .into_graph(root, vec![String::new()], BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnfinishedNode { location } if location == "#/items"));
    }
}
