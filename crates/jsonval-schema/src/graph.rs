//! # Schema Graph
//!
//! The immutable artifact a successful parse hands to the caller. Nodes
//! live in an arena indexed by [`SchemaId`]; edges are ids, so recursive
//! schemas form cycles without any ownership cycle.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::ops::Index;

use serde::Serialize;

use crate::constraint::Constraint;
use crate::location::SchemaId;

/// One parsed schema: its metadata and constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    pub(crate) id: SchemaId,
    pub(crate) location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) constraints: Vec<Constraint>,
}

impl SchemaNode {
    pub fn id(&self) -> SchemaId {
        self.id
    }

    /// `<document-uri>#<pointer>` of the schema-bearing value this node
    /// was parsed from.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Outgoing edges, in constraint order. May contain duplicates.
    pub fn subschemas(&self) -> Vec<SchemaId> {
        self.constraints.iter().flat_map(Constraint::subschemas).collect()
    }

    /// Whether this node carries no constraints (accepts every instance).
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// A fully linked schema, possibly cyclic.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaGraph {
    pub(crate) root: SchemaId,
    pub(crate) nodes: Vec<SchemaNode>,
    pub(crate) documents: Vec<String>,
    pub(crate) locations: BTreeMap<String, SchemaId>,
}

impl SchemaGraph {
    pub fn root(&self) -> SchemaId {
        self.root
    }

    pub fn root_node(&self) -> &SchemaNode {
        &self[self.root]
    }

    pub fn node(&self, id: SchemaId) -> Option<&SchemaNode> {
        self.nodes.get(id.index())
    }

    /// All nodes, in id order.
    pub fn nodes(&self) -> &[SchemaNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// URIs of every document the parse loaded. The root document is first.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Find the node for a `<document-uri>#<pointer>` location.
    ///
    /// `$ref` locations are indexed too and map to the node their
    /// reference resolved to.
    pub fn lookup(&self, location: &str) -> Option<SchemaId> {
        self.locations.get(location).copied()
    }

    /// Direct subschemas of `id`, without duplicates.
    pub fn children(&self, id: SchemaId) -> Vec<SchemaId> {
        let mut seen = HashSet::new();
        self.node(id)
            .map(SchemaNode::subschemas)
            .unwrap_or_default()
            .into_iter()
            .filter(|child| seen.insert(*child))
            .collect()
    }

    /// Every node reachable from `id`, including `id`, in breadth-first
    /// order.
    pub fn reachable_from(&self, id: SchemaId) -> Vec<SchemaId> {
        let mut seen = HashSet::from([id]);
        let mut order = Vec::new();
        let mut queue = VecDeque::from([id]);
        while let Some(next) = queue.pop_front() {
            order.push(next);
            for child in self.children(next) {
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        order
    }

    /// Whether any node can reach itself.
    pub fn is_cyclic(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            OnStack,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        for start in 0..self.nodes.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            // (node, its children, next child to visit)
            let mut stack = vec![(start, self.children(SchemaId::new(start)), 0usize)];
            marks[start] = Mark::OnStack;
            while let Some((node, children, cursor)) = stack.last_mut() {
                let Some(child) = children.get(*cursor).map(SchemaId::index) else {
                    marks[*node] = Mark::Done;
                    stack.pop();
                    continue;
                };
                *cursor += 1;
                match marks.get(child).copied() {
                    Some(Mark::OnStack) => return true,
                    Some(Mark::Unvisited) => {
                        marks[child] = Mark::OnStack;
                        let grandchildren = self.children(SchemaId::new(child));
                        stack.push((child, grandchildren, 0));
                    }
                    _ => {}
                }
            }
        }
        false
    }
}

impl Index<SchemaId> for SchemaGraph {
    type Output = SchemaNode;

    fn index(&self, id: SchemaId) -> &SchemaNode {
        &self.nodes[id.index()]
    }
}
