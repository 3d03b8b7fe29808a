//! # Schema Reference Graph Builder
//!
//! Turns a root schema document into a [`SchemaGraph`].
//!
//! ## Algorithm
//!
//! 1. The root location is *bound*: if it is a schema with keywords, a node
//!    is reserved for it, marked `InProgress` in the [`ResolutionCache`],
//!    and queued.
//! 2. Queued nodes are parsed one at a time. Every subschema keyword value
//!    is bound the same way, which reserves and queues further nodes or
//!    reuses one already known for that location.
//! 3. Binding a location whose value is `{"$ref": ...}` follows the
//!    reference, and keeps following while the target is itself a `$ref`.
//!    Every location on the chain is `InProgress` with no node until the
//!    chain ends at a schema-bearing location, at which point they all
//!    complete to that location's node.
//! 4. A chain that arrives at a location it already passed through has
//!    never met a schema with keywords of its own, so it is rejected as
//!    [`SchemaError::CircularReference`]. A chain that arrives at a
//!    schema-bearing node that is still being parsed (an ancestor) binds
//!    to it: that is a legitimate recursive schema.
//!
//! No step recurses, so schema depth does not consume stack.

use std::collections::{BTreeMap, HashMap, VecDeque};

use jsonval_core::{resolve_json_pointer, Adapter, JsonPointer};

use crate::cache::{ResolutionCache, ResolutionState, TransitionError};
use crate::error::SchemaError;
use crate::graph::SchemaGraph;
use crate::location::{DocumentId, SchemaId, SchemaLocation};
use crate::options::ParserOptions;
use crate::resolver::{ExternalResolver, NoExternalResolver};
use crate::store::SchemaStore;
use crate::uri;

/// Parses schema documents with a fixed set of [`ParserOptions`].
///
/// A parser holds no per-parse state and may be reused, including from
/// several threads at once.
#[derive(Debug, Clone, Default)]
pub struct SchemaParser {
    options: ParserOptions,
}

impl SchemaParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse the schema rooted at `root`, fetching external documents
    /// through `resolver`.
    ///
    /// # Errors
    ///
    /// Any [`SchemaError`]. On error nothing is returned; every partially
    /// built node is dropped.
    pub fn parse<A, R>(&self, root: A, resolver: &mut R) -> Result<SchemaGraph, SchemaError>
    where
        A: Adapter,
        R: ExternalResolver<A>,
    {
        Builder::new(&self.options, resolver).run(root)
    }

    /// Parse a schema that must not reference other documents.
    pub fn parse_local<A: Adapter>(&self, root: A) -> Result<SchemaGraph, SchemaError> {
        self.parse(root, &mut NoExternalResolver)
    }
}

/// Build a schema graph with default options (Draft 7).
///
/// # Errors
///
/// See [`SchemaParser::parse`].
pub fn build_schema<A, R>(root: A, mut resolver: R) -> Result<SchemaGraph, SchemaError>
where
    A: Adapter,
    R: ExternalResolver<A>,
{
    SchemaParser::default().parse(root, &mut resolver)
}

struct Document<A> {
    uri: String,
    root: A,
}

/// A reserved node waiting for its keywords to be parsed.
struct Pending<A> {
    id: SchemaId,
    location: SchemaLocation,
    node: A,
}

/// State of one parse. Dropped as a whole when the parse ends.
pub(crate) struct Builder<'p, A, R> {
    pub(crate) options: &'p ParserOptions,
    resolver: &'p mut R,
    documents: Vec<Document<A>>,
    document_ids: HashMap<String, DocumentId>,
    store: SchemaStore,
    cache: ResolutionCache,
    locations: BTreeMap<String, SchemaId>,
    pending: VecDeque<Pending<A>>,
}

impl<'p, A, R> Builder<'p, A, R>
where
    A: Adapter,
    R: ExternalResolver<A>,
{
    fn new(options: &'p ParserOptions, resolver: &'p mut R) -> Self {
        Self {
            options,
            resolver,
            documents: Vec::new(),
            document_ids: HashMap::new(),
            store: SchemaStore::new(),
            cache: ResolutionCache::new(),
            locations: BTreeMap::new(),
            pending: VecDeque::new(),
        }
    }

    fn run(mut self, root: A) -> Result<SchemaGraph, SchemaError> {
        let uri = self.root_uri(root);
        tracing::debug!(uri = %uri, draft = %self.options.draft, "parsing schema");
        let document = self.register_document(uri, root);
        let root_id = self.bind(SchemaLocation::new(document, JsonPointer::root()), root)?;

        while let Some(Pending { id, location, node }) = self.pending.pop_front() {
            tracing::trace!(location = %self.describe(&location), id = %id, "parsing schema node");
            let body = self.parse_keywords(&location, node)?;
            self.store.fill(id, body);
            self.cache
                .complete(&location, id)
                .map_err(|source| self.transition_error(&location, source))?;
        }

        tracing::debug!(
            nodes = self.store.len(),
            documents = self.documents.len(),
            "schema graph complete"
        );
        let documents = self.documents.into_iter().map(|d| d.uri).collect();
        self.store.into_graph(root_id, documents, self.locations)
    }

    /// URI of the root document: configured base URI, else the document's
    /// own id keyword, else empty.
    fn root_uri(&self, root: A) -> String {
        let declared = || {
            root.object_get(self.options.draft.id_keyword())
                .and_then(|id| id.as_str().map(str::to_string))
        };
        let uri = self.options.base_uri.clone().or_else(declared).unwrap_or_default();
        uri::strip_fragment(&uri).to_string()
    }

    fn register_document(&mut self, uri: String, root: A) -> DocumentId {
        let id = DocumentId::new(self.documents.len());
        self.document_ids.insert(uri.clone(), id);
        self.documents.push(Document { uri, root });
        id
    }

    /// Root node of the document at `uri`, fetching it on first use.
    fn load_document(&mut self, uri: &str) -> Result<DocumentId, SchemaError> {
        if let Some(id) = self.document_ids.get(uri) {
            return Ok(*id);
        }
        tracing::debug!(uri = %uri, "fetching external schema document");
        let root = self.resolver.fetch(uri).map_err(|source| SchemaError::External {
            uri: uri.to_string(),
            source,
        })?;
        Ok(self.register_document(uri.to_string(), root))
    }

    /// `<document-uri>#<pointer>` for diagnostics and the location index.
    pub(crate) fn describe(&self, location: &SchemaLocation) -> String {
        let uri = self
            .documents
            .get(location.document().index())
            .map(|d| d.uri.as_str())
            .unwrap_or_default();
        format!("{uri}#{}", location.pointer())
    }

    fn transition_error(&self, location: &SchemaLocation, source: TransitionError) -> SchemaError {
        SchemaError::InvalidTransition {
            location: self.describe(location),
            source,
        }
    }

    /// Resolve the schema at `location` (whose value is `node`) to a node
    /// id, following `$ref` chains.
    pub(crate) fn bind(&mut self, location: SchemaLocation, node: A) -> Result<SchemaId, SchemaError> {
        let mut chain = Vec::new();
        match self.follow(location, node, &mut chain) {
            Ok(id) => {
                for member in &chain {
                    self.cache
                        .complete(member, id)
                        .map_err(|source| self.transition_error(member, source))?;
                    let described = self.describe(member);
                    self.locations.insert(described, id);
                }
                Ok(id)
            }
            Err(err) => {
                for member in &chain {
                    self.cache.fail(member);
                }
                Err(err)
            }
        }
    }

    fn follow(
        &mut self,
        mut location: SchemaLocation,
        mut node: A,
        chain: &mut Vec<SchemaLocation>,
    ) -> Result<SchemaId, SchemaError> {
        loop {
            match self.cache.state(&location) {
                Some(ResolutionState::InProgress { node: Some(id) })
                | Some(ResolutionState::Completed(id)) => return Ok(id),
                Some(ResolutionState::InProgress { node: None }) => {
                    return Err(self.circular(&location, chain));
                }
                Some(ResolutionState::Failed) | None => {}
            }

            let Some(reference) = self.reference_of(&location, node)? else {
                return self.reserve(location, node);
            };

            self.cache
                .begin(location.clone(), None)
                .map_err(|source| self.transition_error(&location, source))?;
            chain.push(location.clone());

            let (target, target_node) = self.resolve_reference(&location, &reference)?;
            tracing::debug!(
                from = %self.describe(&location),
                to = %self.describe(&target),
                "following $ref"
            );
            location = target;
            node = target_node;
        }
    }

    /// Reserve and queue a node for a schema-bearing location.
    fn reserve(&mut self, location: SchemaLocation, node: A) -> Result<SchemaId, SchemaError> {
        let described = self.describe(&location);
        let id = self.store.reserve(described.clone());
        self.cache
            .begin(location.clone(), Some(id))
            .map_err(|source| self.transition_error(&location, source))?;
        self.locations.insert(described, id);
        self.pending.push_back(Pending { id, location, node });
        Ok(id)
    }

    fn circular(&self, location: &SchemaLocation, chain: &[SchemaLocation]) -> SchemaError {
        let start = chain.iter().position(|l| l == location).unwrap_or(0);
        let mut members: Vec<String> = chain[start..].iter().map(|l| self.describe(l)).collect();
        let reference = self.describe(location);
        members.push(reference.clone());
        tracing::warn!(reference = %reference, chain = %members.join(" -> "), "rejecting circular $ref");
        SchemaError::CircularReference {
            reference,
            chain: members,
        }
    }

    /// The `$ref` string of a schema object, if it has one.
    fn reference_of(&self, location: &SchemaLocation, node: A) -> Result<Option<String>, SchemaError> {
        let Some(value) = node.object_get("$ref") else {
            return Ok(None);
        };
        match value.as_str() {
            Some(reference) => Ok(Some(reference.to_string())),
            None => Err(SchemaError::InvalidKeyword {
                location: self.describe(location),
                keyword: "$ref".to_string(),
                reason: format!("expected a string, found {}", value.kind()),
            }),
        }
    }

    /// Locate the target of `reference`, made from the schema at `from`.
    fn resolve_reference(
        &mut self,
        from: &SchemaLocation,
        reference: &str,
    ) -> Result<(SchemaLocation, A), SchemaError> {
        let (document_part, fragment) = uri::split_reference(reference);
        let document = if document_part.is_empty() {
            from.document()
        } else {
            let target_uri = uri::resolve_uri(&self.scope_of(from), document_part);
            self.load_document(&target_uri)?
        };

        let pointer_error = |source| SchemaError::ReferenceResolution {
            reference: reference.to_string(),
            location: self.describe(from),
            source,
        };
        let fragment = uri::decode_fragment(fragment).map_err(pointer_error)?;
        let root = self.documents[document.index()].root;
        let target = resolve_json_pointer(root, &fragment).map_err(pointer_error)?;
        let pointer = JsonPointer::parse(&fragment).map_err(pointer_error)?;
        Ok((SchemaLocation::new(document, pointer), target))
    }

    /// Base URI in effect at `location`: the document URI, re-based by
    /// every id keyword below the document root on the way down.
    fn scope_of(&self, location: &SchemaLocation) -> String {
        let Some(document) = self.documents.get(location.document().index()) else {
            return String::new();
        };
        let mut base = document.uri.clone();
        let mut node = document.root;
        for token in location.pointer().tokens() {
            let next = if node.is_array() {
                token.parse().ok().and_then(|i| node.array_get(i))
            } else {
                node.object_get(token)
            };
            let Some(next) = next else {
                break;
            };
            node = next;
            if let Some(id) = self.declared_id(node) {
                base = uri::resolve_uri(&base, &id);
            }
        }
        base
    }

    /// The document part of a schema's own id keyword. A schema with a
    /// `$ref` declares nothing.
    fn declared_id(&self, node: A) -> Option<String> {
        if node.object_get("$ref").is_some() {
            return None;
        }
        let id = node.object_get(self.options.draft.id_keyword())?;
        let declared = uri::strip_fragment(id.as_str()?);
        (!declared.is_empty()).then(|| declared.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{AdditionalSchema, Constraint};
    use crate::options::Draft;
    use crate::resolver::{LocalDocumentResolver, ResolverError};
    use jsonval_adapters::JsonAdapter;
    use jsonval_core::PointerErrorKind;
    use serde_json::{json, Value};

    fn parse(doc: &Value) -> Result<SchemaGraph, SchemaError> {
        SchemaParser::default().parse_local(JsonAdapter::new(doc))
    }

    fn property(graph: &SchemaGraph, id: SchemaId, name: &str) -> SchemaId {
        graph[id]
            .constraints()
            .iter()
            .find_map(|c| match c {
                Constraint::Properties { properties, .. } => properties.get(name).copied(),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no property '{name}' on {id}"))
    }

    #[test]
    fn test_self_reference_with_no_content_is_circular() {
        let err = parse(&json!({"$ref": "#"})).unwrap_err();
        match err {
            SchemaError::CircularReference { reference, chain } => {
                assert_eq!(reference, "#");
                assert_eq!(chain, ["#", "#"]);
            }
            other => panic!("Expected CircularReference, got: {other}"),
        }
    }

    #[test]
    fn test_mutual_reference_loop_is_circular() {
        let doc = json!({
            "definitions": {
                "a": {"$ref": "#/definitions/b"},
                "b": {"$ref": "#/definitions/a"}
            },
            "properties": {"x": {"$ref": "#/definitions/a"}}
        });
        let err = parse(&doc).unwrap_err();
        match err {
            SchemaError::CircularReference { chain, .. } => {
                assert_eq!(
                    chain,
                    ["#/definitions/a", "#/definitions/b", "#/definitions/a"]
                );
            }
            other => panic!("Expected CircularReference, got: {other}"),
        }
    }

    #[test]
    fn test_recursive_schema_binds_to_ancestor() {
        let doc = json!({
            "type": "object",
            "properties": {
                "value": {"type": "integer"},
                "next": {"$ref": "#"}
            }
        });
        let graph = parse(&doc).unwrap();
        let next = property(&graph, graph.root(), "next");
        assert_eq!(next, graph.root());
        assert!(graph.is_cyclic());
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.lookup("#/properties/next"), Some(graph.root()));
    }

    #[test]
    fn test_reference_chain_collapses_to_target() {
        let doc = json!({
            "definitions": {
                "a": {"$ref": "#/definitions/b"},
                "b": {"$ref": "#/definitions/c"},
                "c": {"type": "string"}
            },
            "properties": {"x": {"$ref": "#/definitions/a"}}
        });
        let graph = parse(&doc).unwrap();
        let x = property(&graph, graph.root(), "x");
        assert_eq!(graph.lookup("#/definitions/c"), Some(x));
        assert_eq!(graph.lookup("#/definitions/a"), Some(x));
        assert_eq!(graph.lookup("#/definitions/b"), Some(x));
        assert!(!graph.is_cyclic());
    }

    #[test]
    fn test_shared_definition_is_parsed_once() {
        let doc = json!({
            "definitions": {"name": {"type": "string", "minLength": 1}},
            "properties": {
                "first": {"$ref": "#/definitions/name"},
                "last": {"$ref": "#/definitions/name"},
                "nick": {"allOf": [{"$ref": "#/definitions/name"}]}
            }
        });
        let graph = parse(&doc).unwrap();
        let first = property(&graph, graph.root(), "first");
        let last = property(&graph, graph.root(), "last");
        assert_eq!(first, last);
        let nick = property(&graph, graph.root(), "nick");
        assert_eq!(graph.children(nick), [first]);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_unreferenced_definitions_are_not_parsed() {
        let doc = json!({
            "definitions": {"broken": {"$ref": "#/nowhere"}},
            "type": "object"
        });
        let graph = parse(&doc).unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_missing_pointer_target_is_reference_failure() {
        let doc = json!({"properties": {"a": {"$ref": "#/definitions/missing"}}});
        let err = parse(&doc).unwrap_err();
        match err {
            SchemaError::ReferenceResolution {
                reference,
                location,
                source,
            } => {
                assert_eq!(reference, "#/definitions/missing");
                assert_eq!(location, "#/properties/a");
                assert_eq!(source.kind(), PointerErrorKind::NotFound);
            }
            other => panic!("Expected ReferenceResolution, got: {other}"),
        }
    }

    #[test]
    fn test_reference_into_scalar_is_reference_failure() {
        let doc = json!({"title": "t", "items": {"$ref": "#/title/x"}});
        let err = parse(&doc).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::ReferenceResolution { ref source, .. }
                if source.kind() == PointerErrorKind::NotATraversable
        ));
    }

    #[test]
    fn test_plain_name_fragment_is_rejected() {
        let doc = json!({"items": {"$ref": "#item"}});
        let err = parse(&doc).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::ReferenceResolution { ref source, .. }
                if source.kind() == PointerErrorKind::InvalidPointer
        ));
    }

    #[test]
    fn test_non_string_ref_is_invalid_keyword() {
        let err = parse(&json!({"items": {"$ref": 5}})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidKeyword { ref keyword, .. } if keyword == "$ref"));
    }

    #[test]
    fn test_external_reference_is_fetched_once() {
        let root = json!({
            "properties": {
                "a": {"$ref": "common.json#/definitions/id"},
                "b": {"$ref": "common.json#/definitions/id"},
                "c": {"$ref": "common.json"}
            }
        });
        let common = json!({"definitions": {"id": {"type": "integer"}}, "type": "object"});
        let mut fetched = Vec::new();
        let mut resolver = |uri: &str| {
            fetched.push(uri.to_string());
            Ok::<_, ResolverError>(JsonAdapter::new(&common))
        };
        let graph = SchemaParser::default()
            .parse(JsonAdapter::new(&root), &mut resolver)
            .unwrap();
        assert_eq!(fetched, ["common.json"]);
        assert_eq!(graph.documents(), ["", "common.json"]);
        let a = property(&graph, graph.root(), "a");
        let b = property(&graph, graph.root(), "b");
        assert_eq!(a, b);
        assert_eq!(graph[a].location(), "common.json#/definitions/id");
    }

    #[test]
    fn test_external_reference_uses_base_uri() {
        let root = json!({
            "$id": "http://example.com/schemas/root.json",
            "items": {"$ref": "item.json"}
        });
        let item = json!({"type": "string"});
        let mut resolver = LocalDocumentResolver::new();
        resolver.insert("http://example.com/schemas/item.json", JsonAdapter::new(&item));
        let graph = SchemaParser::default()
            .parse(JsonAdapter::new(&root), &mut resolver)
            .unwrap();
        assert_eq!(
            graph.documents(),
            ["http://example.com/schemas/root.json", "http://example.com/schemas/item.json"]
        );
        assert_eq!(
            graph.lookup("http://example.com/schemas/item.json#"),
            Some(SchemaId::new(1))
        );
    }

    #[test]
    fn test_percent_encoded_fragment_is_decoded() {
        let doc = json!({
            "definitions": {
                "percent%field": {"type": "integer"},
                "slash/field": {"type": "string"}
            },
            "properties": {
                "p": {"$ref": "#/definitions/percent%25field"},
                "s": {"$ref": "#/definitions/slash~1field"}
            }
        });
        let graph = parse(&doc).unwrap();
        let p = property(&graph, graph.root(), "p");
        assert_eq!(graph.lookup("#/definitions/percent%field"), Some(p));
        assert_eq!(graph[p].location(), "#/definitions/percent%field");
        let s = property(&graph, graph.root(), "s");
        assert_eq!(graph.lookup("#/definitions/slash~1field"), Some(s));
    }

    #[test]
    fn test_undecodable_fragment_is_reference_failure() {
        let err = parse(&json!({"items": {"$ref": "#/definitions/%FF"}})).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::ReferenceResolution { ref source, .. }
                if source.kind() == PointerErrorKind::InvalidPointer
        ));
    }

    #[test]
    fn test_nested_id_changes_resolution_scope() {
        let root = json!({
            "$id": "http://x.com/root.json",
            "properties": {
                "a": {"$id": "http://x.com/sub/", "items": {"$ref": "item.json"}},
                "b": {"$ref": "item.json"}
            }
        });
        let item = json!({"type": "string"});
        let mut fetched = Vec::new();
        let mut resolver = |uri: &str| {
            fetched.push(uri.to_string());
            Ok::<_, ResolverError>(JsonAdapter::new(&item))
        };
        let graph = SchemaParser::default()
            .parse(JsonAdapter::new(&root), &mut resolver)
            .unwrap();
        // `b` follows its reference while the root is parsed; `a` is parsed later.
        assert_eq!(fetched, ["http://x.com/item.json", "http://x.com/sub/item.json"]);
        assert_eq!(graph.documents().len(), 3);
    }

    #[test]
    fn test_relative_nested_id_applies_to_reference_targets() {
        let root = json!({
            "id": "http://x.com/schemas/root.json",
            "definitions": {
                "nested": {"id": "deeper/", "items": {"$ref": "leaf.json"}}
            },
            "properties": {"n": {"$ref": "#/definitions/nested"}}
        });
        let leaf = json!({"type": "boolean"});
        let mut resolver = LocalDocumentResolver::new();
        resolver.insert("http://x.com/schemas/deeper/leaf.json", JsonAdapter::new(&leaf));
        let options = ParserOptions {
            draft: Draft::Draft4,
            ..ParserOptions::default()
        };
        let graph = SchemaParser::new(options)
            .parse(JsonAdapter::new(&root), &mut resolver)
            .unwrap();
        assert_eq!(
            graph.documents(),
            ["http://x.com/schemas/root.json", "http://x.com/schemas/deeper/leaf.json"]
        );
    }

    #[test]
    fn test_id_beside_ref_does_not_change_scope() {
        let root = json!({
            "$id": "http://x.com/root.json",
            "items": {"$id": "http://other.org/", "$ref": "item.json"}
        });
        let item = json!({"type": "string"});
        let mut resolver = LocalDocumentResolver::new();
        resolver.insert("http://x.com/item.json", JsonAdapter::new(&item));
        let graph = SchemaParser::default()
            .parse(JsonAdapter::new(&root), &mut resolver)
            .unwrap();
        assert_eq!(graph.documents()[1], "http://x.com/item.json");
    }

    #[test]
    fn test_reference_back_into_root_document_by_uri() {
        let root = json!({
            "$id": "http://example.com/root.json",
            "type": "array",
            "items": {"$ref": "http://example.com/root.json#"}
        });
        let graph = SchemaParser::default()
            .parse_local(JsonAdapter::new(&root))
            .unwrap();
        assert_eq!(graph.len(), 1);
        assert!(graph.is_cyclic());
    }

    #[test]
    fn test_external_resolver_failure_passes_through() {
        #[derive(Debug, thiserror::Error)]
        #[error("disk on fire")]
        struct DiskError;

        fn failing<'a>(_: &str) -> Result<JsonAdapter<'a>, ResolverError> {
            Err(Box::new(DiskError))
        }

        let root = json!({"items": {"$ref": "gone.json"}});
        let err = SchemaParser::default()
            .parse(JsonAdapter::new(&root), &mut failing)
            .unwrap_err();
        match err {
            SchemaError::External { uri, source } => {
                assert_eq!(uri, "gone.json");
                assert!(source.downcast_ref::<DiskError>().is_some());
            }
            other => panic!("Expected External, got: {other}"),
        }
    }

    #[test]
    fn test_no_resolver_rejects_external_refs() {
        let err = parse(&json!({"items": {"$ref": "other.json#/a"}})).unwrap_err();
        assert!(matches!(err, SchemaError::External { .. }));
    }

    #[test]
    fn test_cross_document_circular_reference() {
        let root = json!({"items": {"$ref": "b.json"}});
        let b = json!({"$ref": "c.json"});
        let c = json!({"$ref": "b.json"});
        let mut resolver = LocalDocumentResolver::new();
        resolver.insert("b.json", JsonAdapter::new(&b));
        resolver.insert("c.json", JsonAdapter::new(&c));
        let err = SchemaParser::default()
            .parse(JsonAdapter::new(&root), &mut resolver)
            .unwrap_err();
        match err {
            SchemaError::CircularReference { chain, .. } => {
                assert_eq!(chain, ["b.json#", "c.json#", "b.json#"]);
            }
            other => panic!("Expected CircularReference, got: {other}"),
        }
    }

    #[test]
    fn test_deeply_nested_schema_does_not_overflow() {
        let mut doc = json!({"type": "string"});
        for _ in 0..1_000 {
            doc = json!({"items": doc});
        }
        let graph = parse(&doc).unwrap();
        assert_eq!(graph.len(), 1_001);
        assert!(!graph.is_cyclic());
    }

    #[test]
    fn test_additional_properties_schema_is_linked() {
        let doc = json!({"additionalProperties": {"$ref": "#"}, "minProperties": 1});
        let graph = parse(&doc).unwrap();
        let additional = graph.root_node().constraints().iter().find_map(|c| match c {
            Constraint::Properties { additional, .. } => Some(*additional),
            _ => None,
        });
        assert_eq!(additional, Some(AdditionalSchema::Schema(graph.root())));
    }

    #[test]
    fn test_parser_is_reusable_across_threads() {
        let parser = SchemaParser::default();
        let doc = json!({"properties": {"a": {"$ref": "#"}}, "type": "object"});
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let graph = parser.parse_local(JsonAdapter::new(&doc)).unwrap();
                    assert!(graph.is_cyclic());
                });
            }
        });
    }
}
