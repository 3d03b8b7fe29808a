//! # External Resolution
//!
//! How the parser obtains documents named by non-local `$ref`s. Loading
//! (files, network, caches) is the caller's business; the parser only asks
//! for a document by its resolved URI and treats the call as synchronous.
//!
//! Each URI is requested at most once per parse.

use std::collections::HashMap;

use jsonval_core::Adapter;

/// Error type external resolvers report. It is carried unchanged inside
/// [`SchemaError::External`](crate::SchemaError::External).
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

/// Supplies the root node of an external document.
pub trait ExternalResolver<A: Adapter> {
    /// Fetch the document identified by `uri` (no fragment).
    fn fetch(&mut self, uri: &str) -> Result<A, ResolverError>;
}

impl<A, F> ExternalResolver<A> for F
where
    A: Adapter,
    F: FnMut(&str) -> Result<A, ResolverError>,
{
    fn fetch(&mut self, uri: &str) -> Result<A, ResolverError> {
        self(uri)
    }
}

/// Resolver that rejects every external reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalResolver;

impl<A: Adapter> ExternalResolver<A> for NoExternalResolver {
    fn fetch(&mut self, uri: &str) -> Result<A, ResolverError> {
        Err(format!("no external resolver is configured; cannot load '{uri}'").into())
    }
}

/// In-memory registry of already loaded documents.
///
/// Lookup tries the exact URI first, then falls back to matching the final
/// path segment (the bare file name), so that `schemas/a.json`,
/// `./a.json` and `https://example.com/x/a.json` all find a document
/// registered as `a.json`. Network access is never attempted.
#[derive(Debug, Clone)]
pub struct LocalDocumentResolver<A> {
    by_uri: HashMap<String, A>,
    by_file_name: HashMap<String, A>,
}

impl<A> Default for LocalDocumentResolver<A> {
    fn default() -> Self {
        Self {
            by_uri: HashMap::new(),
            by_file_name: HashMap::new(),
        }
    }
}

impl<A: Adapter> LocalDocumentResolver<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under `uri`.
    pub fn insert(&mut self, uri: impl Into<String>, document: A) {
        let uri = uri.into();
        self.by_file_name
            .insert(file_name(&uri).to_string(), document);
        self.by_uri.insert(uri, document);
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.by_uri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.lookup(uri).is_some()
    }

    fn lookup(&self, uri: &str) -> Option<A> {
        self.by_uri
            .get(uri)
            .or_else(|| self.by_file_name.get(file_name(uri)))
            .copied()
    }
}

impl<A: Adapter> ExternalResolver<A> for LocalDocumentResolver<A> {
    fn fetch(&mut self, uri: &str) -> Result<A, ResolverError> {
        self.lookup(uri)
            .ok_or_else(|| format!("document '{uri}' is not registered").into())
    }
}

/// Final path segment of a URI or path.
fn file_name(uri: &str) -> &str {
    uri.rsplit(['/', '\\']).next().unwrap_or(uri)
}
