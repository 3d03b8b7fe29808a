//! # JSON Pointer (RFC 6901)
//!
//! Parsing, canonical rendering, and resolution of JSON Pointers against any
//! [`Adapter`]-backed document.
//!
//! ## Resolution Rules
//!
//! 1. A pointer beginning with `#` is rejected. The fragment marker belongs
//!    to the `$ref` layer and must be stripped by the caller.
//! 2. The empty pointer, and any pointer made only of separators (`/`,
//!    `//`), resolves to the root. Empty reference tokens never descend.
//! 3. Each non-empty token is unescaped (`~1` → `/`, then `~0` → `~`) and
//!    applied as one step:
//!    - object: member lookup, missing member → `NotFound`;
//!    - array: base-10 index without leading zeros; `-` and malformed
//!      tokens → `InvalidIndexToken`, out of range → `NotFound`;
//!    - scalar: `NotATraversable`.
//!
//! The unescape order matters: `~01` must become `~1`, never `/`.

use std::fmt;

use crate::adapter::Adapter;
use crate::error::PointerError;

/// A parsed JSON Pointer: the sequence of unescaped reference tokens.
///
/// Two pointers that address the same location through different spellings
/// (`/a`, `/a/`, `//a//`) parse to equal values. `Display` renders the
/// canonical spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The pointer addressing the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a pointer string.
    ///
    /// # Errors
    ///
    /// Returns `PointerError::InvalidPointer` if the string begins with `#`,
    /// does not begin with `/`, or contains a `~` that is not part of a
    /// `~0`/`~1` escape.
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        if pointer.starts_with('#') {
            return Err(PointerError::InvalidPointer {
                pointer: pointer.to_string(),
                reason: "the '#' fragment marker must be stripped before resolving a JSON pointer"
                    .to_string(),
            });
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PointerError::InvalidPointer {
                pointer: pointer.to_string(),
                reason: "expected reference token to begin with '/'".to_string(),
            });
        };

        let mut tokens = Vec::new();
        for raw in rest.split('/').filter(|t| !t.is_empty()) {
            let token = unescape_token(raw).ok_or_else(|| PointerError::InvalidPointer {
                pointer: pointer.to_string(),
                reason: format!("reference token '{raw}' contains '~' not followed by '0' or '1'"),
            })?;
            tokens.push(token);
        }
        Ok(Self { tokens })
    }

    /// The unescaped reference tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// A pointer one level below this one.
    ///
    /// `token` is taken literally (unescaped). An empty token is kept, so
    /// the member named `""` has an identity distinct from its parent.
    ///
    /// Such a pointer renders with a trailing `/` (`/properties/`), and
    /// [`JsonPointer::parse`] reads that string back as the parent, since
    /// parsing drops empty tokens. Compare pointers, not their strings,
    /// when `""` members matter.
    pub fn child(&self, token: impl Into<String>) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(token.into());
        Self { tokens }
    }

    /// Resolve this pointer against `root`.
    pub fn resolve<A: Adapter>(&self, root: A) -> Result<A, PointerError> {
        walk(root, &self.tokens, &self.to_string())
    }
}

/// Canonical spelling. Not injective over empty tokens: see
/// [`JsonPointer::child`].
impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape_token(token))?;
        }
        Ok(())
    }
}

/// Escape a reference token for embedding in a pointer string.
///
/// `~` is escaped before `/` so that the `~` introduced by `~1` is not
/// escaped a second time.
pub fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Unescape a single reference token.
///
/// Returns `None` if the token contains a `~` that is not followed by `0`
/// or `1`.
pub fn unescape_token(token: &str) -> Option<String> {
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' && !matches!(chars.next(), Some('0' | '1')) {
            return None;
        }
    }
    Some(token.replace("~1", "/").replace("~0", "~"))
}

/// Resolve `pointer` against `root`.
///
/// Pure function of its inputs: the document is only read, so this is safe
/// to call concurrently on a shared tree.
///
/// # Errors
///
/// See the module documentation for the failure taxonomy. Every error names
/// `pointer` as supplied.
pub fn resolve_json_pointer<A: Adapter>(root: A, pointer: &str) -> Result<A, PointerError> {
    let parsed = JsonPointer::parse(pointer)?;
    walk(root, parsed.tokens(), pointer)
}

fn walk<A: Adapter>(root: A, tokens: &[String], pointer: &str) -> Result<A, PointerError> {
    let mut node = root;
    for token in tokens {
        node = step(node, token, pointer)?;
    }
    Ok(node)
}

fn step<A: Adapter>(node: A, token: &str, pointer: &str) -> Result<A, PointerError> {
    let not_found = || PointerError::NotFound {
        pointer: pointer.to_string(),
        token: token.to_string(),
    };

    if node.is_object() {
        return node.object_get(token).ok_or_else(not_found);
    }

    if node.is_array() {
        let index = parse_array_index(token).map_err(|reason| PointerError::InvalidIndexToken {
            pointer: pointer.to_string(),
            token: token.to_string(),
            reason: reason.to_string(),
        })?;
        return index
            .and_then(|i| node.array_get(i))
            .ok_or_else(not_found);
    }

    Err(PointerError::NotATraversable {
        pointer: pointer.to_string(),
        token: token.to_string(),
        kind: node.kind(),
    })
}

/// Parse an array index token.
///
/// `Ok(None)` means the token is a well-formed index too large for `usize`,
/// which can only ever be out of bounds.
fn parse_array_index(token: &str) -> Result<Option<usize>, &'static str> {
    if token == "-" {
        return Err("'-' addresses the element after the last one, which never exists; \
                    it is not supported when resolving a pointer");
    }
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected a non-negative base-10 integer");
    }
    if token.len() > 1 && token.starts_with('0') {
        return Err("leading zeros are not permitted");
    }
    Ok(token.parse::<usize>().ok())
}
