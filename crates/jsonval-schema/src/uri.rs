//! URI helpers for `$ref` values.

use std::borrow::Cow;

use jsonval_core::PointerError;
use url::Url;

/// Split a `$ref` into its document part and its fragment (without `#`).
pub(crate) fn split_reference(reference: &str) -> (&str, &str) {
    reference.split_once('#').unwrap_or((reference, ""))
}

/// Percent-decode a `$ref` fragment into the JSON Pointer it spells.
///
/// The pointer resolver itself reads its input literally; decoding is part
/// of reading a URI fragment.
pub(crate) fn decode_fragment(fragment: &str) -> Result<Cow<'_, str>, PointerError> {
    urlencoding::decode(fragment).map_err(|e| PointerError::InvalidPointer {
        pointer: fragment.to_string(),
        reason: format!("fragment does not percent-decode to UTF-8: {e}"),
    })
}

/// Drop any fragment from a document URI.
pub(crate) fn strip_fragment(uri: &str) -> &str {
    split_reference(uri).0
}

/// Resolve `reference` (a document URI, possibly relative) against `base`.
///
/// Absolute bases use RFC 3986 resolution. Relative bases (plain paths such
/// as `schemas/root.json`) replace their final segment.
pub(crate) fn resolve_uri(base: &str, reference: &str) -> String {
    if let Ok(base_url) = Url::parse(base) {
        if let Ok(joined) = base_url.join(reference) {
            return joined.to_string();
        }
    }
    if Url::parse(reference).is_ok() || reference.starts_with('/') {
        return reference.to_string();
    }
    match base.rfind('/') {
        Some(i) => format!("{}{}", &base[..=i], reference),
        None => reference.to_string(),
    }
}
