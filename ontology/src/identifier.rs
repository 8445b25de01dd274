//! Identifier normalization at the query boundary.
//!
//! Callers may address an entity by its bare local name (`"john-doe"`) or by
//! its full IRI. Every query that accepts an identifier runs it through
//! [`normalize`] before touching the store.

use std::borrow::Cow;

use crate::model::iris::MUSIC_NS;

/// Expands a bare local name under the music namespace; absolute identifiers
/// (anything with a `#` fragment separator or a `://` scheme separator) pass
/// through unchanged.
#[must_use]
pub fn normalize(id: &str) -> Cow<'_, str> {
    let id = id.trim();
    if is_absolute(id) {
        Cow::Borrowed(id)
    } else {
        Cow::Owned(format!("{MUSIC_NS}{id}"))
    }
}

/// Returns true if `id` is already a full identifier.
#[must_use]
pub fn is_absolute(id: &str) -> bool {
    id.contains('#') || id.contains("://")
}
