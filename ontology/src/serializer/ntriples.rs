//! N-Triples serializer for a loaded [`FactStore`].
//!
//! Produces one triple per line, absolute IRIs only, in store insertion
//! order. The output parses back into the same fact set.

use crate::model::{Literal, Term};
use crate::store::FactStore;

/// Serializes every triple in the store to an N-Triples string.
#[must_use]
pub fn to_ntriples(store: &FactStore) -> String {
    let mut out = String::with_capacity(store.len() * 96);

    for t in store.iter() {
        triple(&mut out, &node(&t.subject), &iri(&t.predicate), &object(&t.object));
    }

    out
}

fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push_str(subj);
    out.push(' ');
    out.push_str(pred);
    out.push(' ');
    out.push_str(obj);
    out.push_str(" .\n");
}

fn iri(s: &str) -> String {
    format!("<{}>", s)
}

/// Subjects are IRIs unless they carry the `_:` blank node prefix.
fn node(s: &str) -> String {
    if s.starts_with("_:") {
        s.to_string()
    } else {
        iri(s)
    }
}

fn object(term: &Term) -> String {
    match term {
        Term::Iri(value) => iri(value),
        Term::BlankNode(label) => label.clone(),
        Term::Literal(l) => lit(l),
    }
}

pub(crate) fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

fn lit(l: &Literal) -> String {
    let escaped = escape(&l.lexical);
    match (&l.language, &l.datatype) {
        (Some(lang), _) => format!("\"{}\"@{}", escaped, lang),
        (None, Some(dt)) => format!("\"{}\"^^<{}>", escaped, dt),
        (None, None) => format!("\"{}\"", escaped),
    }
}
