//! Turtle 1.1 serializer for a loaded [`FactStore`].
//!
//! Triples are grouped by subject in first-seen order, with predicates
//! and objects under the music, RDF and XSD namespaces compacted to
//! prefixed names.

use std::collections::HashMap;

use crate::model::{iris, Literal, Term};
use crate::serializer::ntriples::escape;
use crate::store::FactStore;

const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Serializes every triple in the store to a Turtle string.
#[must_use]
pub fn to_turtle(store: &FactStore) -> String {
    let mut out = String::with_capacity(store.len() * 64);

    // Prefix declarations
    out.push_str(&format!("@prefix music: <{}> .\n", iris::MUSIC_NS));
    out.push_str(&format!("@prefix rdf:   <{}> .\n", iris::RDF));
    out.push_str(&format!("@prefix xsd:   <{}> .\n", XSD));
    out.push('\n');

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<(&str, &Term)>> = HashMap::new();
    for t in store.iter() {
        let group = groups.entry(t.subject.as_str()).or_insert_with(|| {
            order.push(t.subject.as_str());
            Vec::new()
        });
        group.push((t.predicate.as_str(), &t.object));
    }

    for subject in order {
        let Some(pairs) = groups.get(subject) else {
            continue;
        };
        out.push_str(&node(subject));
        let body: Vec<String> = pairs
            .iter()
            .map(|(pred, obj)| format!("  {} {}", predicate(pred), object(obj)))
            .collect();
        out.push('\n');
        out.push_str(&body.join(" ;\n"));
        out.push_str(" .\n\n");
    }

    out
}

/// Compacts an IRI to a prefixed name when its local part is a plain name.
fn compact(value: &str) -> Option<String> {
    [("music", iris::MUSIC_NS), ("rdf", iris::RDF), ("xsd", XSD)]
        .into_iter()
        .find_map(|(prefix, ns)| {
            let local = value.strip_prefix(ns)?;
            let plain = !local.is_empty()
                && local
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                && local.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
            plain.then(|| format!("{prefix}:{local}"))
        })
}

fn iri(value: &str) -> String {
    compact(value).unwrap_or_else(|| format!("<{}>", value))
}

fn node(value: &str) -> String {
    if value.starts_with("_:") {
        value.to_string()
    } else {
        iri(value)
    }
}

fn predicate(value: &str) -> String {
    if value == iris::RDF_TYPE {
        "a".to_string()
    } else {
        iri(value)
    }
}

fn object(term: &Term) -> String {
    match term {
        Term::Iri(value) => iri(value),
        Term::BlankNode(label) => label.clone(),
        Term::Literal(l) => turtle_literal(l),
    }
}

fn turtle_literal(l: &Literal) -> String {
    let escaped = escape(&l.lexical);
    match (&l.language, &l.datatype) {
        (Some(lang), _) => format!("\"{}\"@{}", escaped, lang),
        // xsd:string is the implicit datatype of a plain literal.
        (None, Some(dt)) if dt != iris::XSD_STRING => format!("\"{}\"^^{}", escaped, iri(dt)),
        _ => format!("\"{}\"", escaped),
    }
}
