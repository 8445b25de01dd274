//! The fact store: a deduplicated, indexed, read-only set of triples.
//!
//! A [`FactStore`] is built exactly once (from a document or a triple
//! iterator) and never mutated afterwards, so a shared `&FactStore` or
//! `Arc<FactStore>` can serve any number of concurrent readers without locks.
//!
//! Two indexes are built at construction time:
//! - subject → predicate → triple positions, for attribute reads;
//! - predicate → object → triple positions, for type scans and inverse links.
//!
//! Positions always point into the insertion-ordered triple list, so every
//! accessor returns results in document order.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::LoadError;
use crate::model::{iris, EntityKind, Term, Triple};
use crate::parser::{self, DocumentFormat};

/// Indexed, immutable set of triples.
#[derive(Debug, Default)]
pub struct FactStore {
    triples: Vec<Triple>,
    by_subject: HashMap<String, HashMap<String, Vec<usize>>>,
    by_predicate_object: HashMap<String, HashMap<Term, Vec<usize>>>,
}

impl FactStore {
    /// Loads a document, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file is missing, unreadable or does not
    /// parse. No store is produced in that case.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        Self::load_with_format(path, DocumentFormat::from_path(path))
    }

    /// Loads a document with an explicit format.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file is missing, unreadable or does not
    /// parse.
    pub fn load_with_format(
        path: impl AsRef<Path>,
        format: DocumentFormat,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let origin = path.display().to_string();
        let triples = parser::parse_reader(BufReader::new(file), format, &origin)?;
        let store = Self::from_triples(triples);
        tracing::info!(
            path = %origin,
            %format,
            triples = store.len(),
            "ontology loaded"
        );
        Ok(store)
    }

    /// Parses an in-memory document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] if the text is not valid for `format`.
    pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Self, LoadError> {
        let triples = parser::parse_reader(text.as_bytes(), format, "<memory>")?;
        Ok(Self::from_triples(triples))
    }

    /// Builds a store from triples. Duplicates collapse; the first occurrence
    /// fixes the position.
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut store = FactStore::default();
        let mut seen: HashSet<Triple> = HashSet::new();

        for triple in triples {
            if seen.contains(&triple) {
                continue;
            }
            let idx = store.triples.len();
            store
                .by_subject
                .entry(triple.subject.clone())
                .or_default()
                .entry(triple.predicate.clone())
                .or_default()
                .push(idx);
            store
                .by_predicate_object
                .entry(triple.predicate.clone())
                .or_default()
                .entry(triple.object.clone())
                .or_default()
                .push(idx);
            seen.insert(triple.clone());
            store.triples.push(triple);
        }

        store
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the store holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates over all triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All subjects asserted as `rdf:type` of the kind's class, in discovery
    /// order.
    #[must_use]
    pub fn subjects_of_type(&self, kind: EntityKind) -> Vec<&str> {
        self.subjects_where(iris::RDF_TYPE, &Term::Iri(kind.class_iri()))
    }

    /// Number of subjects of the kind, without collecting them.
    #[must_use]
    pub fn count_of_type(&self, kind: EntityKind) -> usize {
        self.positions_where(iris::RDF_TYPE, &Term::Iri(kind.class_iri()))
            .len()
    }

    /// Inverse lookup: every subject with `predicate = object`.
    #[must_use]
    pub fn subjects_where(&self, predicate: &str, object: &Term) -> Vec<&str> {
        self.positions_where(predicate, object)
            .iter()
            .map(|&i| self.triples[i].subject.as_str())
            .collect()
    }

    /// The first object recorded for `(subject, predicate)`.
    ///
    /// When a subject carries several objects for a predicate that is meant
    /// to be single-valued, the one that appeared first in the document wins;
    /// the others are ignored rather than reported.
    #[must_use]
    pub fn value_of(&self, subject: &str, predicate: &str) -> Option<&Term> {
        self.positions(subject, predicate)
            .first()
            .map(|&i| &self.triples[i].object)
    }

    /// Every object recorded for `(subject, predicate)`, in document order.
    #[must_use]
    pub fn values_of(&self, subject: &str, predicate: &str) -> Vec<&Term> {
        self.positions(subject, predicate)
            .iter()
            .map(|&i| &self.triples[i].object)
            .collect()
    }

    fn positions(&self, subject: &str, predicate: &str) -> &[usize] {
        self.by_subject
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn positions_where(&self, predicate: &str, object: &Term) -> &[usize] {
        self.by_predicate_object
            .get(predicate)
            .and_then(|objects| objects.get(object))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
