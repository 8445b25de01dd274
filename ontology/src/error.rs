//! Error types for loading and querying the ontology.

use std::path::PathBuf;

use crate::model::EntityKind;
use crate::parser::DocumentFormat;

/// Failure to build a [`FactStore`](crate::store::FactStore).
///
/// Always fatal: a process must not serve queries from an empty or partially
/// loaded store.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document path does not exist.
    #[error("ontology document not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },
    /// The document exists but could not be read.
    #[error("failed to read ontology document {}: {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid markup for its format.
    #[error("failed to parse {origin} as {format}: {message}")]
    Parse {
        /// File path, or `<memory>` for in-memory documents.
        origin: String,
        /// Format the parser was run with.
        format: DocumentFormat,
        /// Parser diagnostic.
        message: String,
    },
}

/// Per-request query failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A lookup by identifier fragment matched no entity of the kind.
    #[error("no {kind} matches identifier '{fragment}'")]
    NotFound {
        /// Kind that was searched.
        kind: EntityKind,
        /// Fragment that was searched for.
        fragment: String,
    },
    /// A value in the source data violates its expected shape.
    #[error("malformed value for <{predicate}> on <{subject}>: '{value}' is not a valid integer")]
    MalformedData {
        /// Subject carrying the bad value.
        subject: String,
        /// Predicate IRI of the bad value.
        predicate: String,
        /// Offending lexical form.
        value: String,
    },
}

impl QueryError {
    /// Returns true for the recoverable "no such entity" outcome.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::NotFound { .. })
    }
}
