//! Serializers for a loaded fact store.
//!
//! Two serialization formats are supported:
//! - **N-Triples** ([`ntriples`]): one fact per line, for bulk loading and diffing
//! - **Turtle** ([`turtle`]): grouped by subject, for reading and RDF tooling

pub mod ntriples;
pub mod turtle;
