//! Read-only query engine over a music ontology.
//!
//! The `music-ontology` crate loads a serialized RDF document (RDF/XML,
//! Turtle or N-Triples) describing artists, albums, songs, instruments and
//! genres into an immutable, indexed [`FactStore`], and answers entity
//! queries over it through an [`EntityResolver`].
//!
//! # Entry Point
//!
//! ```no_run
//! use std::sync::Arc;
//! use music_ontology::{EntityKind, EntityResolver, FactStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FactStore::load("data/music-ontology.owl")?;
//! let resolver = EntityResolver::new(Arc::new(store));
//! for hit in resolver.search("doe")? {
//!     println!("{} {}", hit.kind, hit.data.name);
//! }
//! let jane = resolver.get_by_fragment(EntityKind::Artist, "jane-doe")?;
//! println!("{}", jane.uri);
//! # Ok(())
//! # }
//! ```
//!
//! # Serialization
//!
//! ```
//! use music_ontology::{parser::DocumentFormat, FactStore};
//!
//! let doc = r#"<http://example.org/music-ontology#pop> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/music-ontology#Genre> ."#;
//! let store = FactStore::parse_document(doc, DocumentFormat::NTriples).unwrap();
//! let nt = music_ontology::serializer::ntriples::to_ntriples(&store);
//! let turtle = music_ontology::serializer::turtle::to_turtle(&store);
//! assert_eq!(nt.lines().count(), 1);
//! assert!(turtle.contains("music:pop"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod error;
pub mod identifier;
pub mod model;
pub mod parser;
pub mod projection;
pub mod resolver;
pub mod serializer;
pub mod store;

pub use error::{LoadError, QueryError};
pub use model::{iris, EntityKind, Literal, Term, Triple, UnknownKind};
pub use parser::DocumentFormat;
pub use projection::{
    AlbumDetails, ArtistDetails, EntityDetails, EntityProjection, InstrumentRef, LinkedName,
    SearchHit, SongDetails, UNNAMED,
};
pub use resolver::{EntityResolver, OntologyStats};
pub use store::FactStore;
