//! Core fact model: RDF terms, triples and the closed set of entity kinds.
//!
//! A [`Triple`] is the atomic unit held by the
//! [`FactStore`](crate::store::FactStore). Subjects and predicates are plain
//! IRI strings; objects are [`Term`]s so that literals keep their datatype and
//! language tag.

use std::fmt;
use std::str::FromStr;

/// The object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An absolute IRI.
    Iri(String),
    /// A blank node, stored in its `_:label` form so it can be used as a subject key.
    BlankNode(String),
    /// A literal value.
    Literal(Literal),
}

/// An RDF literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Lexical form as written in the document.
    pub lexical: String,
    /// Datatype IRI, when the parser reported one.
    pub datatype: Option<String>,
    /// BCP 47 language tag for language-tagged strings.
    pub language: Option<String>,
}

impl Term {
    /// Builds an IRI term.
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    /// Builds a plain string literal (no datatype, no language).
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal {
            lexical: value.into(),
            datatype: None,
            language: None,
        })
    }

    /// Builds a literal with an explicit datatype IRI.
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal {
            lexical: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        })
    }

    /// Returns the identifier of a node term (IRI or `_:label`), or `None` for
    /// literals.
    #[must_use]
    pub fn as_node(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::BlankNode(id) => Some(id),
            Term::Literal(_) => None,
        }
    }

    /// Returns the textual value of the term: the IRI for IRIs, the label for
    /// blank nodes and the lexical form for literals.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::BlankNode(id) => id,
            Term::Literal(lit) => &lit.lexical,
        }
    }
}

/// A single `(subject, predicate, object)` fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject IRI (or `_:`-prefixed blank node label).
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Term,
}

impl Triple {
    /// Creates a triple.
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

/// The five addressable categories of the music ontology.
///
/// Not extensible at runtime: every query over "all kinds" iterates
/// [`EntityKind::ALL`] in this fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    /// A performer or band.
    Artist,
    /// A released album.
    Album,
    /// A song contained in an album.
    Song,
    /// A musical instrument.
    Instrument,
    /// A musical genre.
    Genre,
}

impl EntityKind {
    /// All kinds in search order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Artist,
        EntityKind::Album,
        EntityKind::Song,
        EntityKind::Instrument,
        EntityKind::Genre,
    ];

    /// Lowercase wire name (`"artist"`, `"album"`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Album => "album",
            EntityKind::Song => "song",
            EntityKind::Instrument => "instrument",
            EntityKind::Genre => "genre",
        }
    }

    /// Plural label used in listing messages.
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Artist => "artists",
            EntityKind::Album => "albums",
            EntityKind::Song => "songs",
            EntityKind::Instrument => "instruments",
            EntityKind::Genre => "genres",
        }
    }

    /// Local name of the OWL class under the music namespace.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            EntityKind::Artist => "Artist",
            EntityKind::Album => "Album",
            EntityKind::Song => "Song",
            EntityKind::Instrument => "Instrument",
            EntityKind::Genre => "Genre",
        }
    }

    /// Full class IRI, e.g. `http://example.org/music-ontology#Artist`.
    #[must_use]
    pub fn class_iri(self) -> String {
        iris::music(self.class_name())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name an [`EntityKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind '{0}' (expected artist, album, song, instrument or genre)")]
pub struct UnknownKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownKind;

    /// Accepts the singular or plural wire name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|k| lower == k.as_str() || lower == k.plural())
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// IRI constants of the music ontology document contract.
///
/// Renaming any local name here is a breaking change of the input format.
pub mod iris {
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:integer`.
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// The single fixed namespace of the music ontology.
    pub const MUSIC_NS: &str = "http://example.org/music-ontology#";

    /// Expands a local name under [`MUSIC_NS`].
    #[must_use]
    pub fn music(local: &str) -> String {
        format!("{MUSIC_NS}{local}")
    }

    // Attribute local names
    /// Display name of any entity.
    pub const NAME: &str = "name";
    /// Free-text description of any entity.
    pub const DESCRIPTION: &str = "description";
    /// Artist nationality.
    pub const NATIONALITY: &str = "nationality";
    /// Artist birth year (integer).
    pub const BIRTH_YEAR: &str = "birthYear";
    /// Artist active years (free text).
    pub const ACTIVE_YEARS: &str = "activeYears";
    /// Artist career summary.
    pub const TRAJECTORY: &str = "trajectory";
    /// Artist discography summary.
    pub const DISCOGRAPHY: &str = "discography";
    /// Artist awards.
    pub const AWARDS: &str = "awards";
    /// Album or song release year (integer).
    pub const RELEASE_YEAR: &str = "releaseYear";
    /// Song duration in seconds (integer).
    pub const DURATION: &str = "duration";
    /// Song language.
    pub const LANGUAGE: &str = "language";
    /// Song composers.
    pub const COMPOSERS: &str = "composers";
    /// Song lyrics.
    pub const LYRICS: &str = "lyrics";
    /// Song lyricist.
    pub const LYRICIST: &str = "lyricist";
    /// Instrument family literal (e.g. "String").
    pub const TYPE: &str = "type";

    // Link local names
    /// Song → performing artist.
    pub const PERFORMED_BY: &str = "performedBy";
    /// Artist → album.
    pub const HAS_ALBUM: &str = "hasAlbum";
    /// Album → song.
    pub const CONTAINS_SONG: &str = "containsSong";
    /// Song → instrument.
    pub const USES_INSTRUMENT: &str = "usesInstrument";
    /// Artist → genre.
    pub const PERFORMS_GENRE: &str = "performsGenre";
    /// Album → genre.
    pub const HAS_GENRE: &str = "hasGenre";
}
