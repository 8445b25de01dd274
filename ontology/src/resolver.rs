//! Entity resolution and composite queries over a [`FactStore`].
//!
//! [`EntityResolver`] owns a shared handle to the store and answers every
//! query the transports expose: free-text search, listings, lookup by
//! identifier fragment, relational traversals and statistics.
//!
//! Traversals never fail on an unknown identifier; they return an empty
//! list. The only errors are [`QueryError::NotFound`] from
//! [`EntityResolver::get_by_fragment`] and [`QueryError::MalformedData`] when
//! a projected entity carries a value of the wrong shape.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::QueryError;
use crate::identifier::normalize;
use crate::model::{iris, EntityKind, Term};
use crate::projection::{
    AlbumDetails, ArtistDetails, EntityDetails, EntityProjection, InstrumentRef, LinkedName,
    SearchHit, SongDetails, UNNAMED,
};
use crate::store::FactStore;

/// Aggregate counts over the loaded store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OntologyStats {
    /// Number of distinct triples.
    pub total_triples: usize,
    /// Number of artists.
    pub artists: usize,
    /// Number of albums.
    pub albums: usize,
    /// Number of songs.
    pub songs: usize,
    /// Number of instruments.
    pub instruments: usize,
    /// Number of genres.
    pub genres: usize,
}

/// Query engine over an immutable, shared [`FactStore`].
#[derive(Debug, Clone)]
pub struct EntityResolver {
    store: Arc<FactStore>,
}

impl EntityResolver {
    /// Wraps a loaded store.
    #[must_use]
    pub fn new(store: Arc<FactStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &FactStore {
        &self.store
    }

    /// Projects `subject` as an entity of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedData`] if an integer attribute does not
    /// parse.
    pub fn project(&self, subject: &str, kind: EntityKind) -> Result<EntityProjection, QueryError> {
        let attrs = Attributes::new(&self.store, subject);

        let mut entity_type = kind.as_str().to_string();
        let details = match kind {
            EntityKind::Artist => EntityDetails::Artist(ArtistDetails {
                nationality: attrs.text(iris::NATIONALITY),
                birth_year: attrs.integer(iris::BIRTH_YEAR)?,
                active_years: attrs.text(iris::ACTIVE_YEARS),
                trajectory: attrs.text(iris::TRAJECTORY),
                discography: attrs.text(iris::DISCOGRAPHY),
                awards: attrs.text(iris::AWARDS),
                genre: attrs.linked_name(iris::PERFORMS_GENRE),
            }),
            EntityKind::Album => EntityDetails::Album(AlbumDetails {
                release_year: attrs.integer(iris::RELEASE_YEAR)?,
                genre: attrs.linked_name(iris::HAS_GENRE),
            }),
            EntityKind::Song => EntityDetails::Song(SongDetails {
                duration: attrs.integer(iris::DURATION)?,
                release_year: attrs.integer(iris::RELEASE_YEAR)?,
                artist: attrs.linked_name(iris::PERFORMED_BY),
                language: attrs.text(iris::LANGUAGE),
                composers: attrs.text(iris::COMPOSERS),
                lyrics: attrs.text(iris::LYRICS),
                lyricist: attrs.text(iris::LYRICIST),
                instruments: attrs
                    .links(iris::USES_INSTRUMENT)
                    .into_iter()
                    .map(|uri| InstrumentRef {
                        name: Attributes::new(&self.store, uri)
                            .text(iris::NAME)
                            .unwrap_or_else(|| UNNAMED.to_string()),
                        uri: uri.to_string(),
                    })
                    .collect(),
            }),
            EntityKind::Instrument => {
                if let Some(family) = attrs.text(iris::TYPE) {
                    entity_type = family;
                }
                EntityDetails::Instrument
            }
            EntityKind::Genre => EntityDetails::Genre,
        };

        Ok(EntityProjection {
            uri: subject.to_string(),
            name: attrs
                .text(iris::NAME)
                .unwrap_or_else(|| UNNAMED.to_string()),
            entity_type,
            description: attrs.text(iris::DESCRIPTION),
            details,
        })
    }

    /// Case-insensitive substring search over entity names, across all kinds
    /// in [`EntityKind::ALL`] order. Entities without a `name` fact never
    /// match.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedData`] if a matching entity cannot be
    /// projected.
    pub fn search(&self, term: &str) -> Result<Vec<SearchHit>, QueryError> {
        let needle = term.to_lowercase();
        let mut hits = Vec::new();

        for kind in EntityKind::ALL {
            for subject in self.store.subjects_of_type(kind) {
                let Some(name) = Attributes::new(&self.store, subject).text(iris::NAME) else {
                    continue;
                };
                if name.to_lowercase().contains(&needle) {
                    hits.push(SearchHit {
                        kind,
                        data: self.project(subject, kind)?,
                    });
                }
            }
        }

        tracing::debug!(term, hits = hits.len(), "search");
        Ok(hits)
    }

    /// Every entity of `kind`, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedData`] if any entity cannot be projected.
    pub fn list_all(&self, kind: EntityKind) -> Result<Vec<EntityProjection>, QueryError> {
        self.project_all(self.store.subjects_of_type(kind), kind)
    }

    /// The first entity of `kind` whose full IRI contains `fragment`.
    ///
    /// Several matches are not an error: the first in discovery order is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if nothing matches, or
    /// [`QueryError::MalformedData`] if the match cannot be projected.
    pub fn get_by_fragment(
        &self,
        kind: EntityKind,
        fragment: &str,
    ) -> Result<EntityProjection, QueryError> {
        let subject = self
            .store
            .subjects_of_type(kind)
            .into_iter()
            .find(|s| s.contains(fragment))
            .ok_or_else(|| QueryError::NotFound {
                kind,
                fragment: fragment.to_string(),
            })?;
        self.project(subject, kind)
    }

    /// Albums linked from an artist by `hasAlbum`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedData`] if an album cannot be projected.
    pub fn albums_of_artist(&self, artist: &str) -> Result<Vec<EntityProjection>, QueryError> {
        let artist = normalize(artist);
        let albums = Attributes::new(&self.store, &artist).links(iris::HAS_ALBUM);
        self.project_all(albums, EntityKind::Album)
    }

    /// Songs linked from an album by `containsSong`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedData`] if a song cannot be projected.
    pub fn songs_of_album(&self, album: &str) -> Result<Vec<EntityProjection>, QueryError> {
        let album = normalize(album);
        let songs = Attributes::new(&self.store, &album).links(iris::CONTAINS_SONG);
        self.project_all(songs, EntityKind::Song)
    }

    /// Songs of every album of an artist, deduplicated by IRI (first
    /// occurrence kept).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedData`] if a song cannot be projected.
    pub fn songs_of_artist(&self, artist: &str) -> Result<Vec<EntityProjection>, QueryError> {
        let artist = normalize(artist);
        let mut seen = HashSet::new();
        let songs: Vec<&str> = Attributes::new(&self.store, &artist)
            .links(iris::HAS_ALBUM)
            .into_iter()
            .flat_map(|album| Attributes::new(&self.store, album).links(iris::CONTAINS_SONG))
            .filter(|song| seen.insert(*song))
            .collect();
        self.project_all(songs, EntityKind::Song)
    }

    /// Songs that link to the instrument by `usesInstrument`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedData`] if a song cannot be projected.
    pub fn songs_using_instrument(
        &self,
        instrument: &str,
    ) -> Result<Vec<EntityProjection>, QueryError> {
        let instrument = normalize(instrument);
        let songs = self.store.subjects_where(
            &iris::music(iris::USES_INSTRUMENT),
            &Term::Iri(instrument.into_owned()),
        );
        self.project_all(songs, EntityKind::Song)
    }

    /// Instruments whose resolved `type` contains `family`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedData`] if an instrument cannot be
    /// projected.
    pub fn instruments_of_type(&self, family: &str) -> Result<Vec<EntityProjection>, QueryError> {
        let needle = family.to_lowercase();
        let mut matches = self.list_all(EntityKind::Instrument)?;
        matches.retain(|i| i.entity_type.to_lowercase().contains(&needle));
        Ok(matches)
    }

    /// Every genre linked from an artist by `performsGenre`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedData`] if a genre cannot be projected.
    pub fn genres_of_artist(&self, artist: &str) -> Result<Vec<EntityProjection>, QueryError> {
        let artist = normalize(artist);
        let genres = Attributes::new(&self.store, &artist).links(iris::PERFORMS_GENRE);
        self.project_all(genres, EntityKind::Genre)
    }

    /// Triple and per-kind entity counts.
    #[must_use]
    pub fn stats(&self) -> OntologyStats {
        let count = |kind| self.store.count_of_type(kind);
        OntologyStats {
            total_triples: self.store.len(),
            artists: count(EntityKind::Artist),
            albums: count(EntityKind::Album),
            songs: count(EntityKind::Song),
            instruments: count(EntityKind::Instrument),
            genres: count(EntityKind::Genre),
        }
    }

    fn project_all(
        &self,
        subjects: Vec<&str>,
        kind: EntityKind,
    ) -> Result<Vec<EntityProjection>, QueryError> {
        subjects
            .into_iter()
            .map(|s| self.project(s, kind))
            .collect()
    }
}

/// Attribute reader for one subject under the music namespace.
struct Attributes<'a> {
    store: &'a FactStore,
    subject: &'a str,
}

impl<'a> Attributes<'a> {
    fn new(store: &'a FactStore, subject: &'a str) -> Self {
        Self { store, subject }
    }

    fn value(&self, local: &str) -> Option<&'a Term> {
        self.store.value_of(self.subject, &iris::music(local))
    }

    /// Text value of a single-valued attribute. Empty values count as absent.
    fn text(&self, local: &str) -> Option<String> {
        self.value(local)
            .map(Term::text)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn integer(&self, local: &str) -> Result<Option<i64>, QueryError> {
        let Some(raw) = self.text(local) else {
            return Ok(None);
        };
        raw.trim().parse::<i64>().map(Some).map_err(|_| {
            tracing::warn!(
                subject = self.subject,
                attribute = local,
                value = %raw,
                "non-integer value"
            );
            QueryError::MalformedData {
                subject: self.subject.to_string(),
                predicate: iris::music(local),
                value: raw,
            }
        })
    }

    /// Name of the node a single-valued link points at.
    fn linked_name(&self, local: &str) -> LinkedName {
        let target = self.value(local)?;
        Some(
            target
                .as_node()
                .and_then(|node| Attributes::new(self.store, node).text(iris::NAME)),
        )
    }

    /// Every node reachable through a multi-valued link, in document order.
    fn links(&self, local: &str) -> Vec<&'a str> {
        self.store
            .values_of(self.subject, &iris::music(local))
            .into_iter()
            .filter_map(Term::as_node)
            .collect()
    }
}
