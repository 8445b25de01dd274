//! Typed entity projections.
//!
//! An [`EntityProjection`] is the flattened view of one subject: the four
//! common attributes plus a per-kind [`EntityDetails`] record. Every optional
//! attribute is an `Option`, so which fields a kind can carry is fixed by the
//! type rather than by which map keys happen to be set.
//!
//! With the `serde` feature, projections serialize to a flat JSON object with
//! camelCase keys: `uri`, `name`, `type`, `description`, then the kind fields.

use crate::model::EntityKind;

/// Name reported for entities that carry no `name` fact.
pub const UNNAMED: &str = "unnamed";

/// Flattened attribute view of a single entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityProjection {
    /// Full IRI of the subject.
    pub uri: String,
    /// Display name, or [`UNNAMED`].
    pub name: String,
    /// Lowercase kind name, or the instrument's own type literal.
    pub entity_type: String,
    /// Free-text description, when present.
    pub description: Option<String>,
    /// Kind-specific attributes.
    pub details: EntityDetails,
}

impl EntityProjection {
    /// The kind this projection was built for.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.details.kind()
    }

    /// Returns true when the entity had no `name` fact.
    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        self.name == UNNAMED
    }
}

/// Per-kind attribute record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityDetails {
    /// Artist attributes.
    Artist(ArtistDetails),
    /// Album attributes.
    Album(AlbumDetails),
    /// Song attributes.
    Song(SongDetails),
    /// Instruments carry nothing beyond the common attributes; their family
    /// literal replaces `type`.
    Instrument,
    /// Genres carry nothing beyond the common attributes.
    Genre,
}

impl EntityDetails {
    /// The kind of this record.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityDetails::Artist(_) => EntityKind::Artist,
            EntityDetails::Album(_) => EntityKind::Album,
            EntityDetails::Song(_) => EntityKind::Song,
            EntityDetails::Instrument => EntityKind::Instrument,
            EntityDetails::Genre => EntityKind::Genre,
        }
    }
}

/// A linked name: `None` when there is no link, `Some(None)` when the link
/// exists but its target has no name (serialized as `null`).
pub type LinkedName = Option<Option<String>>;

/// Artist-specific attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistDetails {
    /// Nationality.
    pub nationality: Option<String>,
    /// Year of birth.
    pub birth_year: Option<i64>,
    /// Active years, free text.
    pub active_years: Option<String>,
    /// Career summary.
    pub trajectory: Option<String>,
    /// Discography summary.
    pub discography: Option<String>,
    /// Awards.
    pub awards: Option<String>,
    /// Name of the first performed genre.
    pub genre: LinkedName,
}

/// Album-specific attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumDetails {
    /// Release year.
    pub release_year: Option<i64>,
    /// Name of the album's genre.
    pub genre: LinkedName,
}

/// Song-specific attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongDetails {
    /// Duration in seconds.
    pub duration: Option<i64>,
    /// Release year.
    pub release_year: Option<i64>,
    /// Name of the performing artist.
    pub artist: LinkedName,
    /// Language of the lyrics.
    pub language: Option<String>,
    /// Composers.
    pub composers: Option<String>,
    /// Lyrics.
    pub lyrics: Option<String>,
    /// Lyricist.
    pub lyricist: Option<String>,
    /// Instruments used, in document order. Not serialized when empty.
    pub instruments: Vec<InstrumentRef>,
}

/// Reference to an instrument from a song.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstrumentRef {
    /// Instrument IRI.
    pub uri: String,
    /// Instrument name, or [`UNNAMED`].
    pub name: String,
}

/// One search or listing result: the kind plus its projection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchHit {
    /// Kind of the matched entity.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: EntityKind,
    /// The matched entity.
    pub data: EntityProjection,
}

impl From<EntityProjection> for SearchHit {
    fn from(data: EntityProjection) -> Self {
        Self {
            kind: data.kind(),
            data,
        }
    }
}

#[cfg(feature = "serde")]
mod ser {
    use serde::ser::{Serialize, SerializeMap, Serializer};

    use super::{EntityDetails, EntityProjection};

    fn opt<M: SerializeMap, T: Serialize>(
        map: &mut M,
        key: &'static str,
        value: &Option<T>,
    ) -> Result<(), M::Error> {
        match value {
            Some(v) => map.serialize_entry(key, v),
            None => Ok(()),
        }
    }

    impl Serialize for EntityProjection {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            map.serialize_entry("uri", &self.uri)?;
            map.serialize_entry("name", &self.name)?;
            map.serialize_entry("type", &self.entity_type)?;
            opt(&mut map, "description", &self.description)?;

            match &self.details {
                EntityDetails::Artist(a) => {
                    opt(&mut map, "nationality", &a.nationality)?;
                    opt(&mut map, "birthYear", &a.birth_year)?;
                    opt(&mut map, "activeYears", &a.active_years)?;
                    opt(&mut map, "trajectory", &a.trajectory)?;
                    opt(&mut map, "discography", &a.discography)?;
                    opt(&mut map, "awards", &a.awards)?;
                    opt(&mut map, "genre", &a.genre)?;
                }
                EntityDetails::Album(a) => {
                    opt(&mut map, "releaseYear", &a.release_year)?;
                    opt(&mut map, "genre", &a.genre)?;
                }
                EntityDetails::Song(s) => {
                    opt(&mut map, "duration", &s.duration)?;
                    opt(&mut map, "releaseYear", &s.release_year)?;
                    opt(&mut map, "artist", &s.artist)?;
                    opt(&mut map, "language", &s.language)?;
                    opt(&mut map, "composers", &s.composers)?;
                    opt(&mut map, "lyrics", &s.lyrics)?;
                    opt(&mut map, "lyricist", &s.lyricist)?;
                    if !s.instruments.is_empty() {
                        map.serialize_entry("instruments", &s.instruments)?;
                    }
                }
                EntityDetails::Instrument | EntityDetails::Genre => {}
            }

            map.end()
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn album(genre: LinkedName) -> EntityProjection {
        EntityProjection {
            uri: "http://example.org/music-ontology#debut".into(),
            name: "Debut".into(),
            entity_type: "album".into(),
            description: None,
            details: EntityDetails::Album(AlbumDetails {
                release_year: Some(2020),
                genre,
            }),
        }
    }

    #[test]
    fn absent_fields_are_omitted() {
        let value = serde_json::to_value(album(None)).expect("serializes");
        assert_eq!(
            value,
            json!({
                "uri": "http://example.org/music-ontology#debut",
                "name": "Debut",
                "type": "album",
                "releaseYear": 2020
            })
        );
    }

    #[test]
    fn unnamed_link_target_serializes_as_null() {
        let value = serde_json::to_value(album(Some(None))).expect("serializes");
        assert_eq!(value["genre"], serde_json::Value::Null);
        assert!(value.as_object().is_some_and(|o| o.contains_key("genre")));
    }

    #[test]
    fn empty_instrument_list_is_omitted() {
        let song = EntityProjection {
            uri: "http://example.org/music-ontology#intro".into(),
            name: "Intro".into(),
            entity_type: "song".into(),
            description: Some("Opening track".into()),
            details: EntityDetails::Song(SongDetails {
                duration: Some(180),
                ..SongDetails::default()
            }),
        };
        let value = serde_json::to_value(&song).expect("serializes");
        assert!(value.get("instruments").is_none());
        assert_eq!(value["duration"], json!(180));
        assert_eq!(value["description"], json!("Opening track"));
    }

    #[test]
    fn search_hit_wraps_kind_and_data() {
        let hit = SearchHit::from(album(None));
        let value = serde_json::to_value(&hit).expect("serializes");
        assert_eq!(value["type"], json!("album"));
        assert_eq!(value["data"]["name"], json!("Debut"));
    }
}
