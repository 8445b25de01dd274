//! End-to-end queries over small fixture documents.
//!
//! `scenario.owl` holds a single artist with one album, one song and one
//! instrument; `edge-cases.ttl` collects the awkward shapes real data has:
//! unnamed entities, duplicate names, shared songs, ambiguous identifiers.

use std::sync::Arc;

use music_ontology::{
    EntityDetails, EntityKind, EntityProjection, EntityResolver, FactStore, QueryError, UNNAMED,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> EntityResolver {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let store = FactStore::load(&path).expect("fixture loads");
    EntityResolver::new(Arc::new(store))
}

fn names(entities: &[EntityProjection]) -> Vec<&str> {
    entities.iter().map(|e| e.name.as_str()).collect()
}

// =============================================================================
// Ana / Debut / Intro / Guitar
// =============================================================================

#[test]
fn search_finds_the_artist_only() {
    let r = fixture("scenario.owl");
    let hits = r.search("ana").expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, EntityKind::Artist);
    assert_eq!(hits[0].data.name, "Ana");

    let EntityDetails::Artist(artist) = &hits[0].data.details else {
        panic!("expected artist details");
    };
    assert_eq!(artist.genre, Some(Some("Pop".to_string())));
    assert_eq!(artist.nationality.as_deref(), Some("Spanish"));
}

#[test]
fn albums_of_artist_projects_release_year() {
    let r = fixture("scenario.owl");
    let albums = r.albums_of_artist("ana").expect("albums");
    assert_eq!(names(&albums), vec!["Debut"]);

    let EntityDetails::Album(album) = &albums[0].details else {
        panic!("expected album details");
    };
    assert_eq!(album.release_year, Some(2020));
    assert_eq!(album.genre, Some(Some("Pop".to_string())));
}

#[test]
fn songs_of_album_lists_instruments() {
    let r = fixture("scenario.owl");
    let songs = r.songs_of_album("debut").expect("songs");
    assert_eq!(names(&songs), vec!["Intro"]);

    let EntityDetails::Song(song) = &songs[0].details else {
        panic!("expected song details");
    };
    assert_eq!(song.duration, Some(180));
    assert_eq!(song.artist, Some(Some("Ana".to_string())));
    let instruments: Vec<&str> = song.instruments.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(instruments, vec!["Guitar"]);
}

#[test]
fn instruments_of_type_matches_family_literal() {
    let r = fixture("scenario.owl");
    let strings = r.instruments_of_type("string").expect("instruments");
    assert_eq!(names(&strings), vec!["Guitar"]);
    assert_eq!(strings[0].entity_type, "String");
    assert!(r.instruments_of_type("brass").expect("instruments").is_empty());
}

#[test]
fn stats_count_each_kind() {
    let stats = fixture("scenario.owl").stats();
    assert_eq!(stats.artists, 1);
    assert_eq!(stats.albums, 1);
    assert_eq!(stats.songs, 1);
    assert_eq!(stats.instruments, 1);
    assert_eq!(stats.genres, 1);
}

#[test]
fn traversals_accept_full_iris() {
    let r = fixture("scenario.owl");
    let by_local = r.songs_of_artist("ana").expect("songs");
    let by_iri = r
        .songs_of_artist("http://example.org/music-ontology#ana")
        .expect("songs");
    assert_eq!(by_local, by_iri);
    assert_eq!(
        names(&r.songs_using_instrument("guitar").expect("songs")),
        vec!["Intro"]
    );
    assert_eq!(names(&r.genres_of_artist("ana").expect("genres")), vec!["Pop"]);
}

// =============================================================================
// Edge cases
// =============================================================================

#[test]
fn first_name_wins() {
    let r = fixture("edge-cases.ttl");
    let jane = r.get_by_fragment(EntityKind::Artist, "jane-doe").expect("found");
    assert_eq!(jane.name, "Jane Doe");
}

#[test]
fn ambiguous_fragment_picks_first_in_document_order() {
    let r = fixture("edge-cases.ttl");
    let found = r.get_by_fragment(EntityKind::Artist, "jane").expect("found");
    assert_eq!(found.uri, "http://example.org/music-ontology#jane-doe");
    let band = r.get_by_fragment(EntityKind::Artist, "doe-band").expect("found");
    assert_eq!(band.name, "Jane Doe Band");
}

#[test]
fn fragment_miss_is_not_found() {
    let r = fixture("edge-cases.ttl");
    let err = r.get_by_fragment(EntityKind::Song, "jane-doe").err();
    assert_eq!(
        err,
        Some(QueryError::NotFound {
            kind: EntityKind::Song,
            fragment: "jane-doe".to_string(),
        })
    );
}

#[test]
fn unnamed_genres_are_listed_but_never_found() {
    let r = fixture("edge-cases.ttl");
    let genres = r.list_all(EntityKind::Genre).expect("genres");
    assert_eq!(names(&genres), vec![UNNAMED, UNNAMED]);
    assert!(r.search("unnamed").expect("search").is_empty());
    assert!(r
        .search("")
        .expect("search")
        .iter()
        .all(|hit| hit.kind != EntityKind::Genre));
}

#[test]
fn link_to_unnamed_genre_is_null_not_absent() {
    let r = fixture("edge-cases.ttl");
    let jane = r.get_by_fragment(EntityKind::Artist, "jane-doe").expect("found");
    let EntityDetails::Artist(details) = jane.details else {
        panic!("expected artist details");
    };
    assert_eq!(details.genre, Some(None));
}

#[test]
fn shared_songs_are_reported_once() {
    let r = fixture("edge-cases.ttl");
    let songs = r.songs_of_artist("jane-doe").expect("songs");
    assert_eq!(names(&songs), vec!["Opening", "Shared", "Closing"]);
}

#[test]
fn instrument_without_type_literal_keeps_kind_name() {
    let r = fixture("edge-cases.ttl");
    let cello = r.get_by_fragment(EntityKind::Instrument, "cello").expect("found");
    assert_eq!(cello.entity_type, "instrument");
    assert_eq!(
        names(&r.instruments_of_type("INSTR").expect("instruments")),
        vec!["Cello"]
    );
}

#[test]
fn language_tagged_literal_keeps_lexical_form() {
    let r = fixture("edge-cases.ttl");
    let closing = r.get_by_fragment(EntityKind::Song, "closing").expect("found");
    let EntityDetails::Song(song) = closing.details else {
        panic!("expected song details");
    };
    assert_eq!(song.language.as_deref(), Some("fr"));
    assert_eq!(song.artist, None);
    assert!(song.instruments.is_empty());
}

#[test]
fn non_integer_year_is_reported_not_dropped() {
    let doc = r#"
@prefix music: <http://example.org/music-ontology#> .
music:broken a music:Album ;
    music:name "Broken Record" ;
    music:releaseYear "sometime in 1999" .
"#;
    let store =
        FactStore::parse_document(doc, music_ontology::DocumentFormat::Turtle).expect("parses");
    let r = EntityResolver::new(Arc::new(store));

    let err = r.get_by_fragment(EntityKind::Album, "broken").err();
    assert!(matches!(err, Some(QueryError::MalformedData { .. })));
    assert!(r.search("broken").is_err());
    // counting never projects
    assert_eq!(r.stats().albums, 1);
}
