//! Loading documents from disk in each supported format.

use std::io::Write;

use music_ontology::serializer::{ntriples, turtle};
use music_ontology::{DocumentFormat, EntityKind, FactStore, LoadError};

const SAMPLE_OWL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/music-ontology.owl");

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file.flush().expect("flush");
    file
}

#[test]
fn missing_path_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.owl");
    let err = FactStore::load(&path).err();
    assert!(matches!(err, Some(LoadError::NotFound { path: ref p }) if p == &path));
}

#[test]
fn malformed_document_yields_no_store() {
    let file = write_temp(
        ".owl",
        "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n  <rdf:Description>\n</rdf:RDF>\n",
    );
    let err = FactStore::load(file.path()).err();
    assert!(matches!(err, Some(LoadError::Parse { format: DocumentFormat::RdfXml, .. })));
}

#[test]
fn empty_rdf_xml_file_yields_no_store() {
    let file = write_temp(".owl", "");
    let err = FactStore::load(file.path()).err();
    assert!(matches!(err, Some(LoadError::Parse { format: DocumentFormat::RdfXml, .. })));
}

#[test]
fn truncated_sample_yields_no_store() {
    let sample = std::fs::read_to_string(SAMPLE_OWL).expect("sample readable");
    let cut = sample.find("</music:Instrument>").expect("sample has an instrument")
        + "</music:Instrument>".len();
    let file = write_temp(".owl", &sample[..cut]);

    let err = FactStore::load(file.path()).err();
    assert!(matches!(err, Some(LoadError::Parse { format: DocumentFormat::RdfXml, .. })));
}

#[test]
fn turtle_extension_selects_turtle_parser() {
    let file = write_temp(
        ".ttl",
        "@prefix music: <http://example.org/music-ontology#> .\nmusic:pop a music:Genre ; music:name \"Pop\" .\n",
    );
    let store = FactStore::load(file.path()).expect("loads");
    assert_eq!(store.len(), 2);
    assert_eq!(store.count_of_type(EntityKind::Genre), 1);
}

#[test]
fn explicit_format_overrides_extension() {
    let file = write_temp(
        ".data",
        "<http://example.org/music-ontology#pop> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/music-ontology#Genre> .\n",
    );
    let store = FactStore::load_with_format(file.path(), DocumentFormat::NTriples).expect("loads");
    assert_eq!(store.len(), 1);
}

#[test]
fn sample_document_loads() {
    let store = FactStore::load(SAMPLE_OWL).expect("sample loads");
    assert_eq!(store.count_of_type(EntityKind::Artist), 3);
    assert_eq!(store.count_of_type(EntityKind::Album), 4);
    assert_eq!(store.count_of_type(EntityKind::Song), 5);
    assert_eq!(store.count_of_type(EntityKind::Instrument), 5);
    assert_eq!(store.count_of_type(EntityKind::Genre), 3);
}

#[test]
fn exports_reload_to_the_same_fact_set() {
    let store = FactStore::load(SAMPLE_OWL).expect("sample loads");

    let nt = write_temp(".nt", &ntriples::to_ntriples(&store));
    let from_nt = FactStore::load(nt.path()).expect("N-Triples reloads");
    assert_eq!(from_nt.len(), store.len());

    let ttl = write_temp(".ttl", &turtle::to_turtle(&store));
    let from_ttl = FactStore::load(ttl.path()).expect("Turtle reloads");
    assert_eq!(from_ttl.len(), store.len());
    assert!(store.iter().all(|t| from_ttl.iter().any(|o| o == t)));
}
