//! `music-query`: loads a music ontology document and answers one query.
//!
//! Query results are printed to stdout as pretty JSON, in the same shape the
//! REST API returns in its `data` field. A lookup that matches nothing exits
//! with status 1.
//!
//! **Usage:**
//! ```text
//! music-query [--ontology <path>] [--format <fmt>] <command>
//!
//! music-query search doe
//! music-query get artist jane-doe
//! music-query songs-of-artist john-doe
//! music-query export --to ttl --out music.ttl
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use music_ontology::serializer::{ntriples, turtle};
use music_ontology::{
    DocumentFormat, EntityKind, EntityProjection, EntityResolver, FactStore, QueryError, SearchHit,
};
use serde::Serialize;

/// Query a music ontology from the command line.
#[derive(Parser)]
#[command(name = "music-query", about = "Query a music ontology document")]
struct Args {
    /// Ontology document to load.
    #[arg(long, default_value = "data/music-ontology.owl")]
    ontology: PathBuf,

    /// Document format (rdfxml, turtle, ntriples). Defaults to the file extension.
    #[arg(long, value_parser = parse_format)]
    format: Option<DocumentFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Case-insensitive search over entity names.
    Search {
        /// Substring to look for.
        term: String,
    },
    /// List every entity of a kind.
    List {
        /// artist, album, song, instrument or genre.
        kind: EntityKind,
    },
    /// Show the first entity of a kind whose identifier contains the fragment.
    Get {
        /// artist, album, song, instrument or genre.
        kind: EntityKind,
        /// Identifier fragment, e.g. `jane-doe`.
        fragment: String,
    },
    /// Albums of an artist.
    AlbumsOf {
        /// Artist identifier (local name or full IRI).
        artist: String,
    },
    /// Songs of an album.
    SongsOfAlbum {
        /// Album identifier (local name or full IRI).
        album: String,
    },
    /// Songs across all albums of an artist.
    SongsOfArtist {
        /// Artist identifier (local name or full IRI).
        artist: String,
    },
    /// Songs that use an instrument.
    SongsUsing {
        /// Instrument identifier (local name or full IRI).
        instrument: String,
    },
    /// Instruments whose family contains the given text.
    InstrumentsOfType {
        /// Family, e.g. `string`.
        family: String,
    },
    /// Genres an artist performs.
    GenresOf {
        /// Artist identifier (local name or full IRI).
        artist: String,
    },
    /// Triple and entity counts.
    Stats,
    /// Write the loaded facts as N-Triples or Turtle.
    Export {
        /// Output syntax.
        #[arg(long, value_enum, default_value_t = ExportFormat::Nt)]
        to: ExportFormat,
        /// Output file. Defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// N-Triples.
    Nt,
    /// Turtle.
    Ttl,
}

fn parse_format(name: &str) -> Result<DocumentFormat, String> {
    DocumentFormat::from_name(name)
        .ok_or_else(|| format!("unknown format '{name}' (expected rdfxml, turtle or ntriples)"))
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let store = match args.format {
        Some(format) => FactStore::load_with_format(&args.ontology, format),
        None => FactStore::load(&args.ontology),
    }
    .with_context(|| format!("Failed to load ontology {}", args.ontology.display()))?;
    let resolver = EntityResolver::new(Arc::new(store));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&resolver, args.command, &mut out) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if is_not_found(&e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<QueryError>()
        .is_some_and(QueryError::is_not_found)
}

fn run(resolver: &EntityResolver, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Search { term } => print_json(out, &resolver.search(&term)?),
        Command::List { kind } => print_hits(out, resolver.list_all(kind)?),
        Command::Get { kind, fragment } => {
            print_json(out, &resolver.get_by_fragment(kind, &fragment)?)
        }
        Command::AlbumsOf { artist } => print_hits(out, resolver.albums_of_artist(&artist)?),
        Command::SongsOfAlbum { album } => print_hits(out, resolver.songs_of_album(&album)?),
        Command::SongsOfArtist { artist } => print_hits(out, resolver.songs_of_artist(&artist)?),
        Command::SongsUsing { instrument } => {
            print_hits(out, resolver.songs_using_instrument(&instrument)?)
        }
        Command::InstrumentsOfType { family } => {
            print_hits(out, resolver.instruments_of_type(&family)?)
        }
        Command::GenresOf { artist } => print_hits(out, resolver.genres_of_artist(&artist)?),
        Command::Stats => print_json(out, &resolver.stats()),
        Command::Export { to, out: path } => {
            let text = match to {
                ExportFormat::Nt => ntriples::to_ntriples(resolver.store()),
                ExportFormat::Ttl => turtle::to_turtle(resolver.store()),
            };
            match path {
                Some(path) => {
                    fs::write(&path, &text)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!(
                        "  Written: {} ({} triples)",
                        path.display(),
                        resolver.store().len()
                    );
                    Ok(())
                }
                None => out.write_all(text.as_bytes()).context("Failed to write output"),
            }
        }
    }
}

fn print_hits(out: &mut impl Write, entities: Vec<EntityProjection>) -> Result<()> {
    let hits: Vec<SearchHit> = entities.into_iter().map(SearchHit::from).collect();
    print_json(out, &hits)
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    writeln!(out, "{json}").context("Failed to write output")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    const SAMPLE_OWL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/music-ontology.owl");

    fn resolver() -> EntityResolver {
        EntityResolver::new(Arc::new(FactStore::load(SAMPLE_OWL).expect("sample loads")))
    }

    fn run_args(argv: &[&str]) -> Result<Vec<u8>> {
        let args = Args::try_parse_from(argv).expect("valid arguments");
        let mut out = Vec::new();
        run(&resolver(), args.command, &mut out)?;
        Ok(out)
    }

    fn run_json(argv: &[&str]) -> Value {
        let out = run_args(argv).expect("command succeeds");
        serde_json::from_slice(&out).expect("json output")
    }

    #[test]
    fn get_prints_bare_projection() {
        let value = run_json(&["music-query", "get", "artist", "jane-doe"]);
        assert_eq!(value["name"], json!("Jane Doe"));
        assert_eq!(value["genre"], json!("Pop"));
    }

    #[test]
    fn list_accepts_plural_kind() {
        let value = run_json(&["music-query", "list", "Genres"]);
        let kinds: Vec<&str> = value
            .as_array()
            .map(|a| a.iter().filter_map(|h| h["type"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(kinds, vec!["genre", "genre", "genre"]);
    }

    #[test]
    fn unknown_fragment_is_not_found() {
        let err = run_args(&["music-query", "get", "song", "no-such-song"]).err();
        assert!(err.as_ref().is_some_and(is_not_found));
    }

    #[test]
    fn stats_prints_counts() {
        let value = run_json(&["music-query", "stats"]);
        assert_eq!(value["songs"], json!(5));
    }

    #[test]
    fn unknown_kind_is_rejected_by_parser() {
        assert!(Args::try_parse_from(["music-query", "list", "bands"]).is_err());
        assert!(Args::try_parse_from(["music-query", "--format", "yaml", "stats"]).is_err());
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("music.ttl");
        let path_arg = path.to_string_lossy().into_owned();
        let out = run_args(&["music-query", "export", "--to", "ttl", "--out", path_arg.as_str()])
            .expect("export succeeds");
        assert!(out.is_empty());

        let reloaded = FactStore::load(&path).expect("exported Turtle loads");
        assert_eq!(reloaded.len(), resolver().store().len());
    }

    #[test]
    fn export_defaults_to_ntriples_on_stdout() {
        let out = run_args(&["music-query", "export"]).expect("export succeeds");
        let text = String::from_utf8(out).expect("utf-8");
        assert_eq!(text.lines().count(), resolver().store().len());
    }
}
