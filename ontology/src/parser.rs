//! Ontology document parsing.
//!
//! Wraps the sophia parsers for RDF/XML, Turtle and N-Triples and converts the
//! borrowed sophia terms into owned [`Triple`]s. A parse either yields every
//! triple of the document or fails as a whole.
//!
//! The RDF/XML parser stops quietly at end of input even when the root element
//! is still open, so RDF/XML documents are first checked for well-formedness:
//! exactly one root element, closed before the end of the document.

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use sophia_api::source::TripleSource;
use sophia_api::term::{Term as RdfTerm, TermKind};
use sophia_api::triple::Triple as RdfTriple;

use crate::error::LoadError;
use crate::model::{iris, Literal, Term, Triple};

/// Serialization formats accepted for the ontology document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentFormat {
    /// RDF/XML (OWL files exported from Protégé and similar tools).
    #[default]
    RdfXml,
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    NTriples,
}

impl DocumentFormat {
    /// Picks a format from a file extension. Unknown or missing extensions
    /// fall back to RDF/XML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("ttl") => DocumentFormat::Turtle,
            Some("nt") => DocumentFormat::NTriples,
            _ => DocumentFormat::RdfXml,
        }
    }

    /// Parses a user-supplied format name (`rdfxml`, `owl`, `xml`, `turtle`,
    /// `ttl`, `ntriples`, `nt`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "rdfxml" | "rdf-xml" | "rdf" | "owl" | "xml" => Some(DocumentFormat::RdfXml),
            "turtle" | "ttl" => Some(DocumentFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Some(DocumentFormat::NTriples),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentFormat::RdfXml => "RDF/XML",
            DocumentFormat::Turtle => "Turtle",
            DocumentFormat::NTriples => "N-Triples",
        })
    }
}

/// Parses every triple from `reader`.
///
/// `origin` names the source in error messages.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] on the first syntax error, and for RDF/XML
/// documents that are empty or end before the root element is closed.
pub fn parse_reader<R: BufRead>(
    mut reader: R,
    format: DocumentFormat,
    origin: &str,
) -> Result<Vec<Triple>, LoadError> {
    let mut triples = Vec::new();
    let result = match format {
        DocumentFormat::RdfXml => {
            let mut document = Vec::new();
            reader
                .read_to_end(&mut document)
                .map_err(|e| e.to_string())
                .and_then(|_| check_well_formed(document.as_slice()))
                .and_then(|()| {
                    sophia_xml::parser::parse_bufread(document.as_slice())
                        .for_each_triple(|t| push_triple(&mut triples, &t))
                        .map_err(|e| e.to_string())
                })
        }
        DocumentFormat::Turtle => sophia_turtle::parser::turtle::parse_bufread(reader)
            .for_each_triple(|t| push_triple(&mut triples, &t))
            .map_err(|e| e.to_string()),
        DocumentFormat::NTriples => sophia_turtle::parser::nt::parse_bufread(reader)
            .for_each_triple(|t| push_triple(&mut triples, &t))
            .map_err(|e| e.to_string()),
    };

    result.map_err(|message| LoadError::Parse {
        origin: origin.to_string(),
        format,
        message,
    })?;
    Ok(triples)
}

/// Walks the XML element tree and requires a single root element that is
/// closed before end of input. End-tag names are matched by the reader.
fn check_well_formed<R: BufRead>(input: R) -> Result<(), String> {
    let mut reader = quick_xml::Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| format!("at byte {}: {e}", reader.buffer_position()))?;
        match event {
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::Empty(_) if depth == 0 => roots += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(text) if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) => {
                return Err("text outside the root element".to_string());
            }
            Event::Eof => break,
            _ => {}
        }
        if roots > 1 {
            return Err("more than one root element".to_string());
        }
        buf.clear();
    }

    match (roots, depth) {
        (0, _) => Err("document has no root element".to_string()),
        (_, 0) => Ok(()),
        (_, open) => Err(format!(
            "unexpected end of document with {open} element(s) still open"
        )),
    }
}

fn push_triple<T: RdfTriple>(out: &mut Vec<Triple>, t: &T) {
    let (Some(subject), Some(predicate), Some(object)) =
        (node_id(&t.s()), node_id(&t.p()), object_term(&t.o()))
    else {
        // Generalized triples (literal subjects, variables) have no meaning here.
        return;
    };
    out.push(Triple {
        subject,
        predicate,
        object,
    });
}

fn node_id<T: RdfTerm>(term: &T) -> Option<String> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| iri.as_str().to_string()),
        TermKind::BlankNode => term.bnode_id().map(|id| format!("_:{}", id.as_str())),
        _ => None,
    }
}

fn object_term<T: RdfTerm>(term: &T) -> Option<Term> {
    match term.kind() {
        TermKind::Literal => {
            let lexical = term.lexical_form()?.to_string();
            let language = term.language_tag().map(|tag| tag.as_str().to_string());
            // Language-tagged strings always report rdf:langString and simple
            // literals report xsd:string; neither is kept.
            let datatype = if language.is_some() {
                None
            } else {
                term.datatype()
                    .map(|dt| dt.as_str().to_string())
                    .filter(|dt| dt != iris::XSD_STRING)
            };
            Some(Term::Literal(Literal {
                lexical,
                datatype,
                language,
            }))
        }
        TermKind::Iri => node_id(term).map(Term::Iri),
        TermKind::BlankNode => node_id(term).map(Term::BlankNode),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("data/music.owl")),
            DocumentFormat::RdfXml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("music.TTL")),
            DocumentFormat::Turtle
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("dump.nt")),
            DocumentFormat::NTriples
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("no-extension")),
            DocumentFormat::RdfXml
        );
    }

    #[test]
    fn parses_rdf_xml_typed_node() {
        let doc = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:music="http://example.org/music-ontology#">
  <music:Genre rdf:about="http://example.org/music-ontology#jazz">
    <music:name>Jazz</music:name>
  </music:Genre>
</rdf:RDF>"#;
        let triples =
            parse_reader(doc.as_bytes(), DocumentFormat::RdfXml, "<memory>").expect("parses");
        assert_eq!(triples.len(), 2);
        assert!(triples.contains(&Triple::new(
            iris::music("jazz"),
            iris::RDF_TYPE,
            Term::iri(iris::music("Genre")),
        )));
        assert!(triples.contains(&Triple::new(
            iris::music("jazz"),
            iris::music("name"),
            Term::literal("Jazz"),
        )));
    }

    #[test]
    fn parses_turtle_literals_with_datatype() {
        let doc = r#"
@prefix music: <http://example.org/music-ontology#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
music:debut music:releaseYear "2020"^^xsd:integer .
"#;
        let triples =
            parse_reader(doc.as_bytes(), DocumentFormat::Turtle, "<memory>").expect("parses");
        assert_eq!(
            triples,
            vec![Triple::new(
                iris::music("debut"),
                iris::music("releaseYear"),
                Term::typed_literal("2020", iris::XSD_INTEGER),
            )]
        );
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description>
</rdf:RDF>"#;
        let err = parse_reader(doc.as_bytes(), DocumentFormat::RdfXml, "broken.owl").err();
        match err {
            Some(LoadError::Parse { origin, format, .. }) => {
                assert_eq!(origin, "broken.owl");
                assert_eq!(format, DocumentFormat::RdfXml);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn rdf_xml_without_closed_root_is_rejected() {
        let unclosed = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">"#;
        for doc in ["", "  \n", "<?xml version=\"1.0\"?>\n", unclosed] {
            let err = parse_reader(doc.as_bytes(), DocumentFormat::RdfXml, "<memory>").err();
            assert!(
                matches!(err, Some(LoadError::Parse { .. })),
                "accepted {doc:?}"
            );
        }
    }

    #[test]
    fn well_formed_check_counts_roots() {
        assert!(check_well_formed(&b"<a><b/></a>\n"[..]).is_ok());
        assert!(check_well_formed(&b"<a/><b/>"[..]).is_err());
        assert!(check_well_formed(&b"<a></a>stray"[..]).is_err());
        assert!(check_well_formed(&b"<a><b></a>"[..]).is_err());
    }
}
