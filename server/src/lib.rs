//! REST API over a music ontology document.
//!
//! The server loads the ontology once at startup, wraps the resulting
//! [`EntityResolver`](music_ontology::EntityResolver) in [`AppState`] and
//! exposes its queries as JSON endpoints under `/api`. Every response uses
//! the [`ApiResponse`] envelope.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod server;

pub use config::{ServerArgs, ServerConfig};
pub use error::{ApiError, ServerError};
pub use response::ApiResponse;
pub use server::{build_router, start_server, AppState};
