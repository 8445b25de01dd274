//! Startup and per-request error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use music_ontology::{LoadError, QueryError};

use crate::response::ApiResponse;

/// Fatal errors raised before or while serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The layered configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The ontology document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// `host:port` does not form a socket address.
    #[error("invalid address: {0}")]
    Address(String),

    /// A configured CORS origin is not a valid header value.
    #[error("invalid CORS origin: {0}")]
    Origin(String),

    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-request failure, rendered as an error envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request itself is invalid.
    #[error("{0}")]
    BadRequest(String),

    /// The query failed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Query(QueryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Query(QueryError::MalformedData { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
