//! Free-text search and store statistics.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use music_ontology::{OntologyStats, SearchHit};
use serde::Deserialize;

use super::ApiResult;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::server::AppState;

/// `GET /api/search` and `GET /api/stats`.
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/stats", get(stats))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<SearchHit>> {
    if params.q.is_empty() {
        return Err(ApiError::BadRequest(
            "query parameter 'q' must not be empty".to_string(),
        ));
    }

    let hits = state.resolver.search(&params.q)?;
    let message = format!("Found {} results", hits.len());
    Ok(Json(ApiResponse::with_message(hits, message)))
}

async fn stats(State(state): State<AppState>) -> ApiResult<OntologyStats> {
    Ok(Json(ApiResponse::with_message(
        state.resolver.stats(),
        "Ontology statistics",
    )))
}
