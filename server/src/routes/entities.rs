//! Per-kind listings, lookups by identifier and relational traversals.
//!
//! Listings and traversals return `{type, data}` hits; a lookup by
//! identifier returns the bare projection.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use music_ontology::{EntityKind, EntityProjection, QueryError, SearchHit};

use super::ApiResult;
use crate::response::ApiResponse;
use crate::server::AppState;

/// Routes for every entity kind plus the traversal endpoints.
///
/// Endpoints:
/// - GET /api/{kinds}                              - List every entity of a kind
/// - GET /api/{kinds}/{id}                         - First entity whose IRI contains `id`
/// - GET /api/albums/artist/{artist_id}            - Albums of an artist
/// - GET /api/songs/album/{album_id}               - Songs of an album
/// - GET /api/songs/artist/{artist_id}             - Songs across an artist's albums
/// - GET /api/songs/instrument/{instrument_id}     - Songs using an instrument
/// - GET /api/instruments/type/{instrument_type}   - Instruments of a family
/// - GET /api/genres/artist/{artist_id}            - Genres an artist performs
pub fn entity_routes() -> Router<AppState> {
    let mut router = Router::new();
    for kind in EntityKind::ALL {
        router = router
            .route(
                &format!("/api/{}", kind.plural()),
                get(move |State(state): State<AppState>| list_kind(state, kind)),
            )
            .route(
                &format!("/api/{}/{{id}}", kind.plural()),
                get(
                    move |State(state): State<AppState>, Path(id): Path<String>| {
                        get_by_id(state, kind, id)
                    },
                ),
            );
    }

    router
        .route("/api/albums/artist/{artist_id}", get(albums_of_artist))
        .route("/api/songs/album/{album_id}", get(songs_of_album))
        .route("/api/songs/artist/{artist_id}", get(songs_of_artist))
        .route("/api/songs/instrument/{instrument_id}", get(songs_using_instrument))
        .route("/api/instruments/type/{instrument_type}", get(instruments_of_type))
        .route("/api/genres/artist/{artist_id}", get(genres_of_artist))
}

fn found(
    entities: Result<Vec<EntityProjection>, QueryError>,
    kind: EntityKind,
) -> ApiResult<Vec<SearchHit>> {
    let hits: Vec<SearchHit> = entities?.into_iter().map(SearchHit::from).collect();
    let message = format!("Found {} {}", hits.len(), kind.plural());
    Ok(Json(ApiResponse::with_message(hits, message)))
}

async fn list_kind(state: AppState, kind: EntityKind) -> ApiResult<Vec<SearchHit>> {
    found(state.resolver.list_all(kind), kind)
}

async fn get_by_id(state: AppState, kind: EntityKind, id: String) -> ApiResult<EntityProjection> {
    let entity = state.resolver.get_by_fragment(kind, &id)?;
    Ok(Json(ApiResponse::ok(entity)))
}

async fn albums_of_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Vec<SearchHit>> {
    found(state.resolver.albums_of_artist(&artist_id), EntityKind::Album)
}

async fn songs_of_album(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
) -> ApiResult<Vec<SearchHit>> {
    found(state.resolver.songs_of_album(&album_id), EntityKind::Song)
}

async fn songs_of_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Vec<SearchHit>> {
    found(state.resolver.songs_of_artist(&artist_id), EntityKind::Song)
}

async fn songs_using_instrument(
    State(state): State<AppState>,
    Path(instrument_id): Path<String>,
) -> ApiResult<Vec<SearchHit>> {
    found(
        state.resolver.songs_using_instrument(&instrument_id),
        EntityKind::Song,
    )
}

async fn instruments_of_type(
    State(state): State<AppState>,
    Path(instrument_type): Path<String>,
) -> ApiResult<Vec<SearchHit>> {
    found(
        state.resolver.instruments_of_type(&instrument_type),
        EntityKind::Instrument,
    )
}

async fn genres_of_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Vec<SearchHit>> {
    found(state.resolver.genres_of_artist(&artist_id), EntityKind::Genre)
}
