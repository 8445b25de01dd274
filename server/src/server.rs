//! Router assembly and the serve loop.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use music_ontology::{EntityResolver, FactStore};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes::{entity_routes, health_routes, search_routes};

/// State shared by every handler: the resolver over the loaded store.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query engine over the immutable store.
    pub resolver: EntityResolver,
}

impl AppState {
    /// Wraps a resolver.
    #[must_use]
    pub fn new(resolver: EntityResolver) -> Self {
        Self { resolver }
    }
}

/// Builds the application router with CORS and request tracing.
///
/// # Errors
///
/// Returns [`ServerError::Origin`] if a configured CORS origin is not a valid
/// header value.
pub fn build_router(
    resolver: EntityResolver,
    config: &ServerConfig,
) -> Result<Router, ServerError> {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let list = config
            .cors_origins
            .iter()
            .map(|o| HeaderValue::from_str(o).map_err(|_| ServerError::Origin(o.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(list)
    };

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .merge(search_routes())
        .merge(entity_routes())
        .with_state(AppState::new(resolver))
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Loads the ontology and serves until Ctrl-C.
///
/// The document is loaded before binding, so a load failure means the
/// server never accepts a request.
///
/// # Errors
///
/// Returns [`ServerError`] if the document fails to load, the address is
/// invalid or the listener fails.
pub async fn start_server(config: &ServerConfig) -> Result<(), ServerError> {
    let store = FactStore::load(&config.ontology_path)?;
    let resolver = EntityResolver::new(Arc::new(store));
    let stats = resolver.stats();
    tracing::info!(
        artists = stats.artists,
        albums = stats.albums,
        songs = stats.songs,
        instruments = stats.instruments,
        genres = stats.genres,
        "resolver ready"
    );

    let app = build_router(resolver, config)?;
    let addr = config.socket_addr()?;

    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
