//! HTTP routes, grouped by concern.

mod entities;
mod health;
mod search;

pub use entities::entity_routes;
pub use health::health_routes;
pub use search::search_routes;

use axum::Json;

use crate::error::ApiError;
use crate::response::ApiResponse;

/// Handler result: an enveloped payload or an [`ApiError`].
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
