//! Choropleth map data

use aitrial_common::geo::{legend, ColorBucket};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/map
///
/// Serves the precomputed enriched boundary collection as loaded at startup.
pub async fn get_map(State(state): State<AppState>) -> ApiResult<Response> {
    let body = state
        .choropleth
        .ok_or_else(|| ApiError::NotFound("choropleth artifact not loaded".to_string()))?;

    Ok(([(header::CONTENT_TYPE, "application/geo+json")], body).into_response())
}

/// GET /api/map/legend
pub async fn get_legend() -> Json<&'static [ColorBucket]> {
    Json(legend())
}
