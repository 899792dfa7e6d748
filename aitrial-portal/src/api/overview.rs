//! Landing view summary and facet choices

use aitrial_common::overview::{overview, Overview};
use aitrial_common::FacetDomains;
use axum::{extract::State, Json};

use crate::AppState;

/// Issues listed on the landing view
const TOP_ISSUES: usize = 3;

/// GET /api/overview
pub async fn get_overview(State(state): State<AppState>) -> Json<Overview> {
    Json(overview(&state.store, TOP_ISSUES))
}

/// GET /api/facets
pub async fn get_facets(State(state): State<AppState>) -> Json<FacetDomains> {
    Json(FacetDomains::from_store(&state.store))
}
