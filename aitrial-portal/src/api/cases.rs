//! Searchable case list

use aitrial_common::{filter, CaseRecord, FacetSelection};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiResult;
use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::AppState;

/// Page selection for the case list
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// Case list response with results and metadata
#[derive(Debug, Serialize)]
pub struct CaseListResponse {
    pub selection: FacetSelection,
    pub total_results: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub cases: Vec<CaseRecord>,
}

/// GET /api/cases?term=&region=&issue=&year=&page=
///
/// An empty match is an empty list, not an error.
pub async fn list_cases(
    State(state): State<AppState>,
    Query(selection): Query<FacetSelection>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<CaseListResponse>> {
    let matched = filter::apply(state.store.all(), &selection)?;
    let p = calculate_pagination(matched.len(), query.page);

    let cases: Vec<CaseRecord> = matched
        .iter()
        .skip(p.offset)
        .take(PAGE_SIZE)
        .map(|r| (*r).clone())
        .collect();

    debug!("Case list page {} of {}", p.page, p.total_pages);

    Ok(Json(CaseListResponse {
        selection,
        total_results: matched.len(),
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        cases,
    }))
}
