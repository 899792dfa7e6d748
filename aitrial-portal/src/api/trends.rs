//! Trends over time

use aitrial_common::trends::{group_by_year, AggregationResult, Dimension};
use aitrial_common::{filter, FacetSelection};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;

/// Grouping choice for the trend chart
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// "None", "Region" or "Issue"
    #[serde(default)]
    pub group_by: String,
}

/// GET /api/trends?group_by=&term=&region=&issue=&year=
///
/// Aggregates the records left after applying the facet filters.
pub async fn get_trends(
    State(state): State<AppState>,
    Query(selection): Query<FacetSelection>,
    Query(query): Query<TrendQuery>,
) -> ApiResult<Json<AggregationResult>> {
    let dimension = Dimension::parse_group_by(&query.group_by)?;
    let matched = filter::apply(state.store.all(), &selection)?;
    Ok(Json(group_by_year(matched.iter().copied(), dimension)))
}
