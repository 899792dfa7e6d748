//! Issue composition by country

use aitrial_common::composition::{compare_countries, CompositionOutcome};
use aitrial_common::CaseField;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::AppState;

/// Countries to compare
#[derive(Debug, Deserialize)]
pub struct CompositionQuery {
    /// Comma-separated region names
    #[serde(default)]
    pub countries: String,
}

impl CompositionQuery {
    fn requested(&self) -> Vec<String> {
        self.countries
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// GET /api/composition?countries=A,B,C
///
/// With no countries, the first region alphabetically is shown. More than
/// three countries yields a warning instead of panels.
pub async fn get_composition(
    State(state): State<AppState>,
    Query(query): Query<CompositionQuery>,
) -> Json<CompositionOutcome> {
    let mut requested = query.requested();
    if requested.is_empty() {
        requested.extend(state.store.all_values(CaseField::Region).into_iter().take(1));
    }

    Json(compare_countries(state.store.all(), requested))
}
