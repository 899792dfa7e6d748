//! Integration tests for aitrial-portal API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Overview and facet domains
//! - Case search with facets and pagination
//! - Trends with grouping
//! - Map artifact and legend
//! - Issue composition, including the three-country cap

use aitrial_common::config::DataPaths;
use aitrial_common::geo::{BoundaryCollection, GeoEnrichmentPipeline};
use aitrial_common::RecordStore;
use aitrial_portal::{build_router, load_map_data, AppState};
use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: small in-memory dataset
fn test_store() -> RecordStore {
    RecordStore::load(json!([
        {"caseName": "Getty Images v. Stability AI", "year": 2023, "region": "United Kingdom",
         "issue": "Copyright", "summary": "Training on licensed photographs"},
        {"caseName": "Clearview AI fine", "year": 2022, "region": "France",
         "issue": "Privacy", "summary": "Facial recognition scraping"},
        {"caseName": "Deliveroo riders", "year": 2021, "region": "Italy",
         "issue": "Labour", "summary": "Algorithmic discrimination of riders"},
        {"caseName": "SCHUFA", "year": 2023, "region": "Europe",
         "issue": "Automated decision-making", "summary": "Credit scoring"},
        {"caseName": "Doctolib", "year": 2021, "region": "France",
         "issue": "Privacy", "summary": "Health data hosting"}
    ]))
    .expect("Test dataset should load")
}

/// Test helper: enriched map body for the test store
fn test_map(store: &RecordStore) -> Bytes {
    let boundaries = BoundaryCollection::from_value(json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "France"}, "geometry": null},
            {"type": "Feature", "properties": {"name": "Spain"}, "geometry": null}
        ]
    }))
    .unwrap();
    let enriched = GeoEnrichmentPipeline::default().enrich(&boundaries, store);
    Bytes::from(serde_json::to_vec(enriched.as_value()).unwrap())
}

/// Test helper: app with map loaded
fn setup_app() -> axum::Router {
    let store = test_store();
    let map = test_map(&store);
    build_router(AppState::new(store, Some(map)))
}

/// Test helper: GET request
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app.oneshot(get(uri)).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Health, Overview, Facets
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get_json(setup_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "aitrial-portal");
    assert_eq!(body["cases"], 5);
    assert_eq!(body["map_loaded"], true);
}

#[tokio::test]
async fn test_overview() {
    let (status, body) = get_json(setup_app(), "/api/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cases"], 5);
    assert_eq!(body["unique_issues"], 4);
    assert_eq!(body["unique_regions"], 4);
    assert_eq!(body["top_issues"].as_array().unwrap().len(), 3);
    assert_eq!(body["top_issues"][0]["issue"], "Privacy");
    assert_eq!(body["top_issues"][0]["count"], 2);
}

#[tokio::test]
async fn test_facets_include_sentinel_and_consolidated_region() {
    let (status, body) = get_json(setup_app(), "/api/facets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["regions"][0], "All");
    let regions: Vec<&str> = body["regions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(regions.contains(&"European Union"));
    assert!(!regions.contains(&"Europe"));
    assert_eq!(body["years"], json!(["All", "2021", "2022", "2023"]));
}

// =============================================================================
// Case Search
// =============================================================================

#[tokio::test]
async fn test_cases_unfiltered_returns_everything_in_order() {
    let (status, body) = get_json(setup_app(), "/api/cases").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 5);
    assert_eq!(body["page"], 1);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["cases"][0]["caseName"], "Getty Images v. Stability AI");
    assert_eq!(body["cases"][4]["caseName"], "Doctolib");
}

#[tokio::test]
async fn test_cases_filtered_by_region_and_year() {
    let (status, body) = get_json(setup_app(), "/api/cases?region=France&year=2021").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["cases"][0]["caseName"], "Doctolib");
}

#[tokio::test]
async fn test_cases_term_search() {
    let (status, body) = get_json(setup_app(), "/api/cases?term=RIDERS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["cases"][0]["region"], "Italy");
}

#[tokio::test]
async fn test_cases_all_sentinel_is_unconstrained() {
    let (_, body) = get_json(setup_app(), "/api/cases?region=All&issue=All&year=All").await;
    assert_eq!(body["total_results"], 5);
}

#[tokio::test]
async fn test_cases_empty_result_is_not_error() {
    let (status, body) = get_json(setup_app(), "/api/cases?region=Atlantis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 0);
    assert_eq!(body["cases"], json!([]));
}

#[tokio::test]
async fn test_cases_invalid_year_is_bad_request() {
    let (status, body) = get_json(setup_app(), "/api/cases?year=recent").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_cases_page_clamped() {
    let (status, body) = get_json(setup_app(), "/api/cases?page=40").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["cases"].as_array().unwrap().len(), 5);
}

// =============================================================================
// Trends
// =============================================================================

#[tokio::test]
async fn test_trends_ungrouped() {
    let (status, body) = get_json(setup_app(), "/api/trends").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["rows"],
        json!([
            {"year": 2021, "count": 2},
            {"year": 2022, "count": 1},
            {"year": 2023, "count": 2}
        ])
    );
}

#[tokio::test]
async fn test_trends_grouped_by_issue_with_filter() {
    let (status, body) = get_json(setup_app(), "/api/trends?group_by=Issue&region=France").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dimension"], "issue");
    assert_eq!(
        body["rows"],
        json!([
            {"year": 2021, "group": "Privacy", "count": 1},
            {"year": 2022, "group": "Privacy", "count": 1}
        ])
    );
}

#[tokio::test]
async fn test_trends_unknown_group_by_is_bad_request() {
    let (status, _) = get_json(setup_app(), "/api/trends?group_by=court").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Map
// =============================================================================

#[tokio::test]
async fn test_map_serves_enriched_collection() {
    let (status, body) = get_json(setup_app(), "/api/map").await;
    assert_eq!(status, StatusCode::OK);
    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["properties"]["cases"], 2);
    assert_eq!(features[1]["properties"]["cases"], 0);
    assert_eq!(features[1]["properties"]["fill_color"], json!([230, 230, 230]));
}

#[tokio::test]
async fn test_map_missing_is_not_found() {
    let app = build_router(AppState::new(test_store(), None));
    let (status, body) = get_json(app, "/api/map").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_legend() {
    let (status, body) = get_json(setup_app(), "/api/map/legend").await;
    assert_eq!(status, StatusCode::OK);
    let legend = body.as_array().unwrap();
    assert_eq!(legend.len(), 5);
    assert_eq!(legend[0]["max_cases"], 0);
    assert_eq!(legend[4]["max_cases"], Value::Null);
    assert_eq!(legend[4]["color"], json!([30, 60, 140]));
}

#[test]
fn test_load_map_data_falls_back_to_boundaries() {
    let dir = tempfile::TempDir::new().unwrap();
    let paths = DataPaths {
        cases: dir.path().join("cases.json"),
        boundaries: dir.path().join("countries.geojson"),
        choropleth: dir.path().join("choropleth.geojson"),
    };
    let store = test_store();

    assert!(load_map_data(&paths, &store).is_none());

    std::fs::write(
        &paths.boundaries,
        r#"{"type": "FeatureCollection", "features": [{"properties": {"name": "Italy"}}]}"#,
    )
    .unwrap();
    let body = load_map_data(&paths, &store).expect("Should enrich boundaries");
    let map: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(map["features"][0]["properties"]["cases"], 1);
}

// =============================================================================
// Composition
// =============================================================================

#[tokio::test]
async fn test_composition_two_countries() {
    let (status, body) = get_json(setup_app(), "/api/composition?countries=France,Italy").await;
    assert_eq!(status, StatusCode::OK);
    let panels = body["panels"].as_array().unwrap();
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[0]["country"], "France");
    assert_eq!(panels[0]["issues"][0], json!({"issue": "Privacy", "count": 2}));
    assert_eq!(panels[1]["country"], "Italy");
}

#[tokio::test]
async fn test_composition_defaults_to_first_region() {
    let (_, body) = get_json(setup_app(), "/api/composition").await;
    let panels = body["panels"].as_array().unwrap();
    assert_eq!(panels.len(), 1);
    assert_eq!(panels[0]["country"], "European Union");
}

#[tokio::test]
async fn test_composition_four_countries_warns() {
    let (status, body) = get_json(
        setup_app(),
        "/api/composition?countries=France,Italy,United%20Kingdom,European%20Union",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["warning"],
        "Please select only up to 3 countries for comparison."
    );
    assert!(body.get("panels").is_none());
}
