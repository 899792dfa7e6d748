//! aitrial-portal library - read-only case catalog service
//!
//! Serves the catalog core's results (case search, facets, trends, map,
//! issue composition) as JSON over a shared, immutable snapshot.

use aitrial_common::config::DataPaths;
use aitrial_common::geo::{read_artifact, BoundaryCollection, GeoEnrichmentPipeline};
use aitrial_common::RecordStore;
use axum::body::Bytes;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod api;
pub mod error;
pub mod pagination;

/// Application state shared across HTTP handlers
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Case snapshot
    pub store: RecordStore,
    /// Serialized choropleth collection, if one could be loaded
    pub choropleth: Option<Bytes>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: RecordStore, choropleth: Option<Bytes>) -> Self {
        Self { store, choropleth }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/overview", get(api::get_overview))
        .route("/api/facets", get(api::get_facets))
        .route("/api/cases", get(api::list_cases))
        .route("/api/trends", get(api::get_trends))
        .route("/api/map", get(api::get_map))
        .route("/api/map/legend", get(api::get_legend))
        .route("/api/composition", get(api::get_composition));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load the choropleth body served by `/api/map`
///
/// Prefers the precomputed artifact. Without one, enriches the boundary file
/// in-process once. Returns `None` when neither file is usable.
pub fn load_map_data(paths: &DataPaths, store: &RecordStore) -> Option<Bytes> {
    if paths.choropleth.exists() {
        match read_artifact(&paths.choropleth).and_then(|v| Ok(serde_json::to_vec(&v)?)) {
            Ok(body) => {
                info!("Loaded choropleth artifact from {}", paths.choropleth.display());
                return Some(Bytes::from(body));
            }
            Err(e) => warn!("Ignoring choropleth artifact {}: {}", paths.choropleth.display(), e),
        }
    }

    if paths.boundaries.exists() {
        warn!(
            "No usable choropleth artifact; enriching {} at startup",
            paths.boundaries.display()
        );
        let enriched = BoundaryCollection::from_path(&paths.boundaries)
            .map(|boundaries| GeoEnrichmentPipeline::default().enrich(&boundaries, store))
            .and_then(|enriched| Ok(serde_json::to_vec(enriched.as_value())?));

        match enriched {
            Ok(body) => return Some(Bytes::from(body)),
            Err(e) => warn!("Failed to enrich {}: {}", paths.boundaries.display(), e),
        }
    }

    warn!("Map data unavailable; /api/map will return 404");
    None
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins over the configured default level.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
