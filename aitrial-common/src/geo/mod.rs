//! Geographic name reconciliation and choropleth enrichment

pub mod alias;
pub mod color;
pub mod enrich;

pub use alias::{GeoNameResolver, ALIAS_ENTRIES};
pub use color::{compute_color, legend, ColorBucket, Rgb, COLOR_BUCKETS};
pub use enrich::{
    counts_by_region, read_artifact, BoundaryCollection, EnrichedCollection, EnrichmentReport,
    GeoEnrichmentPipeline,
};
