//! # AI on Trial Common Library
//!
//! Data-processing core of the AI litigation catalog:
//! - Case record store with load-time validation and region consolidation
//! - Multi-facet filtering
//! - Year-based aggregation for trend views
//! - Boundary name resolution and choropleth enrichment
//! - Per-country issue composition
//! - Configuration loading

pub mod cases;
pub mod composition;
pub mod config;
pub mod error;
pub mod filter;
pub mod geo;
pub mod overview;
pub mod trends;

pub use cases::{CaseField, CaseRecord, RecordStore};
pub use error::{Error, Result};
pub use filter::{FacetDomains, FacetSelection};
