//! HTTP API handlers for aitrial-portal

pub mod cases;
pub mod composition;
pub mod health;
pub mod map;
pub mod overview;
pub mod trends;

pub use cases::list_cases;
pub use composition::get_composition;
pub use health::health_routes;
pub use map::{get_legend, get_map};
pub use overview::{get_facets, get_overview};
pub use trends::get_trends;
