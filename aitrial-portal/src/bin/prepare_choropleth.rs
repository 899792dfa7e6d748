//! prepare-choropleth - Precompute the enriched choropleth artifact
//!
//! Joins per-country case counts onto the boundary feature collection and
//! writes the result for the portal's map view. Re-run whenever the case
//! dataset or the boundary file changes.

use std::path::PathBuf;

use aitrial_common::config::{load_config, resolve_data_folder, DataPaths};
use aitrial_common::geo::{BoundaryCollection, GeoEnrichmentPipeline};
use aitrial_common::RecordStore;
use aitrial_portal::init_tracing;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

/// Command-line arguments for prepare-choropleth
#[derive(Parser, Debug)]
#[command(name = "prepare-choropleth")]
#[command(about = "Attach case counts and fill colors to boundary features")]
#[command(version)]
struct Args {
    /// Bootstrap TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder holding the case dataset and map files
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Case dataset (overrides config)
    #[arg(long)]
    cases: Option<PathBuf>,

    /// Boundary feature collection (overrides config)
    #[arg(long)]
    boundaries: Option<PathBuf>,

    /// Output artifact path (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    let data_folder = resolve_data_folder(args.data_folder.as_deref(), &config);
    let defaults = DataPaths::resolve(&data_folder, &config);
    let paths = DataPaths {
        cases: args.cases.unwrap_or(defaults.cases),
        boundaries: args.boundaries.unwrap_or(defaults.boundaries),
        choropleth: args.output.unwrap_or(defaults.choropleth),
    };

    let store = RecordStore::from_path(&paths.cases)
        .with_context(|| format!("Failed to load case dataset {}", paths.cases.display()))?;
    let boundaries = BoundaryCollection::from_path(&paths.boundaries)
        .with_context(|| format!("Failed to load boundaries {}", paths.boundaries.display()))?;

    let enriched = GeoEnrichmentPipeline::default().enrich(&boundaries, &store);
    let report = &enriched.report;

    for (region, count) in &report.unmatched_regions {
        warn!("{} cases for {:?} matched no boundary feature", count, region);
    }
    if report.cases_without_region > 0 {
        warn!("{} cases have no region", report.cases_without_region);
    }

    enriched
        .write_atomic(&paths.choropleth)
        .with_context(|| format!("Failed to write {}", paths.choropleth.display()))?;

    info!(
        "✅ {} features updated with case counts and color fills ({} cases, {} with zero)",
        report.feature_count, report.total_cases, report.zero_count_features
    );
    Ok(())
}
