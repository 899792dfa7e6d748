//! Choropleth enrichment of boundary features
//!
//! Joins per-region case counts onto a boundary feature collection. Each
//! feature gains `cases` and `fill_color` properties; geometry and every
//! other property pass through untouched, and feature order and count are
//! preserved. Runs as a precompute step whenever the case dataset or the
//! boundary set changes, not per query.

use super::alias::GeoNameResolver;
use super::color::compute_color;
use crate::cases::{CaseRecord, RecordStore};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Validated boundary feature collection
///
/// Top level is an object with a `features` array; every feature is an
/// object whose `properties.name` is a string.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCollection {
    raw: Value,
}

impl BoundaryCollection {
    pub fn from_value(raw: Value) -> Result<Self> {
        let features = raw
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                Error::DataFormat("boundary collection has no \"features\" array".to_string())
            })?;

        for (index, feature) in features.iter().enumerate() {
            if feature_name(feature).is_none() {
                return Err(Error::DataFormat(format!(
                    "boundary feature {} has no string properties.name",
                    index
                )));
            }
        }

        Ok(Self { raw })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(json).map_err(|e| {
            Error::DataFormat(format!("boundary collection is not valid JSON: {}", e))
        })?;
        Self::from_value(raw)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading boundary features from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn features(&self) -> &[Value] {
        self.raw
            .get("features")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.features().len()
    }

    pub fn is_empty(&self) -> bool {
        self.features().is_empty()
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }
}

fn feature_name(feature: &Value) -> Option<&str> {
    feature.get("properties")?.get("name")?.as_str()
}

/// Number of records per canonical region; null regions are not counted
pub fn counts_by_region(records: &[CaseRecord]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for region in records.iter().filter_map(|r| r.region.as_deref()) {
        *counts.entry(region).or_insert(0) += 1;
    }
    counts
}

/// Accounting for where every case went during enrichment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentReport {
    pub feature_count: usize,
    /// Sum of `cases` over all output features
    pub total_cases: usize,
    pub zero_count_features: usize,
    /// Regions with cases that no feature resolved to
    pub unmatched_regions: BTreeMap<String, usize>,
    /// Records with no region at all
    pub cases_without_region: usize,
    /// Canonical names claimed by more than one feature (counted once per feature)
    pub shared_names: Vec<String>,
}

/// Enriched collection plus its report
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCollection {
    collection: Value,
    pub report: EnrichmentReport,
}

impl EnrichedCollection {
    pub fn as_value(&self) -> &Value {
        &self.collection
    }

    pub fn into_value(self) -> Value {
        self.collection
    }

    /// Write the collection as a standalone artifact
    ///
    /// Writes to `<path>.tmp` and renames over `path`, so readers never see a
    /// partial file.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Config(format!("Not a file path: {}", path.display())))?;
        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        {
            let file = std::fs::File::create(&temp_path)?;
            let mut writer = std::io::BufWriter::new(file);
            serde_json::to_writer(&mut writer, &self.collection)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }

        std::fs::rename(&temp_path, path)?;
        info!("Wrote choropleth artifact to {}", path.display());
        Ok(())
    }
}

/// Read a previously written artifact
///
/// Every feature must already carry `cases` and `fill_color`.
pub fn read_artifact(path: &Path) -> Result<Value> {
    let collection = BoundaryCollection::from_path(path)?;
    for (index, feature) in collection.features().iter().enumerate() {
        let props = &feature["properties"];
        if !props["cases"].is_u64() || !props["fill_color"].is_array() {
            return Err(Error::DataFormat(format!(
                "choropleth feature {} is missing cases or fill_color",
                index
            )));
        }
    }
    Ok(collection.raw)
}

/// Boundary enrichment pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoEnrichmentPipeline {
    resolver: GeoNameResolver,
}

impl GeoEnrichmentPipeline {
    pub fn new(resolver: GeoNameResolver) -> Self {
        Self { resolver }
    }

    /// Attach case counts and fill colors to every boundary feature
    pub fn enrich(&self, boundaries: &BoundaryCollection, store: &RecordStore) -> EnrichedCollection {
        let counts = counts_by_region(store.all());
        let mut claimed: HashMap<&str, usize> = HashMap::new();
        let mut report = EnrichmentReport {
            feature_count: boundaries.len(),
            cases_without_region: store.all().iter().filter(|r| r.region.is_none()).count(),
            ..EnrichmentReport::default()
        };

        let mut enriched_features = Vec::with_capacity(boundaries.len());
        for feature in boundaries.features() {
            // Validated at construction
            let native = feature_name(feature).unwrap_or_default();
            let canonical = self.resolver.resolve(native);
            let cases = counts.get(canonical).copied().unwrap_or(0);

            if cases == 0 {
                report.zero_count_features += 1;
                if !self.resolver.is_aliased(native) {
                    debug!("No cases for boundary {:?}", native);
                }
            } else {
                *claimed.entry(canonical).or_insert(0) += 1;
            }
            report.total_cases += cases;

            let mut feature = feature.clone();
            if let Some(props) = feature.get_mut("properties").and_then(Value::as_object_mut) {
                props.insert("cases".to_string(), json!(cases));
                props.insert("fill_color".to_string(), json!(compute_color(cases)));
            }
            enriched_features.push(feature);
        }

        for (region, count) in &counts {
            if !claimed.contains_key(region) {
                report.unmatched_regions.insert(region.to_string(), *count);
            }
        }

        let mut shared: Vec<String> = claimed
            .into_iter()
            .filter(|(_, features)| *features > 1)
            .map(|(name, _)| name.to_string())
            .collect();
        shared.sort();
        for name in &shared {
            warn!("Several boundary features resolve to {:?}; its cases are counted on each", name);
        }
        report.shared_names = shared;

        let mut collection = boundaries.raw.clone();
        collection["features"] = Value::Array(enriched_features);

        info!(
            "Enriched {} features with {} cases ({} regions unmatched)",
            report.feature_count,
            report.total_cases,
            report.unmatched_regions.len()
        );

        EnrichedCollection { collection, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::color::{LIGHT_GRAY, PALE_BLUE};

    fn boundaries() -> BoundaryCollection {
        BoundaryCollection::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "France", "iso": "FRA"},
                 "geometry": {"type": "Point", "coordinates": [2.35, 48.85]}},
                {"type": "Feature", "properties": {"name": "United States of America"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}},
                {"type": "Feature", "properties": {"name": "Greenland"}, "geometry": null}
            ]
        }))
        .unwrap()
    }

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            CaseRecord::new("a").with_region("France"),
            CaseRecord::new("b").with_region("France"),
            CaseRecord::new("c").with_region("United States"),
            CaseRecord::new("d").with_region("Europe"),
            CaseRecord::new("e"),
        ])
    }

    #[test]
    fn test_enrich_attaches_counts_and_colors() {
        let enriched = GeoEnrichmentPipeline::default().enrich(&boundaries(), &store());
        let features = enriched.as_value()["features"].as_array().unwrap();

        assert_eq!(features.len(), 3);
        assert_eq!(features[0]["properties"]["cases"], json!(2));
        assert_eq!(features[0]["properties"]["fill_color"], json!(PALE_BLUE));
        assert_eq!(features[1]["properties"]["cases"], json!(1));
        assert_eq!(features[2]["properties"]["cases"], json!(0));
        assert_eq!(features[2]["properties"]["fill_color"], json!(LIGHT_GRAY));
    }

    #[test]
    fn test_enrich_preserves_geometry_and_other_properties() {
        let input = boundaries();
        let enriched = GeoEnrichmentPipeline::default().enrich(&input, &store());
        let out = enriched.as_value();

        assert_eq!(out["type"], "FeatureCollection");
        for (before, after) in input.features().iter().zip(out["features"].as_array().unwrap()) {
            assert_eq!(before["geometry"], after["geometry"]);
            assert_eq!(before["properties"]["name"], after["properties"]["name"]);
        }
        assert_eq!(out["features"][0]["properties"]["iso"], "FRA");
    }

    #[test]
    fn test_enrich_does_not_modify_input() {
        let input = boundaries();
        let before = input.clone();
        GeoEnrichmentPipeline::default().enrich(&input, &store());
        assert_eq!(input, before);
    }

    #[test]
    fn test_report_accounts_for_every_case() {
        let store = store();
        let enriched = GeoEnrichmentPipeline::default().enrich(&boundaries(), &store);
        let report = &enriched.report;

        assert_eq!(report.feature_count, 3);
        assert_eq!(report.total_cases, 3);
        assert_eq!(report.zero_count_features, 1);
        assert_eq!(report.unmatched_regions.get("European Union"), Some(&1));
        assert_eq!(report.cases_without_region, 1);
        assert!(report.shared_names.is_empty());

        let unmatched: usize = report.unmatched_regions.values().sum();
        assert_eq!(
            report.total_cases + unmatched + report.cases_without_region,
            store.len()
        );
    }

    #[test]
    fn test_shared_canonical_name_is_reported() {
        let boundaries = BoundaryCollection::from_value(json!({
            "features": [
                {"properties": {"name": "France"}},
                {"properties": {"name": "France"}}
            ]
        }))
        .unwrap();
        let enriched = GeoEnrichmentPipeline::default().enrich(&boundaries, &store());
        assert_eq!(enriched.report.shared_names, vec!["France".to_string()]);
        assert_eq!(enriched.report.total_cases, 4);
    }

    #[test]
    fn test_invalid_boundaries_rejected() {
        assert!(matches!(
            BoundaryCollection::from_value(json!({"type": "FeatureCollection"})),
            Err(Error::DataFormat(_))
        ));
        assert!(matches!(
            BoundaryCollection::from_value(json!({"features": [{"properties": {"name": 3}}]})),
            Err(Error::DataFormat(_))
        ));
        assert!(matches!(
            BoundaryCollection::from_json_str("not json"),
            Err(Error::DataFormat(_))
        ));
    }

    #[test]
    fn test_counts_by_region_skips_null() {
        let store = store();
        let counts = counts_by_region(store.all());
        assert_eq!(counts.get("France"), Some(&2));
        assert_eq!(counts.get("European Union"), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), 4);
    }

    #[test]
    fn test_write_and_read_artifact() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("choropleth.geojson");
        let enriched = GeoEnrichmentPipeline::default().enrich(&boundaries(), &store());

        enriched.write_atomic(&path).unwrap();
        assert!(!dir.path().join("choropleth.geojson.tmp").exists());

        let loaded = read_artifact(&path).unwrap();
        assert_eq!(&loaded, enriched.as_value());
    }

    #[test]
    fn test_read_artifact_rejects_unenriched_collection() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("countries.geojson");
        std::fs::write(&path, r#"{"features": [{"properties": {"name": "France"}}]}"#).unwrap();
        assert!(matches!(read_artifact(&path), Err(Error::DataFormat(_))));
    }
}
