//! Case record store
//!
//! Holds the normalized, immutable snapshot of the case dataset. Every other
//! component reads from here; nothing mutates a record after load. The store
//! is cheap to clone and safe to share between request handlers.

mod normalize;
mod record;

pub use normalize::{consolidate_region, REGION_CONSOLIDATION};
pub use record::{CaseRecord, MIN_CASE_YEAR};

use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Record field that can back a facet domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseField {
    Region,
    Issue,
    Year,
    Court,
    FinalDecision,
}

impl CaseField {
    /// Text value of the field, `None` for null (and for `Year`)
    pub fn text<'a>(&self, record: &'a CaseRecord) -> Option<&'a str> {
        match self {
            CaseField::Region => record.region.as_deref(),
            CaseField::Issue => record.issue.as_deref(),
            CaseField::Court => record.court.as_deref(),
            CaseField::FinalDecision => record.final_decision.as_deref(),
            CaseField::Year => None,
        }
    }
}

/// Dataset entry skipped at load time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarantinedRecord {
    /// Position in the source array
    pub index: usize,
    pub reason: String,
}

/// Immutable case snapshot
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[CaseRecord]>,
    quarantined: Arc<[QuarantinedRecord]>,
}

impl RecordStore {
    /// Build a store from the parsed dataset
    ///
    /// Fails with `DataFormat` unless `raw` is an array of objects. Objects
    /// that fail validation are quarantined, not fatal.
    pub fn load(raw: Value) -> Result<Self> {
        let Value::Array(entries) = raw else {
            return Err(Error::DataFormat(
                "case dataset must be a JSON array of records".to_string(),
            ));
        };

        let mut records = Vec::with_capacity(entries.len());
        let mut quarantined = Vec::new();

        for (index, entry) in entries.into_iter().enumerate() {
            if !entry.is_object() {
                return Err(Error::DataFormat(format!(
                    "case dataset entry {} is not an object",
                    index
                )));
            }

            match record::validate_record(entry) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    warn!("Quarantined case record {}: {}", index, reason);
                    quarantined.push(QuarantinedRecord { index, reason });
                }
            }
        }

        let store = Self::from_records(records);
        info!(
            "Loaded {} case records ({} quarantined)",
            store.len(),
            quarantined.len()
        );

        Ok(Self {
            quarantined: quarantined.into(),
            ..store
        })
    }

    /// Parse and load a dataset from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| Error::DataFormat(format!("case dataset is not valid JSON: {}", e)))?;
        Self::load(raw)
    }

    /// Read and load a dataset file
    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading case dataset from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build a store from already validated records, applying consolidation
    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        Self {
            records: records.into_iter().map(normalize_record).collect(),
            quarantined: Arc::from(Vec::<QuarantinedRecord>::new()),
        }
    }

    /// Re-apply region consolidation; a no-op on any store built here
    pub fn normalized(&self) -> Self {
        Self {
            records: self.records.iter().cloned().map(normalize_record).collect(),
            quarantined: Arc::clone(&self.quarantined),
        }
    }

    /// Full record sequence in dataset order
    pub fn all(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Entries skipped during load
    pub fn quarantined(&self) -> &[QuarantinedRecord] {
        &self.quarantined
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct non-null values of `field`
    ///
    /// Text fields sort lexicographically, years numerically.
    pub fn all_values(&self, field: CaseField) -> Vec<String> {
        match field {
            CaseField::Year => self.years().iter().map(|y| y.to_string()).collect(),
            _ => self
                .records
                .iter()
                .filter_map(|r| field.text(r))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Sorted distinct non-null years
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .filter_map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn normalize_record(mut record: CaseRecord) -> CaseRecord {
    record.region = record
        .region
        .map(|region| consolidate_region(&region).to_string());
    record
}
