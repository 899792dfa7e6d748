//! Year-based aggregation for time-series views
//!
//! Records are partitioned by year and, optionally, by region or issue.
//! Records that cannot be placed in a partition (no year, or a null value on
//! the active dimension) are not counted in any row; their number is reported
//! in [`AggregationResult::excluded`] so row totals always reconcile with the
//! input size.

use crate::cases::CaseRecord;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Secondary grouping dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Region,
    Issue,
}

impl Dimension {
    /// Value of this dimension on a record
    pub fn value<'a>(&self, record: &'a CaseRecord) -> Option<&'a str> {
        match self {
            Dimension::Region => record.region.as_deref(),
            Dimension::Issue => record.issue.as_deref(),
        }
    }

    /// Parse a "group by" choice: `None`, `Region` or `Issue` (any case)
    ///
    /// An empty choice means no grouping.
    pub fn parse_group_by(choice: &str) -> Result<Option<Dimension>> {
        match choice.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(None),
            "region" => Ok(Some(Dimension::Region)),
            "issue" => Ok(Some(Dimension::Issue)),
            _ => Err(Error::InvalidFilterValue {
                facet: "group_by",
                value: choice.to_string(),
            }),
        }
    }
}

/// One (year, group) partition and its size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendRow {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub count: usize,
}

/// Ordered aggregation rows, year ascending
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub dimension: Option<Dimension>,
    pub rows: Vec<TrendRow>,
    /// Input records not attributable to any row
    pub excluded: usize,
}

impl AggregationResult {
    /// Sum of all row counts
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }
}

/// Group `records` by year and an optional secondary dimension
pub fn group_by_year<'a, I>(records: I, dimension: Option<Dimension>) -> AggregationResult
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut partitions: BTreeMap<(i32, Option<&str>), usize> = BTreeMap::new();
    let mut excluded = 0usize;

    for record in records {
        let Some(year) = record.year else {
            excluded += 1;
            continue;
        };

        let group = match dimension {
            Some(dim) => match dim.value(record) {
                Some(value) => Some(value),
                None => {
                    excluded += 1;
                    continue;
                }
            },
            None => None,
        };

        *partitions.entry((year, group)).or_insert(0) += 1;
    }

    let rows: Vec<TrendRow> = partitions
        .into_iter()
        .map(|((year, group), count)| TrendRow {
            year,
            group: group.map(str::to_string),
            count,
        })
        .collect();

    debug!(
        "Aggregated into {} rows by {:?} ({} excluded)",
        rows.len(),
        dimension,
        excluded
    );

    AggregationResult {
        dimension,
        rows,
        excluded,
    }
}
