//! Per-country issue composition
//!
//! Breaks each selected country's cases down by issue for side-by-side
//! proportional-area panels. Comparison is capped at three countries; the
//! cap is carried by [`CountrySelection`] so call sites cannot build an
//! oversized comparison.

use crate::cases::CaseRecord;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Most countries compared side by side
pub const MAX_COMPARED_COUNTRIES: usize = 3;

/// User-facing text when the cap is exceeded
pub const TOO_MANY_COUNTRIES_WARNING: &str =
    "Please select only up to 3 countries for comparison.";

/// At most [`MAX_COMPARED_COUNTRIES`] region names, in selection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySelection(Vec<String>);

impl CountrySelection {
    /// Fails with `TooManySelections` beyond the cap
    pub fn new(countries: Vec<String>) -> Result<Self> {
        if countries.len() > MAX_COMPARED_COUNTRIES {
            return Err(Error::TooManySelections {
                requested: countries.len(),
                max: MAX_COMPARED_COUNTRIES,
            });
        }
        Ok(Self(countries))
    }

    pub fn countries(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Issue label and its case count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueCount {
    pub issue: String,
    pub count: usize,
}

/// Ranked issue table for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryComposition {
    pub country: String,
    pub total: usize,
    pub issues: Vec<IssueCount>,
}

/// Result of a comparison request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionOutcome {
    Panels(Vec<CountryComposition>),
    Warning(String),
}

/// Count issues per record subset, most frequent first, ties by name
pub fn rank_issues<'a, I>(records: I) -> Vec<IssueCount>
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for issue in records.into_iter().filter_map(|r| r.issue.as_deref()) {
        *counts.entry(issue).or_insert(0) += 1;
    }

    let mut ranked: Vec<IssueCount> = counts
        .into_iter()
        .map(|(issue, count)| IssueCount {
            issue: issue.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.issue.cmp(&b.issue)));
    ranked
}

/// One issue table per selected country, in selection order
pub fn compose_by_issue(records: &[CaseRecord], selection: &CountrySelection) -> Vec<CountryComposition> {
    selection
        .countries()
        .iter()
        .map(|country| {
            let issues = rank_issues(
                records
                    .iter()
                    .filter(|r| r.region.as_deref() == Some(country.as_str())),
            );
            let total = issues.iter().map(|i| i.count).sum();
            debug!("Composition for {}: {} issues, {} cases", country, issues.len(), total);
            CountryComposition {
                country: country.clone(),
                total,
                issues,
            }
        })
        .collect()
}

/// Compare the requested countries, or warn when too many were requested
pub fn compare_countries(records: &[CaseRecord], requested: Vec<String>) -> CompositionOutcome {
    match CountrySelection::new(requested) {
        Ok(selection) => CompositionOutcome::Panels(compose_by_issue(records, &selection)),
        Err(e) => {
            debug!("Composition request rejected: {}", e);
            CompositionOutcome::Warning(TOO_MANY_COUNTRIES_WARNING.to_string())
        }
    }
}
