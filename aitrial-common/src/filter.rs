//! Multi-facet case filtering
//!
//! A [`FacetSelection`] is an explicit query value: free-text term plus
//! exact-match region, issue and year facets. Active facets are ANDed; the
//! `"All"` sentinel or an empty value leaves a facet inactive.

use crate::cases::{CaseField, CaseRecord, RecordStore};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sentinel facet value meaning "no constraint"
pub const ALL: &str = "All";

/// User query across the four facets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FacetSelection {
    /// Matched case-insensitively against `caseName` and `summary`
    #[serde(default)]
    pub term: String,
    #[serde(default = "all_sentinel")]
    pub region: String,
    #[serde(default = "all_sentinel")]
    pub issue: String,
    /// Parsed as an integer when active
    #[serde(default = "all_sentinel")]
    pub year: String,
}

fn all_sentinel() -> String {
    ALL.to_string()
}

impl Default for FacetSelection {
    fn default() -> Self {
        Self {
            term: String::new(),
            region: all_sentinel(),
            issue: all_sentinel(),
            year: all_sentinel(),
        }
    }
}

impl FacetSelection {
    /// Selection with every facet inactive
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = issue.into();
        self
    }

    pub fn with_year(mut self, year: impl ToString) -> Self {
        self.year = year.to_string();
        self
    }

    /// True when no facet constrains the result
    pub fn is_unconstrained(&self) -> bool {
        self.term.trim().is_empty()
            && !is_active(&self.region)
            && !is_active(&self.issue)
            && !is_active(&self.year)
    }
}

/// Facet choice lists, each led by the [`ALL`] sentinel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetDomains {
    pub regions: Vec<String>,
    pub issues: Vec<String>,
    pub years: Vec<String>,
}

impl FacetDomains {
    pub fn from_store(store: &RecordStore) -> Self {
        let with_sentinel = |values: Vec<String>| {
            std::iter::once(all_sentinel()).chain(values).collect::<Vec<_>>()
        };

        Self {
            regions: with_sentinel(store.all_values(CaseField::Region)),
            issues: with_sentinel(store.all_values(CaseField::Issue)),
            years: with_sentinel(store.all_values(CaseField::Year)),
        }
    }
}

fn is_active(value: &str) -> bool {
    !value.trim().is_empty() && value != ALL
}

/// Selection checked and parsed once per query
struct Predicates<'s> {
    term: Option<String>,
    region: Option<&'s str>,
    issue: Option<&'s str>,
    year: Option<i32>,
}

impl<'s> Predicates<'s> {
    fn parse(selection: &'s FacetSelection) -> Result<Self> {
        let term = Some(selection.term.as_str())
            .filter(|t| !t.trim().is_empty())
            .map(str::to_lowercase);

        let year = if is_active(&selection.year) {
            let parsed = selection.year.trim().parse::<i32>().map_err(|_| {
                Error::InvalidFilterValue {
                    facet: "year",
                    value: selection.year.clone(),
                }
            })?;
            Some(parsed)
        } else {
            None
        };

        Ok(Self {
            term,
            region: Some(selection.region.as_str()).filter(|v| is_active(v)),
            issue: Some(selection.issue.as_str()).filter(|v| is_active(v)),
            year,
        })
    }

    fn matches(&self, record: &CaseRecord) -> bool {
        if let Some(term) = &self.term {
            let in_name = record.case_name.to_lowercase().contains(term.as_str());
            let in_summary = record
                .summary
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(term.as_str()));
            if !in_name && !in_summary {
                return false;
            }
        }

        if let Some(region) = self.region {
            if record.region.as_deref() != Some(region) {
                return false;
            }
        }

        if let Some(issue) = self.issue {
            if record.issue.as_deref() != Some(issue) {
                return false;
            }
        }

        if let Some(year) = self.year {
            if record.year != Some(year) {
                return false;
            }
        }

        true
    }
}

/// Apply every active facet of `selection` to `records`
///
/// Returns the matching records in input order. Fails with
/// `InvalidFilterValue` when an active year facet is not an integer, even if
/// `records` is empty.
pub fn apply<'a>(
    records: &'a [CaseRecord],
    selection: &FacetSelection,
) -> Result<Vec<&'a CaseRecord>> {
    let predicates = Predicates::parse(selection)?;
    let filtered: Vec<&CaseRecord> = records.iter().filter(|r| predicates.matches(r)).collect();

    debug!(
        "Filter kept {} of {} records ({:?})",
        filtered.len(),
        records.len(),
        selection
    );
    Ok(filtered)
}
