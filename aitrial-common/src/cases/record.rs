//! Case record model and load-time schema validation
//!
//! Dataset entries arrive as loosely typed JSON objects. Each one is mapped
//! onto a validated [`CaseRecord`] here; entries that cannot be mapped are
//! reported back to the store for quarantine instead of leaking nulls into
//! every downstream computation.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Earliest year accepted for a litigated AI case
pub const MIN_CASE_YEAR: i32 = 1990;

/// One litigated case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub case_name: String,
    pub year: Option<i32>,
    /// Canonical region name (after consolidation)
    pub region: Option<String>,
    pub court: Option<String>,
    /// Free-form issue category label
    pub issue: Option<String>,
    pub final_decision: Option<String>,
    pub summary: Option<String>,
    pub excerpt: Option<String>,
    pub link: Option<String>,
}

impl CaseRecord {
    /// Create a record with only a case name set
    pub fn new(case_name: impl Into<String>) -> Self {
        Self {
            case_name: case_name.into(),
            year: None,
            region: None,
            court: None,
            issue: None,
            final_decision: None,
            summary: None,
            excerpt: None,
            link: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Dataset entry as it appears on disk; unknown keys are ignored
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCase {
    case_name: Option<String>,
    year: Option<YearValue>,
    region: Option<String>,
    court: Option<String>,
    issue: Option<String>,
    final_decision: Option<String>,
    summary: Option<String>,
    excerpt: Option<String>,
    link: Option<String>,
}

/// Years show up as integers, as floats from spreadsheet exports, or as text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YearValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl YearValue {
    fn coerce(&self) -> Result<Option<i32>, String> {
        let year = match self {
            YearValue::Int(v) => *v,
            YearValue::Float(v) if v.fract() == 0.0 && v.is_finite() => *v as i64,
            YearValue::Float(v) => return Err(format!("year {} is not an integer", v)),
            YearValue::Text(s) if s.trim().is_empty() => return Ok(None),
            YearValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("year {:?} is not an integer", s))?,
        };

        let max_year = chrono::Utc::now().year();
        match i32::try_from(year) {
            Ok(y) if (MIN_CASE_YEAR..=max_year).contains(&y) => Ok(Some(y)),
            _ => Err(format!(
                "year {} outside {}..={}",
                year, MIN_CASE_YEAR, max_year
            )),
        }
    }
}

/// Blank optional text is treated the same as a missing value
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Validate one dataset object into a [`CaseRecord`]
///
/// The caller has already checked that `value` is a JSON object. The error
/// string is the quarantine reason.
pub(crate) fn validate_record(value: Value) -> Result<CaseRecord, String> {
    let raw: RawCase = serde_json::from_value(value).map_err(|e| e.to_string())?;

    let case_name = non_blank(raw.case_name).ok_or_else(|| "missing caseName".to_string())?;

    let year = match raw.year {
        Some(y) => y.coerce()?,
        None => None,
    };

    Ok(CaseRecord {
        case_name,
        year,
        region: non_blank(raw.region),
        court: non_blank(raw.court),
        issue: non_blank(raw.issue),
        final_decision: non_blank(raw.final_decision),
        summary: non_blank(raw.summary),
        excerpt: non_blank(raw.excerpt),
        link: non_blank(raw.link),
    })
}
