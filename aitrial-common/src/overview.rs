//! Headline figures for the catalog landing view

use crate::cases::{CaseField, RecordStore};
use crate::composition::{rank_issues, IssueCount};
use serde::Serialize;

/// Dataset-wide summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_cases: usize,
    pub unique_issues: usize,
    pub unique_regions: usize,
    pub top_issues: Vec<IssueCount>,
}

/// Summarise `store`, keeping the `top_n` most frequent issues
pub fn overview(store: &RecordStore, top_n: usize) -> Overview {
    let mut top_issues = rank_issues(store.all());
    top_issues.truncate(top_n);

    Overview {
        total_cases: store.len(),
        unique_issues: store.all_values(CaseField::Issue).len(),
        unique_regions: store.all_values(CaseField::Region).len(),
        top_issues,
    }
}
