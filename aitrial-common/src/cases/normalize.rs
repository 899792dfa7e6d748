//! Region consolidation rules
//!
//! Applied once when the store is built. No rule target may itself be a
//! rule source, which keeps consolidation idempotent.

/// (source label, canonical region) pairs
pub const REGION_CONSOLIDATION: &[(&str, &str)] = &[("Europe", "European Union")];

/// Map a region label onto its canonical name
pub fn consolidate_region(region: &str) -> &str {
    REGION_CONSOLIDATION
        .iter()
        .find(|(source, _)| *source == region)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(region)
}
