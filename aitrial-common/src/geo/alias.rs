//! Boundary name to canonical region resolution
//!
//! Boundary datasets spell some countries differently from the case
//! dataset. The alias table only lists names that differ; anything else is
//! assumed to be canonical already. Lookup is exact and case-sensitive.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Curated (boundary name, canonical region) pairs
pub const ALIAS_ENTRIES: &[(&str, &str)] = &[
    ("United States of America", "United States"),
    ("Russian Federation", "Russia"),
    ("Korea, Republic of", "South Korea"),
    ("Iran (Islamic Republic of)", "Iran"),
    ("United Kingdom", "United Kingdom"),
    ("Viet Nam", "Vietnam"),
    ("Syrian Arab Republic", "Syria"),
    ("Democratic Republic of the Congo", "DR Congo"),
    ("Venezuela (Bolivarian Republic of)", "Venezuela"),
    ("Lao People's Democratic Republic", "Laos"),
    ("Republic of Moldova", "Moldova"),
    ("North Macedonia", "Macedonia"),
    ("Czechia", "Czech Republic"),
    ("Slovakia", "Slovak Republic"),
    ("Bolivia (Plurinational State of)", "Bolivia"),
    ("Tanzania, United Republic of", "Tanzania"),
];

static ALIAS_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ALIAS_ENTRIES.iter().copied().collect());

/// Resolves boundary feature names against the alias table
#[derive(Debug, Clone, Copy)]
pub struct GeoNameResolver {
    aliases: &'static HashMap<&'static str, &'static str>,
}

impl Default for GeoNameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoNameResolver {
    pub fn new() -> Self {
        Self {
            aliases: &ALIAS_TABLE,
        }
    }

    /// Canonical region for `native_name`; the name itself when not aliased
    pub fn resolve<'a>(&self, native_name: &'a str) -> &'a str {
        self.aliases.get(native_name).copied().unwrap_or(native_name)
    }

    /// True when `native_name` has an alias entry
    pub fn is_aliased(&self, native_name: &str) -> bool {
        self.aliases.contains_key(native_name)
    }
}
