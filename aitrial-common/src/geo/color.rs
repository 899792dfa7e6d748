//! Choropleth color buckets
//!
//! Five buckets with inclusive upper bounds at 0, 5, 15 and 30 cases, then
//! unbounded. The bounds and colors are shared with every legend renderer
//! and must not change.

use serde::Serialize;

/// RGB triple, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const LIGHT_GRAY: Rgb = Rgb(230, 230, 230);
pub const PALE_BLUE: Rgb = Rgb(180, 200, 240);
pub const MEDIUM_BLUE: Rgb = Rgb(120, 150, 210);
pub const DARK_MEDIUM_BLUE: Rgb = Rgb(70, 100, 180);
pub const DARKEST_BLUE: Rgb = Rgb(30, 60, 140);

/// Classification rule; `max_cases == None` is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorBucket {
    pub max_cases: Option<usize>,
    pub color: Rgb,
    pub label: &'static str,
}

/// Evaluated in order, first match wins
pub const COLOR_BUCKETS: [ColorBucket; 5] = [
    ColorBucket { max_cases: Some(0), color: LIGHT_GRAY, label: "0 cases" },
    ColorBucket { max_cases: Some(5), color: PALE_BLUE, label: "1-5 cases" },
    ColorBucket { max_cases: Some(15), color: MEDIUM_BLUE, label: "6-15 cases" },
    ColorBucket { max_cases: Some(30), color: DARK_MEDIUM_BLUE, label: "16-30 cases" },
    ColorBucket { max_cases: None, color: DARKEST_BLUE, label: "31+ cases" },
];

impl ColorBucket {
    fn contains(&self, cases: usize) -> bool {
        self.max_cases.map_or(true, |max| cases <= max)
    }
}

/// Fill color for a case count
pub fn compute_color(cases: usize) -> Rgb {
    COLOR_BUCKETS
        .iter()
        .find(|bucket| bucket.contains(cases))
        .map(|bucket| bucket.color)
        .unwrap_or(DARKEST_BLUE)
}

/// Legend entries in ascending bucket order
pub fn legend() -> &'static [ColorBucket] {
    &COLOR_BUCKETS
}
