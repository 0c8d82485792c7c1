use std::fmt::Write as _;

use crate::constants::render::ENTRY_DELIMITER;
use crate::stats::KeyStats;
use crate::types::{GlobalMap, StationKey};

/// Display-ready per-key result with values rounded to one decimal place.
#[derive(Clone, Debug, PartialEq)]
pub struct KeySummary {
    /// Category key.
    pub key: StationKey,
    /// Smallest measurement.
    pub min: f64,
    /// Arithmetic mean of all measurements.
    pub avg: f64,
    /// Largest measurement.
    pub max: f64,
}

impl KeySummary {
    fn from_stats(key: StationKey, stats: &KeyStats) -> Self {
        Self {
            key,
            min: round_tenth(stats.min as f64 / 10.0),
            avg: round_tenth(stats.sum as f64 / 10.0 / stats.count as f64),
            max: round_tenth(stats.max as f64 / 10.0),
        }
    }
}

/// Round to one decimal place, half away from zero, normalizing a negative
/// zero result to positive zero.
pub fn round_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0).round();
    if rounded == 0.0 {
        // Covers -0.0 as well: comparison ignores the sign of zero.
        return 0.0;
    }
    rounded / 10.0
}

/// Convert the merged global map into summaries sorted ascending by key
/// byte order.
pub fn summarize(global: GlobalMap) -> Vec<KeySummary> {
    let mut summaries: Vec<KeySummary> = global
        .into_iter()
        .map(|(key, stats)| KeySummary::from_stats(key, &stats))
        .collect();
    summaries.sort_unstable_by(|a, b| a.key.cmp(&b.key));
    summaries
}

/// Render summaries as `key=min/avg/max` entries joined by the entry
/// delimiter, with no trailing delimiter.
pub fn render(summaries: &[KeySummary]) -> String {
    let mut line = String::new();
    for (idx, summary) in summaries.iter().enumerate() {
        if idx > 0 {
            line.push_str(ENTRY_DELIMITER);
        }
        write!(
            line,
            "{}={:.1}/{:.1}/{:.1}",
            summary.key, summary.min, summary.avg, summary.max
        )
        .expect("writing to a String cannot fail");
    }
    line
}
