//! Message-wide signals attached to an extraction: timeframe and numeric metrics.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::matcher::{normalize, KeywordSet};

static METRIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(%|percent|points|hours|minutes|miles|pounds|kg|dollars|\$)")
        .expect("Invalid regex: metric")
});

static TODAY: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(["today", "this morning", "this afternoon", "tonight"]));

/// When the reported accomplishments happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    /// No explicit time reference.
    Recent,
}

/// A number with a unit, e.g. `5 miles` or `20 %`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub value: f64,
    pub unit: String,
}

pub fn timeframe(text: &str) -> Timeframe {
    let input = normalize(text);
    if TODAY.any_match(&input) {
        Timeframe::Today
    } else if input.contains("yesterday") {
        Timeframe::Yesterday
    } else if input.contains("this week") {
        Timeframe::ThisWeek
    } else if input.contains("last week") {
        Timeframe::LastWeek
    } else {
        Timeframe::Recent
    }
}

pub fn metrics(text: &str) -> Vec<Metric> {
    METRIC
        .captures_iter(text)
        .filter_map(|caps| {
            let value = caps.get(1)?.as_str().parse().ok()?;
            let unit = caps.get(2)?.as_str().to_lowercase();
            Some(Metric { value, unit })
        })
        .collect()
}
