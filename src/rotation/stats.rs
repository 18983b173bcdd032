//! Pool summary: how many items sit in each priority band.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{priority, ContentItem, NEVER_USED_PRIORITY};

/// Bucket bounds, highest first. An item lands in the first bucket whose
/// lower bound its priority reaches.
const BUCKETS: &[(&str, u64)] = &[
    ("never used (1000)", NEVER_USED_PRIORITY),
    ("very old (100-999)", 100),
    ("old (50-99)", 50),
    ("medium (10-49)", 10),
    ("recent (1-9)", 1),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityBucket {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSummary {
    pub total: usize,
    pub never_used: usize,
    pub oldest_used: Option<DateTime<Utc>>,
    pub newest_used: Option<DateTime<Utc>>,
    pub distribution: Vec<PriorityBucket>,
}

pub fn summarize(pool: &[ContentItem], now: DateTime<Utc>) -> PoolSummary {
    let mut counts = vec![0usize; BUCKETS.len()];
    for item in pool {
        let p = priority(item, now);
        if let Some(slot) = BUCKETS.iter().position(|(_, min)| p >= *min) {
            counts[slot] += 1;
        }
    }

    let stamps = pool.iter().filter_map(|item| item.last_used_at);

    PoolSummary {
        total: pool.len(),
        never_used: pool.iter().filter(|item| item.last_used_at.is_none()).count(),
        oldest_used: stamps.clone().min(),
        newest_used: stamps.max(),
        distribution: BUCKETS
            .iter()
            .zip(counts)
            .map(|((range, _), count)| PriorityBucket {
                range: (*range).to_string(),
                count,
            })
            .collect(),
    }
}
