use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use stride::config::StrideConfig;
use stride::rotation::stats::{summarize, PoolSummary};
use stride::rotation::store::InMemoryPool;
use stride::rotation::{
    candidates, mark_used, select_with_rng, ContentItem, Ranked, SelectOptions, Selection, UsageStamp,
};

use super::print_json;

#[derive(Serialize)]
struct SelectOutput {
    id: String,
    stamp: UsageStamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    selection: Option<Selection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranking: Option<Vec<Ranked>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PoolSummary>,
}

#[derive(Serialize)]
struct RotateOutput {
    draws: usize,
    picks: BTreeMap<String, usize>,
    summary: PoolSummary,
}

fn load_pool(path: &Path) -> Result<Vec<ContentItem>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content pool at {}", path.display()))?;
    let pool: Vec<ContentItem> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse content pool in {}", path.display()))?;
    tracing::debug!(path = %path.display(), items = pool.len(), "content pool loaded");
    Ok(pool)
}

/// Pick one item and print the stamp the caller should persist.
pub fn select(
    config: &StrideConfig,
    pool_path: &Path,
    now: Option<DateTime<Utc>>,
    exclude: Vec<String>,
    limit: Option<usize>,
    explain: bool,
) -> Result<()> {
    let pool = load_pool(pool_path)?;
    let now = now.unwrap_or_else(Utc::now);
    let options = SelectOptions {
        exclude: exclude.into_iter().collect::<HashSet<_>>(),
        limit: Some(limit.unwrap_or(config.rotation.candidate_limit)),
    };

    let selection = select_with_rng(&pool, now, &options, &mut rand::thread_rng())?;
    let stamp = mark_used(selection.id.clone(), now);

    let output = if explain {
        SelectOutput {
            id: selection.id.clone(),
            stamp,
            selection: Some(selection),
            ranking: Some(candidates(&pool, now, &options)),
            summary: Some(summarize(&pool, now)),
        }
    } else {
        SelectOutput {
            id: selection.id,
            stamp,
            selection: None,
            ranking: None,
            summary: None,
        }
    };
    print_json(&output)
}

/// Run `draws` select-and-mark rounds, advancing the clock between rounds.
pub fn rotate(
    config: &StrideConfig,
    pool_path: &Path,
    draws: usize,
    interval_days: i64,
    now: Option<DateTime<Utc>>,
    seed: Option<u64>,
) -> Result<()> {
    let pool = InMemoryPool::new(load_pool(pool_path)?);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let options = SelectOptions {
        exclude: HashSet::new(),
        limit: Some(config.rotation.candidate_limit),
    };

    let mut clock = now.unwrap_or_else(Utc::now);
    let mut picks: BTreeMap<String, usize> = BTreeMap::new();
    for _ in 0..draws {
        let stamp = pool.select_and_mark(clock, &options, &mut rng)?;
        *picks.entry(stamp.id).or_default() += 1;
        clock += Duration::days(interval_days);
    }

    let items = pool.into_items();
    print_json(&RotateOutput {
        draws,
        picks,
        summary: summarize(&items, clock),
    })
}
