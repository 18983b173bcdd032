//! Recency-aware content rotation.
//!
//! Each pool item gets a priority from how long ago it was last used (discrete
//! bands, see [`priority`]). Items are ranked by priority and the draw weight is
//! derived from the *rank*, not the raw priority: rank `k` weighs
//! `max(1, 100 / k)`. Raw priorities span 1 to 1000, which would make the draw
//! almost deterministic; rank weights keep the same ordering while leaving
//! recently used items a small chance.
//!
//! Nothing here reads the clock: `now` is always supplied by the caller, and
//! the new `lastUsedAt` is returned as a [`UsageStamp`] for the caller to persist.

pub mod stats;
pub mod store;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Priority of an item that has never been used.
pub const NEVER_USED_PRIORITY: u64 = 1000;
/// Used items are clamped below [`NEVER_USED_PRIORITY`].
pub const MAX_USED_PRIORITY: u64 = NEVER_USED_PRIORITY - 1;
/// Numerator of the rank weight `max(1, floor(100 / k))`.
const RANK_WEIGHT_BASE: u64 = 100;
/// Default size of the ranked candidate set.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 50;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotationError {
    #[error("content pool is empty")]
    EmptyPool,
}

/// A pool entry as supplied by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    /// `None` (absent or `null` in JSON) means never used.
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, last_used_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: id.into(),
            last_used_at,
        }
    }
}

/// The value a caller writes back after consuming an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStamp {
    pub id: String,
    pub last_used_at: DateTime<Utc>,
}

/// One item after ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked {
    pub id: String,
    pub priority: u64,
    /// 1-based position after sorting by priority.
    pub rank: usize,
    pub weight: u64,
}

/// The outcome of a draw.
pub type Selection = Ranked;

/// Candidate filtering applied before ranking.
#[derive(Debug, Clone)]
pub struct SelectOptions {
    /// Ids never to return.
    pub exclude: HashSet<String>,
    /// Keep only this many top-ranked items as candidates.
    pub limit: Option<usize>,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            exclude: HashSet::new(),
            limit: Some(DEFAULT_CANDIDATE_LIMIT),
        }
    }
}

/// Whole days elapsed since `used`, rounded down; a stamp in the future counts as zero.
pub fn days_since(used: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let elapsed = (now - used).num_seconds();
    if elapsed <= 0 {
        return 0;
    }
    elapsed.div_euclid(SECONDS_PER_DAY) as u64
}

/// How overdue an item is for reuse. Higher is more eligible.
///
/// Used items report at most [`MAX_USED_PRIORITY`]; ranking orders them by the
/// unclamped band score, so a 400-day-old item still leads a 150-day-old one.
pub fn priority(item: &ContentItem, now: DateTime<Utc>) -> u64 {
    match band_score(item, now) {
        Some(score) => score.min(MAX_USED_PRIORITY),
        None => NEVER_USED_PRIORITY,
    }
}

/// Unclamped band score; `None` for an item that was never used.
fn band_score(item: &ContentItem, now: DateTime<Utc>) -> Option<u64> {
    let days = days_since(item.last_used_at?, now);
    Some(match days {
        0..=6 => 1,
        7..=29 => days * 2,
        30..=89 => days * 5,
        _ => days.saturating_mul(10),
    })
}

/// Sampling weight for a 1-based rank.
pub fn rank_weight(rank: usize) -> u64 {
    (RANK_WEIGHT_BASE / rank.max(1) as u64).max(1)
}

/// Sort by priority, highest first, and attach rank weights.
///
/// Never-used items come first, then used items by band score. The sort is
/// stable: equal keys keep their pool order.
pub fn rank(pool: &[ContentItem], now: DateTime<Utc>) -> Vec<Ranked> {
    let mut scored: Vec<(&ContentItem, (bool, u64))> = pool
        .iter()
        .map(|item| {
            let score = band_score(item, now);
            (item, (score.is_none(), score.unwrap_or(0)))
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (item, _))| Ranked {
            id: item.id.clone(),
            priority: priority(item, now),
            rank: i + 1,
            weight: rank_weight(i + 1),
        })
        .collect()
}

/// Pick an item id using the thread RNG.
pub fn select(pool: &[ContentItem], now: DateTime<Utc>) -> Result<String, RotationError> {
    select_with_rng(pool, now, &SelectOptions::unfiltered(), &mut rand::thread_rng())
        .map(|selection| selection.id)
}

/// Pick an item with an explicit RNG and candidate options.
pub fn select_with_rng<R: Rng + ?Sized>(
    pool: &[ContentItem],
    now: DateTime<Utc>,
    options: &SelectOptions,
    rng: &mut R,
) -> Result<Selection, RotationError> {
    let ranked = candidates(pool, now, options);
    let count = ranked.len();
    let selection = draw(ranked, rng)?;
    tracing::debug!(
        id = %selection.id,
        priority = selection.priority,
        rank = selection.rank,
        candidates = count,
        "selected content item"
    );
    Ok(selection)
}

/// The ranked list a draw is made from: exclusions removed, then truncated to
/// the candidate limit.
pub fn candidates(
    pool: &[ContentItem],
    now: DateTime<Utc>,
    options: &SelectOptions,
) -> Vec<Ranked> {
    let kept: Vec<ContentItem> = pool
        .iter()
        .filter(|item| !options.exclude.contains(&item.id))
        .cloned()
        .collect();

    let mut ranked = rank(&kept, now);
    if let Some(limit) = options.limit {
        ranked.truncate(limit.max(1));
    }
    ranked
}

/// Weighted draw over an already ranked list.
fn draw<R: Rng + ?Sized>(ranked: Vec<Ranked>, rng: &mut R) -> Result<Selection, RotationError> {
    match ranked.len() {
        0 => return Err(RotationError::EmptyPool),
        1 => return ranked.into_iter().next().ok_or(RotationError::EmptyPool),
        _ => {}
    }

    let total: u64 = ranked.iter().map(|r| r.weight).sum();
    let mut remaining = rng.gen_range(0..total) as i64;
    let position = ranked
        .iter()
        .position(|r| {
            remaining -= r.weight as i64;
            remaining <= 0
        })
        .unwrap_or(0);

    ranked.into_iter().nth(position).ok_or(RotationError::EmptyPool)
}

/// Stamp an item as used at `now`.
pub fn mark_used(id: impl Into<String>, now: DateTime<Utc>) -> UsageStamp {
    UsageStamp {
        id: id.into(),
        last_used_at: now,
    }
}

impl SelectOptions {
    /// No exclusions and no candidate limit.
    pub fn unfiltered() -> Self {
        Self {
            exclude: HashSet::new(),
            limit: None,
        }
    }
}
