//! Content store seam and an in-memory implementation.
//!
//! The selector itself is pure. A store supplies pool snapshots and persists the
//! [`UsageStamp`] after an item is consumed. Doing that as snapshot → select →
//! write is not atomic: two concurrent callers can pick the same item before
//! either write lands. [`InMemoryPool::select_and_mark`] does all three steps
//! under one lock; a remote store would need a conditional update instead.

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Mutex;

use super::{mark_used, select_with_rng, ContentItem, SelectOptions, UsageStamp};

/// Anything that can hand out pool snapshots and record usage.
pub trait ContentStore: Send + Sync {
    /// The current pool, in store order.
    fn snapshot(&self) -> Result<Vec<ContentItem>>;

    /// Persist a new `lastUsedAt`. Unknown ids are an error.
    fn mark_used(&self, stamp: &UsageStamp) -> Result<()>;
}

/// Select against a snapshot, then write the stamp back.
///
/// Not atomic across callers; see the module docs.
pub fn select_and_consume<S, R>(
    store: &S,
    now: DateTime<Utc>,
    options: &SelectOptions,
    rng: &mut R,
) -> Result<UsageStamp>
where
    S: ContentStore + ?Sized,
    R: Rng + ?Sized,
{
    let pool = store.snapshot()?;
    let selection = select_with_rng(&pool, now, options, rng)?;
    let stamp = mark_used(selection.id, now);
    store.mark_used(&stamp)?;
    Ok(stamp)
}

/// A pool held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPool {
    items: Mutex<Vec<ContentItem>>,
}

impl InMemoryPool {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// Select and stamp in one critical section.
    pub fn select_and_mark<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        options: &SelectOptions,
        rng: &mut R,
    ) -> Result<UsageStamp> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| anyhow!("pool lock poisoned: {e}"))?;
        let selection = select_with_rng(&items, now, options, rng)?;
        let stamp = mark_used(selection.id, now);
        stamp_item(&mut items, &stamp)?;
        Ok(stamp)
    }

    pub fn into_items(self) -> Vec<ContentItem> {
        self.items
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn stamp_item(items: &mut [ContentItem], stamp: &UsageStamp) -> Result<()> {
    match items.iter_mut().find(|item| item.id == stamp.id) {
        Some(item) => {
            item.last_used_at = Some(stamp.last_used_at);
            Ok(())
        }
        None => bail!("unknown content item: {}", stamp.id),
    }
}

impl ContentStore for InMemoryPool {
    fn snapshot(&self) -> Result<Vec<ContentItem>> {
        let items = self
            .items
            .lock()
            .map_err(|e| anyhow!("pool lock poisoned: {e}"))?;
        Ok(items.clone())
    }

    fn mark_used(&self, stamp: &UsageStamp) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| anyhow!("pool lock poisoned: {e}"))?;
        stamp_item(&mut items, stamp)
    }
}
