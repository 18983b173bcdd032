#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use stride::extract::tables::{CategoryEntry, ImpactTable, IntentEntry, KeywordTables};
use stride::extract::types::{Category, Route};
use stride::rotation::ContentItem;

/// Fixed reference time for every rotation test.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 10, 0, 0).unwrap()
}

/// A pool item last used `days` whole days before [`test_now`].
pub fn used_days_ago(id: &str, days: i64) -> ContentItem {
    ContentItem::new(id, Some(test_now() - Duration::days(days)))
}

pub fn never_used(id: &str) -> ContentItem {
    ContentItem::new(id, None)
}

/// A small table set with made-up vocabulary, to prove nothing is hard-coded.
pub fn fixture_tables() -> KeywordTables {
    KeywordTables {
        default_intent: Route::CheckIn,
        impact: ImpactTable {
            large: vec!["epic".into()],
            small: vec!["meh".into()],
        },
        categories: vec![
            CategoryEntry {
                category: Category::Creative,
                keywords: vec!["knit*".into()],
            },
            CategoryEntry {
                category: Category::Health,
                keywords: vec!["swim*".into()],
            },
        ],
        intents: vec![
            IntentEntry {
                label: Route::QuoteRequest,
                keywords: vec!["sparkle".into()],
                phrases: vec!["lift me".into()],
                weight: 1.0,
            },
            IntentEntry {
                label: Route::CheckIn,
                keywords: vec!["status".into()],
                phrases: vec![],
                weight: 1.0,
            },
        ],
        ..KeywordTables::default()
    }
}
