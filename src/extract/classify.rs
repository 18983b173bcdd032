//! Per-item classification: category, impact and confidence.
//!
//! [`ItemClassifier`] is the seam; [`KeywordClassifier`] is the rule-based
//! implementation driven by [`KeywordTables`].

use super::matcher::{normalize, KeywordSet};
use super::tables::KeywordTables;
use super::types::{Category, ClassifiedItem, Impact};

/// Items longer than this (in characters) earn the specificity bonus.
const DETAIL_MIN_CHARS: usize = 20;

// Confidence is accumulated in tenths to stay exact: 0.7 base, +0.1 per signal.
const BASE_TENTHS: u8 = 7;
const MAX_TENTHS: u8 = 10;

/// Anything that can turn a candidate item into a [`ClassifiedItem`].
///
/// Implementations must never fail: unmatched input resolves to
/// `general` / `medium` with base confidence.
pub trait ItemClassifier: Send + Sync {
    fn classify(&self, item: &str) -> ClassifiedItem;
}

pub struct KeywordClassifier {
    large: KeywordSet,
    small: KeywordSet,
    /// Scanned in order, first match wins.
    categories: Vec<(Category, KeywordSet)>,
}

impl KeywordClassifier {
    pub fn new(tables: &KeywordTables) -> Self {
        Self {
            large: KeywordSet::new(&tables.impact.large),
            small: KeywordSet::new(&tables.impact.small),
            categories: tables
                .categories
                .iter()
                .map(|entry| (entry.category, KeywordSet::new(&entry.keywords)))
                .collect(),
        }
    }

    fn impact(&self, input: &str) -> Impact {
        if self.large.any_match(input) {
            Impact::Large
        } else if self.small.any_match(input) {
            Impact::Small
        } else {
            Impact::Medium
        }
    }

    fn category(&self, input: &str) -> Category {
        self.categories
            .iter()
            .find(|(_, keywords)| keywords.any_match(input))
            .map_or(Category::General, |(category, _)| *category)
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(&KeywordTables::default())
    }
}

impl ItemClassifier for KeywordClassifier {
    fn classify(&self, item: &str) -> ClassifiedItem {
        let input = normalize(item);
        let impact = self.impact(&input);
        let category = self.category(&input);

        let mut tenths = BASE_TENTHS;
        if impact != Impact::Medium {
            tenths += 1;
        }
        if category != Category::General {
            tenths += 1;
        }
        if item.chars().count() > DETAIL_MIN_CHARS {
            tenths += 1;
        }
        let confidence = f64::from(tenths.min(MAX_TENTHS)) / 10.0;

        tracing::trace!(
            category = %category,
            impact = %impact,
            confidence,
            "classified item"
        );

        ClassifiedItem {
            description: item.to_string(),
            category,
            impact,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_item_gets_defaults() {
        let item = KeywordClassifier::default().classify("did a thing");
        assert_eq!(item.category, Category::General);
        assert_eq!(item.impact, Impact::Medium);
        assert_eq!(item.confidence, 0.7);
        assert_eq!(item.description, "did a thing");
    }

    #[test]
    fn fully_specific_item_caps_at_one() {
        let item = KeywordClassifier::default().classify("Got promoted after the huge client launch");
        assert_eq!(item.category, Category::Work);
        assert_eq!(item.impact, Impact::Large);
        assert_eq!(item.confidence, 1.0);
    }

    #[test]
    fn large_beats_small() {
        let item = KeywordClassifier::default().classify("a small but major fix");
        assert_eq!(item.impact, Impact::Large);
    }

    #[test]
    fn small_impact() {
        let item = KeywordClassifier::default().classify("quick walk");
        assert_eq!(item.impact, Impact::Small);
        assert_eq!(item.category, Category::General);
        assert_eq!(item.confidence, 0.8);
    }

    #[test]
    fn first_category_in_order_wins() {
        // "project" (work) and "gym" (health): work is scanned first.
        let item = KeywordClassifier::default().classify("wrapped the project, hit the gym");
        assert_eq!(item.category, Category::Work);
    }

    #[test]
    fn workout_is_health_not_work() {
        let item = KeywordClassifier::default().classify("morning workout");
        assert_eq!(item.category, Category::Health);
    }

    #[test]
    fn length_bonus_counts_characters() {
        let classifier = KeywordClassifier::default();
        // 20 characters exactly: no bonus.
        assert_eq!(classifier.classify("abcdefghij abcdefghi").confidence, 0.7);
        assert_eq!(classifier.classify("abcdefghij abcdefghij").confidence, 0.8);
    }
}
