//! Intent scoring: pick the conversation route for a whole message.
//!
//! Every route in the table accumulates `weight` per matching keyword and
//! `1.5 * weight` per matching phrase. The strictly highest score wins; on a tie
//! the route declared earlier in the table wins. A message where nothing scores
//! falls back to the table's default route with zero confidence.

use super::matcher::{normalize, KeywordSet};
use super::tables::KeywordTables;
use super::types::{IntentResult, Route, RouteScore};

/// Phrases are lower-noise signals than bare keywords.
const PHRASE_MULTIPLIER: f64 = 1.5;
/// Fixed normalization: a score of 3 or more is full confidence.
const CONFIDENCE_SCALE: f64 = 3.0;
/// Only the most recent routes in history count towards a bonus.
const HISTORY_WINDOW: usize = 3;
/// Bonus per recent occurrence of the same route.
const HISTORY_BONUS: f64 = 0.5;

struct RouteRule {
    label: Route,
    keywords: KeywordSet,
    phrases: KeywordSet,
    weight: f64,
}

pub struct IntentScorer {
    rules: Vec<RouteRule>,
    default_label: Route,
}

impl IntentScorer {
    pub fn new(tables: &KeywordTables) -> Self {
        Self {
            rules: tables
                .intents
                .iter()
                .map(|entry| RouteRule {
                    label: entry.label,
                    keywords: KeywordSet::new(&entry.keywords),
                    phrases: KeywordSet::new(&entry.phrases),
                    weight: entry.weight,
                })
                .collect(),
            default_label: tables.default_intent,
        }
    }

    /// Classify a message with no conversation history.
    pub fn score(&self, text: &str) -> IntentResult {
        self.score_with_history(text, &[])
    }

    /// Classify a message, nudging routes that appeared in the last few turns.
    ///
    /// `recent` is ordered newest first.
    pub fn score_with_history(&self, text: &str, recent: &[Route]) -> IntentResult {
        let ranked = self.rank(text, recent);
        match ranked.first() {
            Some(best) if best.score > 0.0 => IntentResult {
                label: best.label,
                confidence: (best.score / CONFIDENCE_SCALE).min(1.0),
            },
            _ => IntentResult {
                label: self.default_label,
                confidence: 0.0,
            },
        }
    }

    /// Score every route, highest first. Equal scores keep table order.
    pub fn rank(&self, text: &str, recent: &[Route]) -> Vec<RouteScore> {
        let input = normalize(text);
        let window = &recent[..recent.len().min(HISTORY_WINDOW)];

        let mut scores: Vec<RouteScore> = self
            .rules
            .iter()
            .map(|rule| {
                let mut score = 0.0;
                let mut matches = Vec::new();
                for keyword in rule.keywords.matches(&input) {
                    score += rule.weight;
                    matches.push(keyword.display());
                }
                for phrase in rule.phrases.matches(&input) {
                    score += rule.weight * PHRASE_MULTIPLIER;
                    matches.push(phrase.display());
                }
                let repeats = window.iter().filter(|r| **r == rule.label).count();
                score += repeats as f64 * HISTORY_BONUS;

                RouteScore {
                    label: rule.label,
                    score,
                    matches,
                }
            })
            .collect();

        // Stable: ties stay in declaration order, so the earlier route wins.
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));

        if let Some(best) = scores.first() {
            tracing::debug!(
                route = %best.label,
                score = best.score,
                matched = best.matches.len(),
                "scored intent"
            );
        }
        scores
    }
}

impl Default for IntentScorer {
    fn default() -> Self {
        Self::new(&KeywordTables::default())
    }
}
