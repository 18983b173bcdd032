//! Rule-based extraction: free-form check-in text to structured records.
//!
//! The [`Extractor`] runs the full pipeline:
//!
//! ```text
//! text ──► segment ──► classify (per item) ──► items
//!   └────► intent scorer ───────────────────► route label
//!   └────► mood detector, timeframe, metrics
//! ```
//!
//! Every stage is pure and never fails; unmatched input resolves to documented
//! defaults so callers never handle a rejection case.

pub mod classify;
pub mod intent;
pub mod matcher;
pub mod mood;
pub mod segment;
pub mod signals;
pub mod tables;
pub mod types;

use serde::Serialize;

use classify::{ItemClassifier, KeywordClassifier};
use intent::IntentScorer;
use mood::{MoodDetector, MoodResult};
use signals::{Metric, Timeframe};
use tables::KeywordTables;
use types::{ClassifiedItem, IntentResult, Route};

/// Everything extracted from one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub items: Vec<ClassifiedItem>,
    pub total_count: usize,
    pub intent: IntentResult,
    pub mood: MoodResult,
    pub timeframe: Timeframe,
    pub metrics: Vec<Metric>,
}

pub struct Extractor {
    classifier: Box<dyn ItemClassifier>,
    intent: IntentScorer,
    mood: MoodDetector,
}

impl Extractor {
    /// Build the keyword-driven pipeline from a set of tables.
    pub fn new(tables: &KeywordTables) -> Self {
        Self {
            classifier: Box::new(KeywordClassifier::new(tables)),
            intent: IntentScorer::new(tables),
            mood: MoodDetector::new(tables),
        }
    }

    /// Swap the per-item classifier, keeping intent and mood scoring.
    pub fn with_classifier(mut self, classifier: Box<dyn ItemClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn intent_scorer(&self) -> &IntentScorer {
        &self.intent
    }

    pub fn classify(&self, item: &str) -> ClassifiedItem {
        self.classifier.classify(item)
    }

    pub fn extract(&self, text: &str) -> Extraction {
        self.extract_with_history(text, &[])
    }

    /// Run the pipeline; `recent` is the caller's route history, newest first.
    pub fn extract_with_history(&self, text: &str, recent: &[Route]) -> Extraction {
        let items: Vec<ClassifiedItem> = segment::segment(text)
            .iter()
            .map(|candidate| self.classifier.classify(candidate))
            .collect();
        let intent = self.intent.score_with_history(text, recent);

        tracing::info!(
            items = items.len(),
            route = %intent.label,
            confidence = intent.confidence,
            "extraction complete"
        );

        Extraction {
            total_count: items.len(),
            items,
            intent,
            mood: self.mood.detect(text),
            timeframe: signals::timeframe(text),
            metrics: signals::metrics(text),
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&KeywordTables::default())
    }
}
