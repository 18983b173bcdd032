//! Keyword tables: the configuration data behind every keyword-driven decision.
//!
//! [`KeywordTables`] holds the impact tiers, the ordered category list, the intent
//! table, and the mood/energy vocabularies. The built-in defaults cover English
//! accountability check-ins; a TOML file with the same shape replaces them
//! (see [`KeywordTables::from_config`]). Entry syntax is described in
//! [`super::matcher`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use super::mood::Mood;
use super::types::{Category, Route};
use crate::config::{expand_tilde, ExtractionConfig};

// ── Built-in vocabulary ──────────────────────────────────────────────────────

const IMPACT_LARGE: &[&str] = &[
    "huge", "major", "breakthrough", "massive", "incredible", "amazing", "crushed", "won",
    "promot*", "record",
];

const IMPACT_SMALL: &[&str] = &["small", "tiny", "minor", "little", "quick*"];

const CATEGORY_WORK: &[&str] = &[
    "work", "worked", "working", "job", "career", "business", "project*", "meeting*",
    "presentation*", "client*", "deal*", "sales", "promot*", "launch*", "report*", "deadline*",
    "office", "boss",
];

const CATEGORY_HEALTH: &[&str] = &[
    "health*", "fitness", "exercis*", "workout*", "diet", "nutrition", "wellness", "gym", "run",
    "runs", "running", "ran", "miles", "cardio", "jog*", "yoga", "lifted", "slept", "meditat*",
];

const CATEGORY_LEARNING: &[&str] = &[
    "learn*", "study", "studied", "studying", "skill*", "course*", "book", "books", "training",
    "educat*", "read", "reading", "chapter*", "tutorial*", "practic*",
];

const CATEGORY_PERSONAL: &[&str] = &[
    "personal", "family", "friend*", "relationship*", "social", "habit*", "mom", "dad", "parents",
    "dinner", "celebrat*", "partner", "kids",
];

const CATEGORY_FINANCE: &[&str] = &[
    "money", "financ*", "budget*", "invest*", "saving*", "saved", "income", "$", "dollar*", "debt",
    "paid off",
];

const CATEGORY_CREATIVE: &[&str] = &[
    "creative", "art", "design*", "writing", "wrote", "music", "video*", "content", "website",
    "paint*", "draw*", "song*", "blog*",
];

const MOOD_VOCABULARY: &[(Mood, &[&str])] = &[
    (
        Mood::Happy,
        &["happy", "joyful", "elated", "cheerful", "upbeat", "great", "amazing"],
    ),
    (
        Mood::Sad,
        &["sad", "down", "depressed", "blue", "disappointed", "upset"],
    ),
    (
        Mood::Stressed,
        &["stressed", "overwhelmed", "anxious", "worried", "pressure"],
    ),
    (
        Mood::Excited,
        &["excited", "pumped", "thrilled", "enthusiastic", "energized"],
    ),
    (
        Mood::Frustrated,
        &["frustrated", "annoyed", "irritated", "mad", "angry"],
    ),
    (
        Mood::Calm,
        &["calm", "peaceful", "relaxed", "serene", "content"],
    ),
    (
        Mood::Motivated,
        &["motivated", "driven", "determined", "focused", "ready"],
    ),
];

// ── Table types ──────────────────────────────────────────────────────────────

/// Validation failures for a [`KeywordTables`] value.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("category `{0}` is listed more than once")]
    DuplicateCategory(Category),

    #[error("`{0}` is a fallback value and cannot carry keywords")]
    FallbackListed(&'static str),

    #[error("intent `{0}` is listed more than once")]
    DuplicateIntent(Route),

    #[error("intent `{label}` has invalid weight {weight}; weights must be finite and positive")]
    InvalidWeight { label: Route, weight: f64 },

    #[error("default intent `{0}` is not declared in the intent table")]
    UnknownDefaultIntent(Route),

    #[error("mood `{0}` is listed more than once")]
    DuplicateMood(Mood),

    #[error("{0} contains an empty pattern")]
    EmptyPattern(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactTable {
    /// Checked first; a large match wins over a small one.
    pub large: Vec<String>,
    pub small: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: Category,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentEntry {
    pub label: Route,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Scored at 1.5x the weight of a keyword.
    #[serde(default)]
    pub phrases: Vec<String>,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub mood: Mood,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyTable {
    pub high: Vec<String>,
    pub low: Vec<String>,
    pub medium: Vec<String>,
}

/// Every keyword table used by the extraction pipeline.
///
/// Order matters: `categories` is scanned first-match-wins, and earlier `intents`
/// and `moods` win ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    /// Route returned when no intent scores above zero.
    pub default_intent: Route,
    pub impact: ImpactTable,
    pub categories: Vec<CategoryEntry>,
    pub intents: Vec<IntentEntry>,
    pub moods: Vec<MoodEntry>,
    pub energy: EnergyTable,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Default for ImpactTable {
    fn default() -> Self {
        Self {
            large: owned(IMPACT_LARGE),
            small: owned(IMPACT_SMALL),
        }
    }
}

impl Default for EnergyTable {
    fn default() -> Self {
        Self {
            high: owned(&["energized", "pumped", "hyped", "buzzing", "wired"]),
            low: owned(&["tired", "exhausted", "drained", "sleepy", "low energy"]),
            medium: owned(&["okay", "alright", "normal", "fine"]),
        }
    }
}

impl Default for KeywordTables {
    fn default() -> Self {
        let categories = [
            (Category::Work, CATEGORY_WORK),
            (Category::Health, CATEGORY_HEALTH),
            (Category::Learning, CATEGORY_LEARNING),
            (Category::Personal, CATEGORY_PERSONAL),
            (Category::Finance, CATEGORY_FINANCE),
            (Category::Creative, CATEGORY_CREATIVE),
        ]
        .into_iter()
        .map(|(category, words)| CategoryEntry {
            category,
            keywords: owned(words),
        })
        .collect();

        Self {
            default_intent: Route::Conversation,
            impact: ImpactTable::default(),
            categories,
            intents: default_intents(),
            moods: MOOD_VOCABULARY
                .iter()
                .map(|(mood, words)| MoodEntry {
                    mood: *mood,
                    keywords: owned(words),
                })
                .collect(),
            energy: EnergyTable::default(),
        }
    }
}

fn default_intents() -> Vec<IntentEntry> {
    vec![
        IntentEntry {
            label: Route::GainsTracking,
            keywords: owned(&[
                "accomplish*", "achiev*", "complet*", "finish*", "done", "won", "success*",
                "progress", "breakthrough*", "crushed",
            ]),
            phrases: owned(&["i did", "i finished", "i completed", "made progress", "got it done"]),
            weight: 3.0,
        },
        IntentEntry {
            label: Route::MentorAdvice,
            keywords: owned(&[
                "advice", "help", "stuck", "guidance", "mentor", "struggl*", "challeng*", "problem*",
            ]),
            phrases: owned(&[
                "what should i", "how do i", "need help", "dont know", "don't know", "can't figure",
            ]),
            weight: 3.0,
        },
        IntentEntry {
            label: Route::QuoteRequest,
            keywords: owned(&[
                "quote*", "inspiration", "motivate", "encourag*", "wisdom", "uplift*", "boost",
            ]),
            phrases: owned(&["need motivation", "feeling down", "inspire me", "pick me up"]),
            weight: 2.0,
        },
        IntentEntry {
            label: Route::GoalSetting,
            keywords: owned(&[
                "goal*", "target*", "aim", "plan", "want to", "going to", "commit*", "objective*",
            ]),
            phrases: owned(&["want to achieve", "my goal is", "planning to", "going to start"]),
            weight: 2.0,
        },
        IntentEntry {
            label: Route::CheckIn,
            keywords: owned(&["progress", "review", "reflect*", "update", "status", "how am i"]),
            phrases: owned(&["checking in", "progress report", "how have i been", "looking back"]),
            weight: 1.5,
        },
        IntentEntry {
            label: Route::Conversation,
            keywords: owned(&["hello", "hi", "hey", "chat", "talk", "discuss"]),
            phrases: owned(&["how are you", "whats up", "what's up", "good morning", "good evening"]),
            weight: 0.5,
        },
    ]
}

fn check_patterns(what: impl Fn() -> String, words: &[String]) -> Result<(), TableError> {
    if words
        .iter()
        .any(|w| w.trim().trim_end_matches('*').trim().is_empty())
    {
        return Err(TableError::EmptyPattern(what()));
    }
    Ok(())
}

impl KeywordTables {
    /// Check the structural invariants the classifier and scorers rely on.
    pub fn validate(&self) -> Result<(), TableError> {
        check_patterns(|| "impact.large".into(), &self.impact.large)?;
        check_patterns(|| "impact.small".into(), &self.impact.small)?;

        let mut seen = HashSet::new();
        for entry in &self.categories {
            if entry.category == Category::General {
                return Err(TableError::FallbackListed("general"));
            }
            if !seen.insert(entry.category) {
                return Err(TableError::DuplicateCategory(entry.category));
            }
            check_patterns(|| format!("category `{}`", entry.category), &entry.keywords)?;
        }

        let mut seen = HashSet::new();
        for entry in &self.intents {
            if !seen.insert(entry.label) {
                return Err(TableError::DuplicateIntent(entry.label));
            }
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(TableError::InvalidWeight {
                    label: entry.label,
                    weight: entry.weight,
                });
            }
            check_patterns(|| format!("intent `{}` keywords", entry.label), &entry.keywords)?;
            check_patterns(|| format!("intent `{}` phrases", entry.label), &entry.phrases)?;
        }
        if !seen.contains(&self.default_intent) {
            return Err(TableError::UnknownDefaultIntent(self.default_intent));
        }

        let mut seen = HashSet::new();
        for entry in &self.moods {
            if entry.mood == Mood::Neutral {
                return Err(TableError::FallbackListed("neutral"));
            }
            if !seen.insert(entry.mood) {
                return Err(TableError::DuplicateMood(entry.mood));
            }
            check_patterns(|| format!("mood `{}`", entry.mood), &entry.keywords)?;
        }

        check_patterns(|| "energy.high".into(), &self.energy.high)?;
        check_patterns(|| "energy.low".into(), &self.energy.low)?;
        check_patterns(|| "energy.medium".into(), &self.energy.medium)?;
        Ok(())
    }

    /// Parse tables from a TOML file and validate them.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read keyword tables at {}", path.display()))?;
        let tables: KeywordTables =
            toml::from_str(&contents).context("failed to parse keyword tables TOML")?;
        tables
            .validate()
            .with_context(|| format!("invalid keyword tables in {}", path.display()))?;
        info!(
            path = %path.display(),
            categories = tables.categories.len(),
            intents = tables.intents.len(),
            "keyword tables loaded"
        );
        Ok(tables)
    }

    /// The built-in tables, or the file named by `tables_path` when set.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        match config.tables_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Self::load_from(expand_tilde(path)),
            _ => Ok(Self::default()),
        }
    }

    /// Render the tables as TOML, in the shape [`KeywordTables::load_from`] reads.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize keyword tables")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_valid() {
        let tables = KeywordTables::default();
        tables.validate().unwrap();
        let order: Vec<Category> = tables.categories.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Work,
                Category::Health,
                Category::Learning,
                Category::Personal,
                Category::Finance,
                Category::Creative,
            ]
        );
        assert_eq!(tables.default_intent, Route::Conversation);
    }

    #[test]
    fn rejects_general_category() {
        let mut tables = KeywordTables::default();
        tables.categories.push(CategoryEntry {
            category: Category::General,
            keywords: vec!["misc".into()],
        });
        assert_eq!(tables.validate(), Err(TableError::FallbackListed("general")));
    }

    #[test]
    fn rejects_duplicate_intent_and_bad_weight() {
        let mut tables = KeywordTables::default();
        let first = tables.intents[0].clone();
        tables.intents.push(first);
        assert_eq!(
            tables.validate(),
            Err(TableError::DuplicateIntent(Route::GainsTracking))
        );

        let mut tables = KeywordTables::default();
        tables.intents[1].weight = 0.0;
        assert!(matches!(
            tables.validate(),
            Err(TableError::InvalidWeight { label: Route::MentorAdvice, .. })
        ));
    }

    #[test]
    fn rejects_undeclared_default_intent() {
        let mut tables = KeywordTables::default();
        tables.intents.retain(|e| e.label != Route::Conversation);
        assert_eq!(
            tables.validate(),
            Err(TableError::UnknownDefaultIntent(Route::Conversation))
        );
    }

    #[test]
    fn rejects_empty_pattern() {
        let mut tables = KeywordTables::default();
        tables.impact.small.push(" * ".into());
        assert_eq!(
            tables.validate(),
            Err(TableError::EmptyPattern("impact.small".into()))
        );
    }

    #[test]
    fn toml_round_trip_preserves_tables() {
        let tables = KeywordTables::default();
        let rendered = tables.to_toml().unwrap();
        let parsed: KeywordTables = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, tables);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_sections() {
        let toml_str = r#"
default_intent = "conversation"

[[categories]]
category = "health"
keywords = ["gym"]

[[categories]]
category = "work"
keywords = ["office"]
"#;
        let tables: KeywordTables = toml::from_str(toml_str).unwrap();
        tables.validate().unwrap();
        assert_eq!(tables.categories.len(), 2);
        assert_eq!(tables.categories[0].category, Category::Health);
        assert_eq!(tables.intents, KeywordTables::default().intents);
        assert_eq!(tables.impact, ImpactTable::default());
    }

    #[test]
    fn from_config_without_path_uses_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(
            KeywordTables::from_config(&config).unwrap(),
            KeywordTables::default()
        );
    }
}
