//! Mood and energy detection over the whole message.

use serde::{Deserialize, Serialize};

use super::matcher::{normalize, KeywordSet};
use super::tables::KeywordTables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
    Stressed,
    Excited,
    Frustrated,
    Calm,
    Motivated,
    /// No mood keyword matched.
    Neutral,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Stressed => "stressed",
            Self::Excited => "excited",
            Self::Frustrated => "frustrated",
            Self::Calm => "calm",
            Self::Motivated => "motivated",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodResult {
    pub mood: Mood,
    pub energy: Energy,
    /// Every mood keyword found, across all moods.
    pub emotions: Vec<String>,
    pub confidence: f64,
}

/// Confidence reported when no mood keyword matched.
const NEUTRAL_CONFIDENCE: f64 = 0.3;

pub struct MoodDetector {
    moods: Vec<(Mood, KeywordSet)>,
    /// Checked in order high, low, medium.
    energy: [(Energy, KeywordSet); 3],
}

impl MoodDetector {
    pub fn new(tables: &KeywordTables) -> Self {
        Self {
            moods: tables
                .moods
                .iter()
                .map(|entry| (entry.mood, KeywordSet::new(&entry.keywords)))
                .collect(),
            energy: [
                (Energy::High, KeywordSet::new(&tables.energy.high)),
                (Energy::Low, KeywordSet::new(&tables.energy.low)),
                (Energy::Medium, KeywordSet::new(&tables.energy.medium)),
            ],
        }
    }

    pub fn detect(&self, text: &str) -> MoodResult {
        let input = normalize(text);

        let mut mood = Mood::Neutral;
        let mut best = 0;
        let mut emotions = Vec::new();
        for (candidate, keywords) in &self.moods {
            let mut count = 0;
            for pattern in keywords.matches(&input) {
                count += 1;
                emotions.push(pattern.display());
            }
            if count > best {
                best = count;
                mood = *candidate;
            }
        }

        let energy = self
            .energy
            .iter()
            .find(|(_, keywords)| keywords.any_match(&input))
            .map_or(Energy::Medium, |(level, _)| *level);

        let confidence = if best > 0 {
            (best as f64 / 2.0).min(1.0)
        } else {
            NEUTRAL_CONFIDENCE
        };

        MoodResult {
            mood,
            energy,
            emotions,
            confidence,
        }
    }
}
