//! Record types produced by the extraction pipeline.
//!
//! Defines [`Category`] and [`Impact`] (per-item classification), [`Route`]
//! (the top-level intent label), and the records built from them:
//! [`ClassifiedItem`], [`IntentResult`] and [`RouteScore`].

use serde::{Deserialize, Serialize};

/// Life area an accomplishment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Work,
    Health,
    Learning,
    Personal,
    Finance,
    Creative,
    /// Nothing in the category table matched.
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Health => "health",
            Self::Learning => "learning",
            Self::Personal => "personal",
            Self::Finance => "finance",
            Self::Creative => "creative",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "health" => Ok(Self::Health),
            "learning" => Ok(Self::Learning),
            "personal" => Ok(Self::Personal),
            "finance" => Ok(Self::Finance),
            "creative" => Ok(Self::Creative),
            "general" => Ok(Self::General),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// How big an accomplishment reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Small,
    Medium,
    Large,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversation route a whole message is sent down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// The user is reporting accomplishments.
    GainsTracking,
    MentorAdvice,
    QuoteRequest,
    GoalSetting,
    CheckIn,
    /// Small talk; also the usual fallback route.
    Conversation,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GainsTracking => "gains_tracking",
            Self::MentorAdvice => "mentor_advice",
            Self::QuoteRequest => "quote_request",
            Self::GoalSetting => "goal_setting",
            Self::CheckIn => "check_in",
            Self::Conversation => "conversation",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gains_tracking" => Ok(Self::GainsTracking),
            "mentor_advice" => Ok(Self::MentorAdvice),
            "quote_request" => Ok(Self::QuoteRequest),
            "goal_setting" => Ok(Self::GoalSetting),
            "check_in" => Ok(Self::CheckIn),
            "conversation" => Ok(Self::Conversation),
            _ => Err(format!("unknown route: {s}")),
        }
    }
}

/// One accomplishment, classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    /// The candidate text as produced by the segmenter.
    pub description: String,
    pub category: Category,
    pub impact: Impact,
    /// Specificity score in `[0.0, 1.0]`.
    pub confidence: f64,
}

/// Top-level intent of a whole message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub label: Route,
    /// `min(score / 3, 1)`; `0.0` when nothing matched.
    pub confidence: f64,
}

/// Per-route score breakdown, used for explain output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteScore {
    pub label: Route,
    pub score: f64,
    /// Keywords and phrases that contributed to the score.
    pub matches: Vec<String>,
}
