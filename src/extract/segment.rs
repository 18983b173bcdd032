//! Segmentation: split one message into candidate accomplishment strings.
//!
//! Rules are tried in a fixed order and the first one that produces at least two
//! items wins:
//!
//! 1. numbered lines (`1. ...`, `2) ...`)
//! 2. a count-introducing marker phrase (`three things:`), list after it
//! 3. prose separators (commas, `and`, `plus`, `also`, `then`)
//! 4. a single non-clock colon, list after it
//! 5. the whole message as one item
//!
//! Numbered lines keep every non-empty remainder. Fragments from rules 2 to 4
//! that are too short to be an accomplishment on their own are dropped, never
//! promoted, so a list can come out shorter than it looks. The fallback returns
//! the message exactly as given.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Phrases announcing a list of wins. Matched case-insensitively, in this order.
const MARKER_PHRASES: &[&str] = &[
    "accomplished three things:",
    "did three things:",
    "completed multiple",
    "several accomplishments",
    "multiple wins",
    "three things:",
    "two things:",
    "four things:",
];

/// Items after a marker phrase or colon need more than this many characters.
const LIST_MIN_CHARS: usize = 5;
/// Fragments of free prose need more than this many characters.
const PROSE_MIN_CHARS: usize = 15;
/// Upper bound on items returned for a single message.
pub const MAX_ITEMS: usize = 12;

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s*(.+)$").expect("Invalid regex: numbered line"));

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("Invalid regex: clock time"));

static PROSE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i),|\b(?:and|plus|also|then)\b").expect("Invalid regex: prose separator")
});

static LIST_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*,\s*(?:(?:and|plus|also|then)\s+)?|\s+(?:and|plus|also|then)\s+|\s+\+\s+")
        .expect("Invalid regex: list separator")
});

static MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MARKER_PHRASES
        .iter()
        .map(|phrase| {
            Regex::new(&format!("(?i){}", regex::escape(phrase)))
                .expect("Invalid regex: marker phrase")
        })
        .collect()
});

/// Which rule produced a segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentRule {
    Numbered,
    Marker,
    Separator,
    Colon,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segmentation {
    pub rule: SegmentRule,
    pub items: Vec<String>,
}

/// Split `text` into candidate items. Never returns an empty list.
pub fn segment(text: &str) -> Vec<String> {
    segment_detailed(text).items
}

/// Like [`segment`], also reporting which rule fired.
pub fn segment_detailed(text: &str) -> Segmentation {
    let input = text.trim();

    let (rule, mut items) = numbered_items(input)
        .map(|items| (SegmentRule::Numbered, items))
        .or_else(|| marker_items(input).map(|items| (SegmentRule::Marker, items)))
        .or_else(|| separator_items(input).map(|items| (SegmentRule::Separator, items)))
        .or_else(|| colon_items(input).map(|items| (SegmentRule::Colon, items)))
        .unwrap_or_else(|| (SegmentRule::Fallback, vec![text.to_string()]));

    if items.len() > MAX_ITEMS {
        warn!(
            found = items.len(),
            kept = MAX_ITEMS,
            "too many candidate items, dropping the tail"
        );
        items.truncate(MAX_ITEMS);
    }

    debug!(rule = ?rule, items = items.len(), "segmented input");
    Segmentation { rule, items }
}

fn longer_than(fragment: &str, min_chars: usize) -> bool {
    fragment.chars().count() > min_chars
}

/// Keep the result only when it holds at least two items.
fn at_least_two(items: Vec<String>) -> Option<Vec<String>> {
    (items.len() >= 2).then_some(items)
}

fn numbered_items(input: &str) -> Option<Vec<String>> {
    let items = input
        .lines()
        .filter_map(|line| NUMBERED_LINE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    at_least_two(items)
}

fn marker_items(input: &str) -> Option<Vec<String>> {
    let found = MARKERS.iter().find_map(|marker| marker.find(input))?;
    at_least_two(split_list(&input[found.end()..]))
}

fn separator_items(input: &str) -> Option<Vec<String>> {
    let items = PROSE_SEPARATOR
        .split(input)
        .map(str::trim)
        .filter(|part| longer_than(part, PROSE_MIN_CHARS))
        .map(str::to_string)
        .collect();
    at_least_two(items)
}

fn colon_items(input: &str) -> Option<Vec<String>> {
    if input.matches(':').count() != 1 || CLOCK_TIME.is_match(input) {
        return None;
    }
    let (_, list) = input.split_once(':')?;
    at_least_two(split_list(list))
}

/// Split an explicit list (text after a marker phrase or colon).
fn split_list(text: &str) -> Vec<String> {
    LIST_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|item| longer_than(item, LIST_MIN_CHARS))
        .map(str::to_string)
        .collect()
}
