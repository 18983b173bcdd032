//! Keyword matching primitive shared by the classifier, intent scorer and mood detector.
//!
//! A [`Pattern`] is a lowercase word or phrase. It matches only on word boundaries
//! (a non-alphanumeric character or the edge of the text on either side), so
//! `hi` does not fire inside `things`. A trailing `*` turns the pattern into a
//! stem: `learn*` matches `learn`, `learned` and `learning`.

/// Lowercase the text and fold typographic apostrophes, once per input.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// A single compiled keyword or phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    stem: bool,
}

impl Pattern {
    /// Parse a table entry. Returns `None` for entries that are empty after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (body, stem) = match raw.strip_suffix('*') {
            Some(body) => (body.trim_end(), true),
            None => (raw, false),
        };
        if body.is_empty() {
            return None;
        }
        Some(Self {
            text: normalize(body),
            stem,
        })
    }

    /// The pattern as written in a table (stems keep their `*`).
    pub fn display(&self) -> String {
        if self.stem {
            format!("{}*", self.text)
        } else {
            self.text.clone()
        }
    }

    /// Test against text already passed through [`normalize`].
    pub fn is_match(&self, haystack: &str) -> bool {
        let opens_on_word = self.text.chars().next().is_some_and(is_word_char);
        let closes_on_word = self.text.chars().next_back().is_some_and(is_word_char);

        haystack.match_indices(self.text.as_str()).any(|(start, found)| {
            let end = start + found.len();
            let left_ok = !opens_on_word
                || haystack[..start]
                    .chars()
                    .next_back()
                    .map_or(true, |c| !is_word_char(c));
            let right_ok = self.stem
                || !closes_on_word
                || haystack[end..]
                    .chars()
                    .next()
                    .map_or(true, |c| !is_word_char(c));
            left_ok && right_ok
        })
    }
}

/// An ordered set of patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    patterns: Vec<Pattern>,
}

impl KeywordSet {
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: raw
                .into_iter()
                .filter_map(|entry| Pattern::parse(entry.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Patterns that match, in declaration order.
    pub fn matches<'a>(&'a self, haystack: &'a str) -> impl Iterator<Item = &'a Pattern> + 'a {
        self.patterns.iter().filter(move |p| p.is_match(haystack))
    }

    pub fn any_match(&self, haystack: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(haystack))
    }

    pub fn count_matches(&self, haystack: &str) -> usize {
        self.matches(haystack).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, text: &str) -> bool {
        Pattern::parse(pattern).unwrap().is_match(&normalize(text))
    }

    #[test]
    fn whole_word_only() {
        assert!(matches("hi", "hi there"));
        assert!(matches("hi", "oh, hi!"));
        assert!(!matches("hi", "three things"));
        assert!(!matches("work", "morning workout"));
    }

    #[test]
    fn stems_accept_suffixes() {
        assert!(matches("learn*", "I learned a lot"));
        assert!(matches("learn*", "learning rust"));
        assert!(matches("learn*", "learn"));
        assert!(!matches("learn*", "unlearned"));
    }

    #[test]
    fn phrases_match_across_spaces() {
        assert!(matches("made progress", "I made progress today"));
        assert!(!matches("made progress", "made some progress"));
        assert!(matches("can't figure", "I can\u{2019}t figure it out"));
    }

    #[test]
    fn symbols_need_no_word_boundary() {
        assert!(matches("$", "saved $200"));
        assert!(matches("%", "up 20%"));
    }

    #[test]
    fn case_insensitive() {
        assert!(matches("Promot*", "Got PROMOTED"));
    }

    #[test]
    fn later_occurrence_can_match() {
        // First "run" sits inside "brunch", second one stands alone.
        assert!(matches("run", "brunch then a run"));
    }

    #[test]
    fn empty_entries_are_dropped() {
        assert!(Pattern::parse("  ").is_none());
        assert!(Pattern::parse("*").is_none());
        let set = KeywordSet::new(["gym", "", "run*"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.count_matches("gym and running"), 2);
    }

    #[test]
    fn display_keeps_stem_marker() {
        assert_eq!(Pattern::parse("Learn*").unwrap().display(), "learn*");
        assert_eq!(Pattern::parse("gym").unwrap().display(), "gym");
    }
}
