//! Text matchers used by the pattern catalog.
//!
//! A matcher only knows how to find the next span of interest at or after a
//! byte offset. The detector owns the scan loop, so a matcher backed by a
//! tokenizer or a model can replace the regex matchers without touching the
//! detector or the scoring code.

use regex::Regex;
use std::ops::Range;

/// Finds surface forms in a text.
pub trait TextMatcher: Send + Sync + std::fmt::Debug {
    /// Returns the byte range of the first match starting at or after `from`.
    ///
    /// `from` is always a char boundary no greater than `text.len()`.
    /// Implementations may return an empty range; the detector skips those.
    fn find_at(&self, text: &str, from: usize) -> Option<Range<usize>>;

    /// Short human-readable form, used in logs.
    fn describe(&self) -> String;
}

/// Compile a case-insensitive pattern from the built-in catalog.
///
/// Only used for patterns that ship with the crate, so a failure is a
/// programming error caught by the catalog tests.
pub(crate) fn ci(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).expect("built-in pattern must compile")
}

/// Matches every occurrence of a regular expression.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }

    /// Build a matcher from a user-supplied pattern (case-insensitive).
    pub fn parse(pattern: &str) -> anyhow::Result<Self> {
        let regex = Regex::new(&format!("(?i){}", pattern))
            .map_err(|e| anyhow::anyhow!("compiling pattern {:?}: {}", pattern, e))?;
        Ok(Self { regex })
    }
}

impl TextMatcher for RegexMatcher {
    fn find_at(&self, text: &str, from: usize) -> Option<Range<usize>> {
        if from > text.len() {
            return None;
        }
        self.regex.find_at(text, from).map(|m| m.range())
    }

    fn describe(&self) -> String {
        self.regex.as_str().to_string()
    }
}

/// Matches an anchor word only when a trigger word follows it later on the
/// same line, e.g. a pronoun followed by a role noun.
///
/// The reported span covers the anchor alone.
#[derive(Debug, Clone)]
pub struct FollowedByMatcher {
    anchor: Regex,
    trigger: Regex,
}

impl FollowedByMatcher {
    pub fn new(anchor: Regex, trigger: Regex) -> Self {
        Self { anchor, trigger }
    }

    /// Only the rest of the current line is searched.
    fn trigger_on_same_line(&self, text: &str, from: usize) -> bool {
        let line = &text[..line_end(text, from)];
        self.trigger.find_at(line, from).is_some()
    }
}

impl TextMatcher for FollowedByMatcher {
    fn find_at(&self, text: &str, from: usize) -> Option<Range<usize>> {
        let mut search = from;
        while search <= text.len() {
            let anchor = self.anchor.find_at(text, search)?;
            if self.trigger_on_same_line(text, anchor.end()) {
                return Some(anchor.range());
            }
            // Retry one character past the rejected anchor's start.
            search = next_char_boundary(text, anchor.start());
        }
        None
    }

    fn describe(&self) -> String {
        format!("{} .. {}", self.anchor.as_str(), self.trigger.as_str())
    }
}

/// Byte offset of the character after the one starting at `pos`, or
/// `text.len() + 1` when `pos` is at the end of the text.
pub(crate) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| pos + c.len_utf8())
}

/// Byte offset of the first line terminator at or after `from`.
fn line_end(text: &str, from: usize) -> usize {
    text[from..]
        .find(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
        .map_or(text.len(), |i| from + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pronoun_role() -> FollowedByMatcher {
        FollowedByMatcher::new(ci(r"\b(he|she|her)\b"), ci(r"\b(manager|nurse)\b"))
    }

    #[test]
    fn test_regex_matcher_case_insensitive() {
        let m = RegexMatcher::new(ci(r"\b(mankind)\b"));
        assert_eq!(m.find_at("For all MANKIND.", 0), Some(8..15));
        assert_eq!(m.find_at("For all MANKIND.", 9), None);
    }

    #[test]
    fn test_regex_matcher_respects_word_boundary_at_offset() {
        let m = RegexMatcher::new(ci(r"\b(lame)\b"));
        // Starting inside "blame" must not report "lame".
        assert_eq!(m.find_at("blame", 1), None);
    }

    #[test]
    fn test_regex_matcher_past_end() {
        let m = RegexMatcher::new(ci("x"));
        assert_eq!(m.find_at("x", 2), None);
    }

    #[test]
    fn test_parse_rejects_invalid_pattern() {
        assert!(RegexMatcher::parse("(unclosed").is_err());
        assert!(RegexMatcher::parse(r"\bok\b").is_ok());
    }

    #[test]
    fn test_followed_by_reports_anchor_only() {
        let m = pronoun_role();
        assert_eq!(m.find_at("She is the manager", 0), Some(0..3));
    }

    #[test]
    fn test_followed_by_requires_trigger_after_anchor() {
        let m = pronoun_role();
        assert_eq!(m.find_at("The manager said she left", 0), None);
    }

    #[test]
    fn test_followed_by_stops_at_line_end() {
        let m = pronoun_role();
        assert_eq!(m.find_at("she left\nthe manager stayed", 0), None);
        assert_eq!(m.find_at("she left\r\nthe nurse stayed", 0), None);
    }

    #[test]
    fn test_followed_by_skips_rejected_anchor() {
        let m = pronoun_role();
        let text = "he left\nher nurse";
        assert_eq!(m.find_at(text, 0), Some(8..11));
    }

    #[test]
    fn test_followed_by_trigger_at_line_end() {
        let m = pronoun_role();
        assert_eq!(m.find_at("she is a nurse
ok", 0), Some(0..3));
        assert_eq!(m.find_at("she is a nurse", 0), Some(0..3));
        // The line cut must not turn "nurses" into a whole-word "nurse".
        assert_eq!(m.find_at("she hires nurses
", 0), None);
    }

    #[test]
    fn test_followed_by_long_line_without_trigger() {
        let m = pronoun_role();
        let text = "he said it ".repeat(5_000);
        assert_eq!(m.find_at(&text, 0), None);
        let text = format!("{}nurse", text);
        assert_eq!(m.find_at(&text, 0), Some(0..2));
    }

    #[test]
    fn test_describe() {
        assert_eq!(RegexMatcher::new(ci("x")).describe(), "(?i)x");
        assert_eq!(pronoun_role().describe(), r"(?i)\b(he|she|her)\b .. (?i)\b(manager|nurse)\b");
    }

    #[test]
    fn test_next_char_boundary_multibyte() {
        let text = "é!";
        assert_eq!(next_char_boundary(text, 0), 2);
        assert_eq!(next_char_boundary(text, 2), 3);
        assert_eq!(next_char_boundary(text, 3), 4);
    }
}
