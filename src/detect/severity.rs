//! Severity classification for matched terms.

use super::{BiasType, Severity};

/// Terms that are always critical.
const CRITICAL_TERMS: &[&str] = &["negro", "colored", "oriental", "mankind", "manhole"];

/// Terms that are high severity unless a critical term is also present.
const HIGH_TERMS: &[&str] = &[
    "retarded",
    "psycho",
    "crazy",
    "insane",
    "savage",
    "primitive",
    "thug",
    "ghetto",
    "trailer trash",
    "white trash",
];

/// Words that turn a gendered term into a prescriptive statement.
const OBLIGATION_WORDS: &[&str] = &["should", "must"];

/// Severity used when no lexicon rule applies.
pub const DEFAULT_SEVERITY: Severity = Severity::Medium;

/// Classify a matched term.
///
/// Lexicon checks are substring checks on the lower-cased match, so a
/// phrase match such as "so crazy" inherits the severity of "crazy".
pub fn classify(matched_text: &str, bias_type: BiasType) -> Severity {
    let lower = matched_text.to_lowercase();

    if CRITICAL_TERMS.iter().any(|t| lower.contains(t)) {
        return Severity::Critical;
    }

    if HIGH_TERMS.iter().any(|t| lower.contains(t)) {
        return Severity::High;
    }

    if bias_type == BiasType::Gender && OBLIGATION_WORDS.iter().any(|w| lower.contains(w)) {
        return Severity::High;
    }

    DEFAULT_SEVERITY
}
