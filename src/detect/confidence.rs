//! Confidence scoring for matched terms.

/// Starting confidence for any match.
pub const BASE_CONFIDENCE: f64 = 0.70;
/// Confidence for terms that are unambiguous on their own.
pub const EXACT_CONFIDENCE: f64 = 0.95;
/// Bonus when the surrounding text is about employment.
pub const CONTEXT_BONUS: f64 = 0.10;
/// Upper bound for any confidence.
pub const MAX_CONFIDENCE: f64 = 0.99;
/// Characters inspected on each side of a match.
pub const CONTEXT_WINDOW: usize = 50;

const EXACT_TERMS: &[&str] = &["mankind", "manhole", "manpower", "retarded", "psycho"];
const EMPLOYMENT_KEYWORDS: &[&str] = &["hire", "employ", "job"];

/// Score how likely a match is a real instance of bias.
///
/// `position` is the byte offset of the match in `full_text`.
pub fn score(matched_text: &str, position: usize, full_text: &str) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    if EXACT_TERMS.contains(&matched_text.to_lowercase().as_str()) {
        confidence = EXACT_CONFIDENCE;
    }

    let context = context_window(full_text, position, position + matched_text.len()).to_lowercase();
    if EMPLOYMENT_KEYWORDS.iter().any(|k| context.contains(k)) {
        confidence += CONTEXT_BONUS;
    }

    confidence.min(MAX_CONFIDENCE)
}

/// The match plus up to `CONTEXT_WINDOW` characters on each side.
fn context_window(text: &str, start: usize, end: usize) -> &str {
    let lo = text[..start]
        .char_indices()
        .rev()
        .take(CONTEXT_WINDOW)
        .last()
        .map_or(start, |(i, _)| i);
    let hi = text[end..]
        .char_indices()
        .nth(CONTEXT_WINDOW)
        .map_or(text.len(), |(i, _)| end + i);
    &text[lo..hi]
}
