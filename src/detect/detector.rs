//! Scanning text with catalog rules.

use tracing::debug;

use super::catalog::{PatternCatalog, PatternRule};
use super::matcher::next_char_boundary;
use super::Match;

/// Run every rule of the catalog over `text`.
///
/// Each rule reports non-overlapping occurrences from left to right. Results
/// from different rules are not deduplicated: one span can be reported under
/// several bias types.
pub fn detect(text: &str, catalog: &PatternCatalog) -> Vec<Match> {
    let mut matches = Vec::new();
    for rule in catalog.rules() {
        scan_rule(text, rule, &mut matches);
    }
    matches
}

/// Collect all occurrences of one rule.
fn scan_rule(text: &str, rule: &PatternRule, out: &mut Vec<Match>) {
    let found = out.len();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(span) = rule.matcher.find_at(text, pos) else {
            break;
        };

        // Always move forward by at least one character, so a matcher that
        // returns an empty span cannot stall the scan.
        let advance = next_char_boundary(text, span.start);
        if span.is_empty() {
            pos = advance;
            continue;
        }

        out.push(Match {
            bias_type: rule.bias_type,
            category: rule.category,
            start: span.start,
            end: span.end,
            matched_text: text[span.clone()].to_string(),
        });
        pos = span.end.max(advance);
    }

    if out.len() > found {
        debug!(
            bias_type = %rule.bias_type,
            rule = %rule.matcher.describe(),
            matches = out.len() - found,
            "rule matched"
        );
    }
}
