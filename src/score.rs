//! Scoring and summary for analysis results.
//!
//! The overall score starts at 100 (no detected bias) and loses points for
//! each finding, weighted by severity and confidence and normalized to a
//! per-100-words rate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::detect::{BiasCategory, BiasFinding, BiasType, Severity};

/// Score of a text with no findings.
pub const MAX_SCORE: f64 = 100.0;

/// Average characters per word used to estimate word counts.
///
/// Deliberately rough: scoring depends on this exact estimator, so it is not
/// replaced by a tokenizer.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Findings per severity; all four buckets are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityBreakdown {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }

    fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

/// Tallies over all findings of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_biases_detected: usize,
    pub severity_breakdown: SeverityBreakdown,
    /// Only categories that occur.
    pub category_breakdown: BTreeMap<BiasCategory, usize>,
    /// Only bias types that occur.
    #[serde(default)]
    pub type_breakdown: BTreeMap<BiasType, usize>,
}

/// Estimated number of words in a text.
pub fn estimated_words(text: &str) -> f64 {
    text.chars().count() as f64 / CHARS_PER_WORD
}

/// Sum of severity weight times confidence over all findings.
pub fn total_penalty(findings: &[BiasFinding]) -> f64 {
    findings.iter().map(BiasFinding::penalty).sum()
}

/// Calculate the overall fairness score (0-100, higher is better).
pub fn overall_score(findings: &[BiasFinding], text: &str) -> f64 {
    if findings.is_empty() {
        return MAX_SCORE;
    }

    let words = estimated_words(text);
    // Findings against an empty text only arise from direct callers.
    if words <= 0.0 {
        return MAX_SCORE;
    }

    let normalized = total_penalty(findings) / words * 100.0;
    (MAX_SCORE - normalized).clamp(0.0, MAX_SCORE)
}

/// Tally findings by severity, category and type.
pub fn summarize(findings: &[BiasFinding]) -> Summary {
    let mut summary = Summary {
        total_biases_detected: findings.len(),
        ..Default::default()
    };

    for f in findings {
        summary.severity_breakdown.increment(f.severity);
        *summary.category_breakdown.entry(f.category()).or_insert(0) += 1;
        *summary.type_breakdown.entry(f.bias_type()).or_insert(0) += 1;
    }

    summary
}
