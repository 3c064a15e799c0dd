//! Quick scan: a reduced, low-latency alternative to the full analysis.
//!
//! The quick scan is not a subset of the comprehensive analysis. It uses its
//! own, smaller pattern list (gender, racial, age and disability only),
//! counts raw matches instead of scoring findings, and rates risk from the
//! ratio of matches to words. No severity, confidence or explanation is
//! computed; every issue is reported as medium.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detect::matcher::{ci, RegexMatcher};
use crate::detect::{detect, BiasCategory, BiasType, PatternCatalog, PatternRule, Severity};

/// Ratio (matches per 100 words) above which risk is high.
pub const HIGH_RISK_RATIO: f64 = 5.0;
/// Ratio above which risk is medium.
pub const MEDIUM_RISK_RATIO: f64 = 2.0;
/// Multiplier from risk ratio to bias score.
pub const SCORE_MULTIPLIER: f64 = 10.0;

lazy_static! {
    static ref QUICK_CATALOG: PatternCatalog = PatternCatalog::new()
        .with_rule(quick_rule(
            BiasType::Gender,
            r"\b(he|she|him|her|his|hers|guys?|girls?|ladies|gentlemen)\b",
        ))
        .with_rule(quick_rule(BiasType::Gender, r"\b(manpower|manhole|mankind)\b"))
        .with_rule(quick_rule(
            BiasType::Racial,
            r"\b(articulate|well-spoken|urban|ghetto|exotic)\b",
        ))
        .with_rule(quick_rule(BiasType::Racial, r"\b(you people|your kind|all \w+ are)\b"))
        .with_rule(quick_rule(
            BiasType::Age,
            r"\b(too old|too young|digital native|boomer|millennial)\b",
        ))
        .with_rule(quick_rule(BiasType::Age, r"\b(young blood|old guard|senior moment)\b"))
        .with_rule(quick_rule(
            BiasType::Disability,
            r"\b(crazy|insane|lame|retarded|psycho|dumb|stupid)\b",
        ))
        .with_rule(quick_rule(
            BiasType::Disability,
            r"\b(normal person|handicapped|suffers from)\b",
        ));

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

fn quick_rule(bias_type: BiasType, pattern: &str) -> PatternRule {
    PatternRule::new(bias_type, BiasCategory::Language, RegexMatcher::new(ci(pattern)))
}

/// Three-tier risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map a risk ratio to a label.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > HIGH_RISK_RATIO {
            RiskLevel::High
        } else if ratio > MEDIUM_RISK_RATIO {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Match counts per covered bias type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    pub gender_terms: usize,
    pub racial_terms: usize,
    pub age_terms: usize,
    pub disability_terms: usize,
}

impl QuickStats {
    fn count(&mut self, bias_type: BiasType) {
        match bias_type {
            BiasType::Gender => self.gender_terms += 1,
            BiasType::Racial => self.racial_terms += 1,
            BiasType::Age => self.age_terms += 1,
            BiasType::Disability => self.disability_terms += 1,
            _ => {}
        }
    }

    pub fn total(&self) -> usize {
        self.gender_terms + self.racial_terms + self.age_terms + self.disability_terms
    }
}

/// A flagged term from a quick scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickIssue {
    #[serde(rename = "type")]
    pub bias_type: BiasType,
    pub term: String,
    pub severity: Severity,
}

/// Outcome of a quick scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickScanResult {
    pub overall_risk: RiskLevel,
    /// 0-100, higher means more bias markers.
    pub bias_score: f64,
    /// Matches per 100 words.
    pub risk_ratio: f64,
    pub word_count: usize,
    pub detected_issues: Vec<QuickIssue>,
    pub quick_stats: QuickStats,
}

/// Number of pieces produced by splitting on runs of whitespace.
///
/// Leading or trailing whitespace yields an extra empty piece and an empty
/// text counts as one word.
pub fn word_count(text: &str) -> usize {
    WHITESPACE.split(text).count()
}

/// Run a quick scan over a text.
pub fn quick_scan(text: &str) -> QuickScanResult {
    let matches = detect(text, &QUICK_CATALOG);

    let mut quick_stats = QuickStats::default();
    let detected_issues: Vec<QuickIssue> = matches
        .into_iter()
        .map(|m| {
            quick_stats.count(m.bias_type);
            QuickIssue {
                bias_type: m.bias_type,
                term: m.matched_text,
                severity: Severity::Medium,
            }
        })
        .collect();

    let words = word_count(text);
    let risk_ratio = detected_issues.len() as f64 / words.max(1) as f64 * 100.0;
    let bias_score = (risk_ratio * SCORE_MULTIPLIER).min(100.0);
    let overall_risk = RiskLevel::from_ratio(risk_ratio);

    debug!(
        matches = detected_issues.len(),
        words,
        risk = %overall_risk,
        "quick scan complete"
    );

    QuickScanResult {
        overall_risk,
        bias_score,
        risk_ratio,
        word_count: words,
        detected_issues,
        quick_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_matches_whitespace_split() {
        assert_eq!(word_count(""), 1);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("one  two\tthree\n"), 4);
        assert_eq!(word_count(" lead"), 2);
    }

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(RiskLevel::from_ratio(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_ratio(2.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_ratio(2.1), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_ratio(5.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_ratio(5.1), RiskLevel::High);
    }

    #[test]
    fn test_quick_scan_counts_pronouns() {
        let result = quick_scan("She is articulate and he is the manager");

        assert_eq!(result.quick_stats.gender_terms, 2);
        assert_eq!(result.quick_stats.racial_terms, 1);
        assert_eq!(result.word_count, 8);
        assert!((result.risk_ratio - 37.5).abs() < 1e-9);
        assert_eq!(result.bias_score, 100.0);
        assert_eq!(result.overall_risk, RiskLevel::High);
        assert!(result
            .detected_issues
            .iter()
            .all(|i| i.severity == Severity::Medium));
    }

    #[test]
    fn test_quick_scan_low_risk() {
        // One match in 60 words: ratio 1.67.
        let text = format!("{} boomer", "word ".repeat(59).trim_end());
        let result = quick_scan(&text);

        assert_eq!(result.word_count, 60);
        assert_eq!(result.quick_stats.age_terms, 1);
        assert_eq!(result.overall_risk, RiskLevel::Low);
        assert!((result.bias_score - 1.0 / 60.0 * 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_quick_scan_medium_risk() {
        // One match in 40 words: ratio 2.5.
        let text = format!("{} crazy", "word ".repeat(39).trim_end());
        let result = quick_scan(&text);

        assert_eq!(result.overall_risk, RiskLevel::Medium);
        assert_eq!(result.quick_stats.disability_terms, 1);
    }

    #[test]
    fn test_quick_scan_clean_text() {
        let result = quick_scan("The meeting starts at noon.");
        assert!(result.detected_issues.is_empty());
        assert_eq!(result.bias_score, 0.0);
        assert_eq!(result.overall_risk, RiskLevel::Low);
        assert_eq!(result.quick_stats.total(), 0);
    }

    #[test]
    fn test_quick_scan_differs_from_full_catalog() {
        // "millennial" alone is only in the quick list; "dinosaur" only in the full one.
        let result = quick_scan("millennial dinosaur");
        assert_eq!(result.detected_issues.len(), 1);
        assert_eq!(result.detected_issues[0].term, "millennial");
    }
}
