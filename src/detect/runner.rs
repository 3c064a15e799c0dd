//! Analysis runner that orchestrates detection, scoring and recommendations.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::recommend;
use crate::score::{self, Summary};

use super::{confidence, detect, explain, severity, BiasFinding, Match, PatternCatalog};

/// Outcome of a comprehensive analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0-100, where 100 means no detected bias.
    pub overall_score: f64,
    /// Findings in detection order.
    pub findings: Vec<BiasFinding>,
    pub summary: Summary,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Check if the score meets a minimum acceptable score.
    pub fn passes(&self, threshold: f64) -> bool {
        self.overall_score >= threshold
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Runs the comprehensive analysis over a text.
///
/// Holds only an immutable catalog, so one instance can be shared across
/// threads and reused for any number of texts.
#[derive(Debug, Clone)]
pub struct BiasAnalyzer {
    catalog: Arc<PatternCatalog>,
}

impl Default for BiasAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl BiasAnalyzer {
    /// Create an analyzer over the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(PatternCatalog::builtin().clone()),
        }
    }

    /// Use a different catalog.
    pub fn with_catalog(mut self, catalog: PatternCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Analyze a text.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let matches = detect(text, &self.catalog);
        debug!(
            bytes = text.len(),
            matches = matches.len(),
            "detection pass complete"
        );

        let findings: Vec<BiasFinding> = matches
            .into_iter()
            .map(|m| evaluate(m, text))
            .collect();

        let overall_score = score::overall_score(&findings, text);
        let summary = score::summarize(&findings);
        let recommendations = recommend::recommend(&findings);

        debug!(
            score = overall_score,
            findings = findings.len(),
            "analysis complete"
        );

        AnalysisResult {
            overall_score,
            findings,
            summary,
            recommendations,
        }
    }
}

/// Attach severity, confidence and remediation text to a raw match.
fn evaluate(m: Match, text: &str) -> BiasFinding {
    let severity = severity::classify(&m.matched_text, m.bias_type);
    let confidence = confidence::score(&m.matched_text, m.start, text);
    let (explanation, suggestions) = explain::explain(&m.matched_text, m.bias_type);

    BiasFinding {
        span: m,
        severity,
        confidence,
        explanation,
        suggestions,
    }
}
