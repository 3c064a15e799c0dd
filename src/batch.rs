//! Input validation and batch orchestration.
//!
//! Everything here runs outside the analysis engine: requests are validated
//! as a whole before any text is analyzed, then documents are analyzed in
//! parallel. Results keep the input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::Limits;
use crate::detect::{AnalysisResult, BiasAnalyzer};
use crate::error::InputError;

/// Validate a single text for comprehensive analysis.
pub fn validate_content(text: &str, limits: &Limits) -> Result<(), InputError> {
    check_length(text, limits.max_content_chars)
}

/// Validate a single text for a quick scan.
pub fn validate_quick(text: &str, limits: &Limits) -> Result<(), InputError> {
    check_length(text, limits.max_quick_chars)
}

fn check_length(text: &str, limit: usize) -> Result<(), InputError> {
    if text.is_empty() {
        return Err(InputError::EmptyContent);
    }
    let actual = text.chars().count();
    if actual > limit {
        return Err(InputError::ContentTooLong { limit, actual });
    }
    Ok(())
}

/// Validate a JSON batch request and extract its texts.
///
/// The whole batch is rejected on the first invalid entry.
pub fn parse_batch(value: &Value, limits: &Limits) -> Result<Vec<String>, InputError> {
    let items = value.as_array().ok_or(InputError::NotAnArray)?;
    validate_batch_size(items.len(), limits)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let text = item.as_str().ok_or(InputError::ItemNotString { index })?;
            if text.chars().count() > limits.max_content_chars {
                return Err(InputError::ItemTooLong {
                    index,
                    limit: limits.max_content_chars,
                });
            }
            Ok(text.to_string())
        })
        .collect()
}

/// Validate already-typed batch texts.
pub fn validate_batch(texts: &[String], limits: &Limits) -> Result<(), InputError> {
    validate_batch_size(texts.len(), limits)?;
    for (index, text) in texts.iter().enumerate() {
        if text.chars().count() > limits.max_content_chars {
            return Err(InputError::ItemTooLong {
                index,
                limit: limits.max_content_chars,
            });
        }
    }
    Ok(())
}

fn validate_batch_size(len: usize, limits: &Limits) -> Result<(), InputError> {
    if len > limits.max_batch_size {
        return Err(InputError::BatchTooLarge {
            limit: limits.max_batch_size,
            actual: len,
        });
    }
    Ok(())
}

/// Outcome for one document of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub index: usize,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregates over a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    pub total_documents: usize,
    pub successful: usize,
    pub failed: usize,
    /// Mean overall score of successful documents, 0 when there are none.
    pub average_bias_score: f64,
    pub total_biases_found: usize,
    pub processing_time_ms: u64,
}

/// Results of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub results: Vec<BatchItem>,
    pub aggregate_stats: BatchStats,
}

impl BatchOutcome {
    /// Successful results, in input order.
    pub fn successes(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter().filter_map(|r| r.result.as_ref())
    }
}

/// Analyze texts in parallel.
///
/// Callers validate the batch first. A panic while analyzing one document is
/// recorded as a failure for that document only.
pub fn run_batch(analyzer: &BiasAnalyzer, texts: &[String]) -> BatchOutcome {
    let start = Instant::now();
    info!(documents = texts.len(), "starting batch analysis");

    let results: Vec<BatchItem> = texts
        .par_iter()
        .enumerate()
        .map(|(index, text)| analyze_item(analyzer, index, text))
        .collect();

    let aggregate_stats = aggregate(&results, start.elapsed().as_millis() as u64);
    info!(
        successful = aggregate_stats.successful,
        failed = aggregate_stats.failed,
        ms = aggregate_stats.processing_time_ms,
        "batch analysis complete"
    );

    BatchOutcome {
        results,
        aggregate_stats,
    }
}

fn analyze_item(analyzer: &BiasAnalyzer, index: usize, text: &str) -> BatchItem {
    match panic::catch_unwind(AssertUnwindSafe(|| analyzer.analyze(text))) {
        Ok(result) => BatchItem {
            index,
            success: true,
            result: Some(result),
            error: None,
        },
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown error".to_string());
            warn!(index, %reason, "document analysis failed");
            BatchItem {
                index,
                success: false,
                result: None,
                error: Some(format!("analysis failed for document {}: {}", index, reason)),
            }
        }
    }
}

/// Compute batch-level statistics from per-document outcomes.
pub fn aggregate(results: &[BatchItem], processing_time_ms: u64) -> BatchStats {
    let scores: Vec<&AnalysisResult> = results.iter().filter_map(|r| r.result.as_ref()).collect();
    let successful = scores.len();

    let average_bias_score = if successful > 0 {
        scores.iter().map(|r| r.overall_score).sum::<f64>() / successful as f64
    } else {
        0.0
    };

    BatchStats {
        total_documents: results.len(),
        successful,
        failed: results.len() - successful,
        average_bias_score,
        total_biases_found: scores.iter().map(|r| r.summary.total_biases_detected).sum(),
        processing_time_ms,
    }
}
