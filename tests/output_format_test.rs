//! Tests for the JSON wire format and batch handling.
//!
//! These tests verify that reports serialize with the camelCase field names
//! the web dashboard reads, and that batch requests are validated as a
//! whole before analysis.

use std::path::PathBuf;
use std::time::Duration;

use biascheck::batch::{self, BatchItem};
use biascheck::config::{AnalysisType, Config, Limits};
use biascheck::quick::quick_scan;
use biascheck::report::{self, AnalysisReport, BatchReport, QuickReport};
use biascheck::{BiasAnalyzer, InputError};
use serde_json::{json, Value};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn to_value<T: serde::Serialize>(report: &T) -> Value {
    serde_json::from_str(&report::to_json(report).expect("should serialize")).unwrap()
}

#[test]
fn test_analysis_report_fields() {
    let text = std::fs::read_to_string(testdata_path().join("biased.txt")).unwrap();
    let result = BiasAnalyzer::new().analyze(&text);
    let report =
        AnalysisReport::new(&text, result, AnalysisType::Hiring, Duration::from_millis(12));
    let json = to_value(&report);

    for key in ["overallScore", "findings", "summary", "recommendations", "metadata"] {
        assert!(json.get(key).is_some(), "missing top-level key {}", key);
    }

    let finding = &json["findings"][0];
    for key in [
        "type",
        "category",
        "start",
        "end",
        "matchedText",
        "severity",
        "confidence",
        "explanation",
        "suggestions",
    ] {
        assert!(finding.get(key).is_some(), "missing finding key {}", key);
    }
    assert_eq!(finding["type"], "gender");
    assert_eq!(finding["category"], "language");

    let summary = &json["summary"];
    let severities = summary["severityBreakdown"].as_object().unwrap();
    assert_eq!(severities.len(), 4);
    for key in ["low", "medium", "high", "critical"] {
        assert!(severities.contains_key(key));
    }
    assert_eq!(summary["categoryBreakdown"]["language"], summary["totalBiasesDetected"]);
    assert_eq!(summary["typeBreakdown"]["age"], 3);

    let metadata = &json["metadata"];
    assert_eq!(metadata["analysisType"], "hiring");
    assert_eq!(metadata["processingTimeMs"], 12);
    assert_eq!(metadata["contentLength"], text.chars().count());
    assert_eq!(metadata["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_analysis_report_round_trips() {
    let text = "We need more manpower.";
    let result = BiasAnalyzer::new().analyze(text);
    let report =
        AnalysisReport::new(text, result.clone(), AnalysisType::Comprehensive, Duration::ZERO);

    let parsed: AnalysisReport = serde_json::from_str(&report::to_json(&report).unwrap()).unwrap();
    assert_eq!(parsed.result.findings.len(), 1);
    assert_eq!(parsed.result.findings[0].matched_text(), "manpower");
    assert_eq!(parsed.result.summary, result.summary);
    assert_eq!(parsed.result.recommendations, result.recommendations);
    assert!((parsed.result.overall_score - result.overall_score).abs() < 1e-9);
    assert_eq!(parsed.metadata.word_count, Some(4));
}

#[test]
fn test_quick_report_fields() {
    let text = "Hey guys, any boomer can do this.";
    let report = QuickReport::new(text, quick_scan(text), Duration::ZERO);
    let json = to_value(&report);

    assert_eq!(json["overallRisk"], "high");
    assert_eq!(json["quickStats"]["genderTerms"], 1);
    assert_eq!(json["quickStats"]["ageTerms"], 1);
    assert_eq!(json["wordCount"], 7);
    assert_eq!(json["metadata"]["wordCount"], 7);
    assert_eq!(json["metadata"]["scanType"], "quick");

    let terms: Vec<&str> = json["detectedIssues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["term"].as_str().unwrap())
        .collect();
    assert_eq!(terms, vec!["guys", "boomer"]);
}

#[test]
fn test_batch_fixture() {
    let content = std::fs::read_to_string(testdata_path().join("batch.json")).unwrap();
    let value: Value = serde_json::from_str(&content).unwrap();
    let texts = batch::parse_batch(&value, &Limits::default()).unwrap();
    assert_eq!(texts.len(), 3);

    let analyzer = BiasAnalyzer::new();
    let outcome = batch::run_batch(&analyzer, &texts);
    let stats = &outcome.aggregate_stats;
    assert_eq!(stats.total_documents, 3);
    assert_eq!(stats.successful, 3);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.total_biases_found, 1);

    let expected_average = texts
        .iter()
        .map(|t| analyzer.analyze(t).overall_score)
        .sum::<f64>()
        / 3.0;
    assert!((stats.average_bias_score - expected_average).abs() < 1e-9);

    let report = BatchReport::new(outcome, AnalysisType::Marketing, Duration::ZERO);
    let json = to_value(&report);
    assert_eq!(json["results"].as_array().unwrap().len(), 3);
    assert_eq!(json["results"][1]["index"], 1);
    assert_eq!(json["results"][1]["success"], true);
    assert!(json["results"][1].get("error").is_none());
    assert_eq!(json["aggregateStats"]["totalDocuments"], 3);
    assert_eq!(json["metadata"]["analysisType"], "marketing");
    assert!(json["metadata"].get("contentLength").is_none());
}

#[test]
fn test_batch_with_one_malformed_entry_is_rejected() {
    let mut items: Vec<Value> = (0..100)
        .map(|i| json!(format!("Document number {} about our roadmap.", i)))
        .collect();
    items[63] = json!({"text": "nested"});

    let err = batch::parse_batch(&Value::Array(items), &Limits::default()).unwrap_err();
    assert_eq!(err, InputError::ItemNotString { index: 63 });
}

#[test]
fn test_batch_limits_follow_config() {
    let config: Config = serde_yaml::from_str("limits:\n  max_batch_size: 2\n").unwrap();
    let err = batch::parse_batch(&json!(["a", "b", "c"]), &config.limits).unwrap_err();
    assert_eq!(err, InputError::BatchTooLarge { limit: 2, actual: 3 });
}

#[test]
fn test_failed_item_serializes_error() {
    let item = BatchItem {
        index: 4,
        success: false,
        result: None,
        error: Some("analysis failed for document 4: boom".to_string()),
    };
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["success"], false);
    assert!(json.get("result").is_none());
    assert_eq!(json["error"], "analysis failed for document 4: boom");
}

#[test]
fn test_directory_batch_collects_configured_extensions() {
    let corpus = testdata_path().join("corpus");
    let files = biascheck::cli::collect_documents(&corpus, &Config::default()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["clean.txt", "manpower.md"]);
}
