//! Output formatting for biascheck results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the result plus request metadata, in the wire format used by
//!   the web dashboard

use chrono::{DateTime, Utc};
use colored::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::batch::BatchOutcome;
use crate::config::AnalysisType;
use crate::detect::{AnalysisResult, Severity};
use crate::quick::{self, QuickScanResult, RiskLevel};

// =============================================================================
// JSON Format
// =============================================================================

/// Request metadata attached to every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    pub analysis_type: AnalysisType,
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_type: Option<String>,
    pub version: String,
}

impl Metadata {
    fn new(analysis_type: AnalysisType, elapsed: Duration) -> Self {
        Self {
            content_length: None,
            word_count: None,
            analysis_type,
            processing_time_ms: elapsed.as_millis() as u64,
            timestamp: Utc::now(),
            scan_type: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Metadata for a single analyzed text.
    pub fn for_text(text: &str, analysis_type: AnalysisType, elapsed: Duration) -> Self {
        Self {
            content_length: Some(text.chars().count()),
            word_count: Some(quick::word_count(text)),
            ..Self::new(analysis_type, elapsed)
        }
    }
}

/// JSON report for a comprehensive analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub metadata: Metadata,
}

impl AnalysisReport {
    pub fn new(
        text: &str,
        result: AnalysisResult,
        analysis_type: AnalysisType,
        elapsed: Duration,
    ) -> Self {
        Self {
            result,
            metadata: Metadata::for_text(text, analysis_type, elapsed),
        }
    }
}

/// JSON report for a quick scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickReport {
    #[serde(flatten)]
    pub result: QuickScanResult,
    pub metadata: Metadata,
}

impl QuickReport {
    pub fn new(text: &str, result: QuickScanResult, elapsed: Duration) -> Self {
        let mut metadata = Metadata::for_text(text, AnalysisType::Quick, elapsed);
        metadata.word_count = Some(result.word_count);
        metadata.scan_type = Some("quick".to_string());
        Self { result, metadata }
    }
}

/// JSON report for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    #[serde(flatten)]
    pub outcome: BatchOutcome,
    pub metadata: Metadata,
}

impl BatchReport {
    pub fn new(outcome: BatchOutcome, analysis_type: AnalysisType, elapsed: Duration) -> Self {
        Self {
            outcome,
            metadata: Metadata::new(analysis_type, elapsed),
        }
    }
}

/// Serialize a report as pretty-printed JSON.
pub fn to_json<T: Serialize>(report: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write a report to stdout as JSON.
pub fn write_json<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", to_json(report)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

fn write_header(source: &str) {
    println!();
    print!("  ");
    print!("{}", "biascheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", "Scanning: ".dimmed());
    println!("{}", source);
    println!();
}

/// Write a comprehensive analysis in human-readable form.
pub fn write_pretty(source: &str, report: &AnalysisReport, threshold: f64) {
    let result = &report.result;
    write_header(source);

    let passed = result.passes(threshold);
    if passed {
        print!("  {}", "✓ PASS".green());
    } else {
        print!("  {}", "✗ FAIL".red());
    }
    print!("  Fairness: ");
    write_colored_score(result.overall_score);
    let metadata = &report.metadata;
    let timing = format!(
        "({} words, {} ms)",
        metadata.word_count.unwrap_or(0),
        metadata.processing_time_ms
    );
    println!("  {}", timing.dimmed());
    println!();

    if !result.findings.is_empty() {
        println!("  {} ({}):", "Findings".bold(), result.findings.len());
        println!();
        for f in &result.findings {
            write_severity_tag(f.severity);
            print!("{:<16}", f.bias_type().as_str().dimmed());
            print!("{}", format!("{:?}", f.matched_text()).blue());
            println!(
                "{}",
                format!("  @{}  confidence {:.2}", f.span.start, f.confidence).dimmed()
            );
            println!("            {}", f.explanation);
            if !f.suggestions.is_empty() {
                println!(
                    "            {} {}",
                    "try:".dimmed(),
                    f.suggestions.join(", ")
                );
            }
            println!();
        }

        write_breakdown(result);
        println!();
    }

    println!("  {}", "Recommendations:".bold());
    for r in &result.recommendations {
        println!("    - {}", r);
    }
    println!();

    print!("  {}", format!("Threshold: {}", threshold).dimmed());
    print!("  Score: ");
    write_colored_score(result.overall_score);
    print!("  ");
    if passed {
        print!("{}", "PASSED".green());
    } else {
        print!("{}", "FAILED".red());
    }
    println!();
    println!();
}

/// Write a quick scan in human-readable form.
pub fn write_pretty_quick(source: &str, report: &QuickReport) {
    let result = &report.result;
    write_header(source);

    print!("  Risk: ");
    write_colored_risk(result.overall_risk);
    print!("  Bias score: ");
    println!("{:.1}", result.bias_score);
    println!(
        "  {}",
        format!(
            "{} issues in {} words ({:.2} per 100 words)",
            result.detected_issues.len(),
            result.word_count,
            result.risk_ratio
        )
        .dimmed()
    );
    println!();

    let stats = &result.quick_stats;
    println!("  {}", "Terms:".bold());
    println!("    {:<12} {:>3}", "gender", stats.gender_terms);
    println!("    {:<12} {:>3}", "racial", stats.racial_terms);
    println!("    {:<12} {:>3}", "age", stats.age_terms);
    println!("    {:<12} {:>3}", "disability", stats.disability_terms);
    println!();

    for issue in &result.detected_issues {
        println!(
            "    {:<12} {}",
            issue.bias_type.as_str().dimmed(),
            issue.term.blue()
        );
    }
    if !result.detected_issues.is_empty() {
        println!();
    }
}

/// Write a batch run in human-readable form.
pub fn write_pretty_batch(source: &str, report: &BatchReport, threshold: f64) {
    let outcome = &report.outcome;
    write_header(source);

    for item in &outcome.results {
        print!("    {:>4}  ", format!("#{}", item.index).dimmed());
        match &item.result {
            Some(result) => {
                write_colored_score(result.overall_score);
                print!("  {} findings", result.summary.total_biases_detected);
                if !result.passes(threshold) {
                    print!("  {}", "below threshold".red());
                }
                println!();
            }
            None => println!(
                "{}",
                item.error.as_deref().unwrap_or("analysis failed").red()
            ),
        }
    }
    println!();

    let stats = &outcome.aggregate_stats;
    println!("  {}", "Batch:".bold());
    println!(
        "    {} documents, {} successful, {} failed",
        stats.total_documents, stats.successful, stats.failed
    );
    print!("    Average score: ");
    write_colored_score(stats.average_bias_score);
    println!();
    println!(
        "    Total findings: {}  {}",
        stats.total_biases_found,
        format!("({} ms)", stats.processing_time_ms).dimmed()
    );
    println!();
}

fn write_breakdown(result: &AnalysisResult) {
    println!("  {}", "Breakdown:".bold());
    let severities = &result.summary.severity_breakdown;
    for sev in Severity::ALL.iter().rev() {
        println!("    {:<12} {:>3}", sev.as_str(), severities.get(*sev));
    }
    for (bias_type, count) in &result.summary.type_breakdown {
        let plural = if *count != 1 { "s" } else { "" };
        println!(
            "    {:<20} {} finding{}",
            bias_type.as_str(),
            count,
            plural
        );
    }
}

fn write_colored_score(s: f64) {
    let text = format!("{:.1}", s);
    match s {
        s if s >= 90.0 => print!("{}", text.green().bold()),
        s if s >= 75.0 => print!("{}", text.green()),
        s if s >= 50.0 => print!("{}", text.yellow()),
        s if s >= 25.0 => print!("{}", text.yellow().bold()),
        _ => print!("{}", text.red()),
    }
}

fn write_colored_risk(risk: RiskLevel) {
    match risk {
        RiskLevel::Low => print!("{}", "low".green()),
        RiskLevel::Medium => print!("{}", "medium".yellow()),
        RiskLevel::High => print!("{}", "high".red()),
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Critical => print!("    {} ", "CRIT".red().bold()),
        Severity::High => print!("    {} ", "HIGH".red()),
        Severity::Medium => print!("    {} ", "MED ".yellow()),
        Severity::Low => print!("    {} ", "LOW ".blue()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::BiasAnalyzer;

    #[test]
    fn test_analysis_report_json_shape() {
        let text = "Our team needs more manpower.";
        let result = BiasAnalyzer::new().analyze(text);
        let report =
            AnalysisReport::new(text, result, AnalysisType::Hiring, Duration::from_millis(3));
        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert!(json["overallScore"].is_number());
        assert_eq!(json["findings"][0]["matchedText"], "manpower");
        assert_eq!(json["summary"]["totalBiasesDetected"], 1);
        assert_eq!(json["metadata"]["analysisType"], "hiring");
        assert_eq!(json["metadata"]["contentLength"], 29);
        assert_eq!(json["metadata"]["wordCount"], 5);
        assert_eq!(json["metadata"]["processingTimeMs"], 3);
        assert!(json["metadata"].get("scanType").is_none());
    }

    #[test]
    fn test_quick_report_json_shape() {
        let text = "She is articulate";
        let report = QuickReport::new(text, quick::quick_scan(text), Duration::ZERO);
        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert_eq!(json["quickStats"]["genderTerms"], 1);
        assert_eq!(json["detectedIssues"][0]["type"], "gender");
        assert_eq!(json["detectedIssues"][0]["severity"], "medium");
        assert_eq!(json["metadata"]["scanType"], "quick");
        assert_eq!(json["metadata"]["analysisType"], "quick");
    }

    #[test]
    fn test_metadata_timestamp_is_rfc3339() {
        let metadata = Metadata::for_text("x", AnalysisType::Comprehensive, Duration::ZERO);
        let json = serde_json::to_value(&metadata).unwrap();
        let ts = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
