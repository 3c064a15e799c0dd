//! Biascheck - inclusive language analysis for prose.
//!
//! Biascheck scans text for language that may signal bias (gender, racial,
//! age, disability, socioeconomic and religious), scores each finding, and
//! produces a 0-100 fairness score with remediation guidance.
//!
//! # Architecture
//!
//! - `detect`: pattern catalog, matcher, and the per-finding pipeline
//!   (severity, confidence, explanations)
//! - `score`: overall score and summary aggregation
//! - `recommend`: document-level recommendations
//! - `quick`: reduced low-latency scan with its own pattern list
//! - `batch`: request validation and parallel batch analysis
//! - `config`: YAML configuration schema
//! - `report`: output formatting (pretty, JSON)
//!
//! # Example
//!
//! ```
//! use biascheck::BiasAnalyzer;
//!
//! let result = BiasAnalyzer::new().analyze("We need more manpower.");
//! assert_eq!(result.findings.len(), 1);
//! assert!(result.overall_score < 100.0);
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod quick;
pub mod recommend;
pub mod report;
pub mod score;

pub use batch::{run_batch, BatchOutcome, BatchStats};
pub use config::{AnalysisType, Config};
pub use detect::{AnalysisResult, BiasAnalyzer, BiasFinding, BiasType, PatternCatalog, Severity};
pub use error::InputError;
pub use quick::{quick_scan, QuickScanResult, RiskLevel};
pub use score::Summary;
