//! Detection of bias markers in text.

mod catalog;
mod confidence;
mod detector;
mod explain;
pub mod matcher;
mod runner;
mod severity;
mod types;

pub use catalog::{PatternCatalog, PatternRule};
pub use confidence::score as score_confidence;
pub use detector::detect;
pub use explain::{explain, explanation, suggestions};
pub use matcher::{FollowedByMatcher, RegexMatcher, TextMatcher};
pub use runner::{AnalysisResult, BiasAnalyzer};
pub use severity::classify as classify_severity;
pub use types::{BiasCategory, BiasFinding, BiasType, Match, Severity};
