//! Core types for detection results.

use serde::{Deserialize, Serialize};

/// Severity levels for findings, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Penalty weight used by the overall score.
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Low => 1.0,
            Severity::Medium => 3.0,
            Severity::High => 7.0,
            Severity::Critical => 15.0,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// The dimension through which a bias manifests.
///
/// Only `Language` is produced by the lexical detector; the other variants
/// exist so results from other detectors share one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasCategory {
    Language,
    Representation,
    Algorithmic,
    Visual,
    Statistical,
}

impl BiasCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasCategory::Language => "language",
            BiasCategory::Representation => "representation",
            BiasCategory::Algorithmic => "algorithmic",
            BiasCategory::Visual => "visual",
            BiasCategory::Statistical => "statistical",
        }
    }
}

impl std::fmt::Display for BiasCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The social dimension a finding relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasType {
    Gender,
    Racial,
    Age,
    Religious,
    Socioeconomic,
    Disability,
    SexualOrientation,
    Cultural,
    Political,
    Appearance,
}

impl BiasType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasType::Gender => "gender",
            BiasType::Racial => "racial",
            BiasType::Age => "age",
            BiasType::Religious => "religious",
            BiasType::Socioeconomic => "socioeconomic",
            BiasType::Disability => "disability",
            BiasType::SexualOrientation => "sexual_orientation",
            BiasType::Cultural => "cultural",
            BiasType::Political => "political",
            BiasType::Appearance => "appearance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gender" => Some(BiasType::Gender),
            "racial" => Some(BiasType::Racial),
            "age" => Some(BiasType::Age),
            "religious" => Some(BiasType::Religious),
            "socioeconomic" => Some(BiasType::Socioeconomic),
            "disability" => Some(BiasType::Disability),
            "sexual_orientation" => Some(BiasType::SexualOrientation),
            "cultural" => Some(BiasType::Cultural),
            "political" => Some(BiasType::Political),
            "appearance" => Some(BiasType::Appearance),
            _ => None,
        }
    }
}

impl std::fmt::Display for BiasType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw detection: where a catalog rule matched in the source text.
///
/// `start` and `end` are byte offsets, so `&text[start..end] == matched_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(rename = "type")]
    pub bias_type: BiasType,
    pub category: BiasCategory,
    pub start: usize,
    pub end: usize,
    pub matched_text: String,
}

/// A match with severity, confidence and remediation text attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasFinding {
    #[serde(flatten)]
    pub span: Match,
    pub severity: Severity,
    /// Always within `[0.0, 0.99]`.
    pub confidence: f64,
    pub explanation: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl BiasFinding {
    pub fn bias_type(&self) -> BiasType {
        self.span.bias_type
    }

    pub fn category(&self) -> BiasCategory {
        self.span.category
    }

    pub fn matched_text(&self) -> &str {
        &self.span.matched_text
    }

    /// Contribution of this finding to the total penalty.
    pub fn penalty(&self) -> f64 {
        self.severity.weight() * self.confidence
    }
}
