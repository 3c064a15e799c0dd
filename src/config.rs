//! Configuration schema for biascheck.
//!
//! A config file sets input limits, the minimum acceptable score and the
//! label attached to analysis reports. Every field is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file names to search for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["biascheck.yaml", ".biascheck.yaml"];

/// Default minimum acceptable overall score.
pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub name: String,
    /// Label recorded in report metadata.
    #[serde(default)]
    pub analysis_type: AnalysisType,
    /// Minimum acceptable overall score (0-100).
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub batch: BatchConfig,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: String::new(),
            name: String::new(),
            analysis_type: AnalysisType::default(),
            threshold: DEFAULT_THRESHOLD,
            limits: Limits::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config at `path`, or discover one, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let found = match path {
            Some(p) => Some(p.to_path_buf()),
            None => discover(),
        };
        match found {
            Some(p) => {
                let config = Self::parse_file(&p)
                    .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?;
                validate(&config)?;
                Ok((config, Some(p)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Returns whether a file extension is included in batch directory scans.
    pub fn is_batch_extension(&self, ext: &str) -> bool {
        self.batch.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Input size limits enforced before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Limits {
    /// Maximum characters for a comprehensive analysis (default: 50000)
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    /// Maximum characters for a quick scan (default: 10000)
    #[serde(default = "default_max_quick_chars")]
    pub max_quick_chars: usize,
    /// Maximum documents per batch (default: 100)
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_max_content_chars() -> usize {
    50_000
}

fn default_max_quick_chars() -> usize {
    10_000
}

fn default_max_batch_size() -> usize {
    100
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_content_chars: default_max_content_chars(),
            max_quick_chars: default_max_quick_chars(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// Configuration for batch directory scans.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// File extensions to collect when the batch input is a directory.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["txt".to_string(), "md".to_string()]
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

/// Label describing what kind of content is being analyzed.
///
/// Recorded in report metadata only; scoring is the same for every type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    Comprehensive,
    Hiring,
    Marketing,
    Legal,
    Academic,
    Quick,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 6] = [
        AnalysisType::Comprehensive,
        AnalysisType::Hiring,
        AnalysisType::Marketing,
        AnalysisType::Legal,
        AnalysisType::Academic,
        AnalysisType::Quick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Comprehensive => "comprehensive",
            AnalysisType::Hiring => "hiring",
            AnalysisType::Marketing => "marketing",
            AnalysisType::Legal => "legal",
            AnalysisType::Academic => "academic",
            AnalysisType::Quick => "quick",
        }
    }
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("unknown analysis type: {}", s))
    }
}

/// Find a config file in the working directory, then in the user config dir.
pub fn discover() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }
    user_config_path().filter(|p| p.exists())
}

/// Path of the per-user config file, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "zen-systems", "biascheck")
        .map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_NAMES[0]))
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if !(0.0..=100.0).contains(&config.threshold) {
        anyhow::bail!(
            "invalid threshold {}, must be between 0 and 100",
            config.threshold
        );
    }

    let limits = &config.limits;
    if limits.max_content_chars == 0 || limits.max_quick_chars == 0 || limits.max_batch_size == 0 {
        anyhow::bail!("limits must be greater than zero");
    }

    if config.batch.extensions.iter().any(|e| e.is_empty() || e.starts_with('.')) {
        anyhow::bail!("batch extensions must be non-empty and given without a leading dot");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1.0"
name: "Careers site"
analysis_type: hiring
threshold: 85
limits:
  max_quick_chars: 2000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "Careers site");
        assert_eq!(config.analysis_type, AnalysisType::Hiring);
        assert_eq!(config.threshold, 85.0);
        assert_eq!(config.limits.max_quick_chars, 2000);
        assert_eq!(config.limits.max_content_chars, 50_000);
        assert_eq!(config.limits.max_batch_size, 100);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.analysis_type, AnalysisType::Comprehensive);
        assert!(config.is_batch_extension("TXT"));
        assert!(config.is_batch_extension("md"));
        assert!(!config.is_batch_extension("rs"));
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let config = Config {
            threshold: 120.0,
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.limits.max_batch_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let mut config = Config::default();
        config.batch.extensions = vec![".txt".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_analysis_type_from_str() {
        assert_eq!("Legal".parse::<AnalysisType>(), Ok(AnalysisType::Legal));
        assert!("poetry".parse::<AnalysisType>().is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("biascheck.yaml");
        std::fs::write(&path, "threshold: 90\n").unwrap();

        let (config, found) = Config::load(Some(&path)).unwrap();
        assert_eq!(config.threshold, 90.0);
        assert_eq!(found.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("biascheck.yaml");
        std::fs::write(&path, "threshold: -5\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
