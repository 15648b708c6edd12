//! Classifier configuration.
//!
//! A [`ClassifierConfig`] is stored inside every snapshot so a restored
//! classifier keeps its removal policies and knows which analyzer to rebuild
//! when the caller does not supply one.
//!
//! # Examples
//!
//! ```
//! use falx::config::{AnalyzerKind, ClassifierConfig};
//! use falx::removal::RetractionPolicy;
//!
//! let config: ClassifierConfig =
//!     serde_json::from_str(r#"{"retraction": "unreferenced", "analyzer": "simple"}"#).unwrap();
//!
//! assert_eq!(config.retraction, RetractionPolicy::Unreferenced);
//! assert_eq!(config.analyzer, AnalyzerKind::Simple);
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, EnglishAnalyzer, SimpleAnalyzer, WhitespaceAnalyzer};
use crate::error::{FalxError, Result};
use crate::removal::{DocumentRemover, RetractionPolicy, RollbackPolicy};

/// Built-in analyzers a configuration can name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// Lowercase, split on non-word characters, drop stop words, Porter-stem.
    #[default]
    English,
    /// Unicode words, lowercased.
    Simple,
    /// Whitespace-separated, lowercased.
    Whitespace,
}

impl AnalyzerKind {
    /// Build a new analyzer of this kind.
    pub fn build(self) -> Result<Arc<dyn Analyzer>> {
        let analyzer: Arc<dyn Analyzer> = match self {
            AnalyzerKind::English => Arc::new(EnglishAnalyzer::new()?),
            AnalyzerKind::Simple => Arc::new(SimpleAnalyzer::new()),
            AnalyzerKind::Whitespace => Arc::new(WhitespaceAnalyzer::new()),
        };
        Ok(analyzer)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnalyzerKind::English => "english",
            AnalyzerKind::Simple => "simple",
            AnalyzerKind::Whitespace => "whitespace",
        }
    }
}

/// Settings of a [`TextClassifier`](crate::classifier::TextClassifier).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Which tokens a removal retracts from the vocabulary.
    pub retraction: RetractionPolicy,
    /// Whether an unmatched removal still rolls back counts.
    pub rollback: RollbackPolicy,
    /// Analyzer rebuilt on restore when none is given.
    pub analyzer: AnalyzerKind,
}

impl ClassifierConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ClassifierConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configured analyzer can be built.
    pub fn validate(&self) -> Result<()> {
        self.analyzer.build().map(|_| ()).map_err(|e| {
            FalxError::config(format!(
                "analyzer '{}' cannot be built: {e}",
                self.analyzer.as_str()
            ))
        })
    }

    /// The remover these policies describe.
    pub fn remover(&self) -> DocumentRemover {
        DocumentRemover::new(self.retraction, self.rollback)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClassifierConfig::default();

        assert_eq!(config.retraction, RetractionPolicy::Aggressive);
        assert_eq!(config.rollback, RollbackPolicy::Unconditional);
        assert_eq!(config.analyzer, AnalyzerKind::English);
        assert_eq!(config.remover(), DocumentRemover::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClassifierConfig = serde_json::from_str(r#"{"rollback": "match_only"}"#).unwrap();

        assert_eq!(config.rollback, RollbackPolicy::MatchOnly);
        assert_eq!(config.retraction, RetractionPolicy::Aggressive);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"analyzer": "whitespace"}}"#).unwrap();

        let config = ClassifierConfig::from_file(file.path()).unwrap();
        assert_eq!(config.analyzer, AnalyzerKind::Whitespace);
    }

    #[test]
    fn test_from_file_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"analyzer": "klingon"}}"#).unwrap();
        assert!(matches!(
            ClassifierConfig::from_file(file.path()),
            Err(FalxError::Json(_))
        ));

        let missing = ClassifierConfig::from_file("/nonexistent/falx.json");
        assert!(matches!(missing, Err(FalxError::Io(_))));
    }

    #[test]
    fn test_build_every_analyzer() {
        for kind in [AnalyzerKind::English, AnalyzerKind::Simple, AnalyzerKind::Whitespace] {
            let analyzer = kind.build().unwrap();
            assert_eq!(analyzer.name(), kind.as_str());
            assert!(!analyzer.terms("Cheap Watches").unwrap().is_empty());
        }

        let analyzer = AnalyzerKind::Whitespace.build().unwrap();
        assert_eq!(analyzer.terms("Buy NOW").unwrap(), vec!["buy", "now"]);
    }
}
