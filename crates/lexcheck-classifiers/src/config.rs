//! Configuration for the classification tiers

use crate::model::{default_seed_corpus, ModelParams, TrainingExample};
use crate::patterns::DEFAULT_OFFICIAL_HEADERS;
use crate::rules::KeywordRuleTable;
use lexcheck_core::{Label, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the classification dispatcher and its tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum trimmed length (in characters) worth classifying
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,

    /// Institutional/judicial header phrases for the header gate
    #[serde(default = "default_official_headers")]
    pub official_headers: Vec<String>,

    /// Weighted keyword tables
    #[serde(default)]
    pub keywords: KeywordRuleTable,

    /// Statistical fallback settings
    #[serde(default)]
    pub model: StatisticalConfig,
}

/// Statistical model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalConfig {
    /// Where the trained artifact lives
    #[serde(default = "default_model_path")]
    pub path: PathBuf,

    /// Vectorizer and smoothing parameters
    #[serde(flatten)]
    pub params: ModelParams,

    /// Corpus used when the artifact is missing or unreadable
    #[serde(default = "default_seed_corpus")]
    pub seed_corpus: Vec<TrainingExample>,
}

impl Default for StatisticalConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            params: ModelParams::default(),
            seed_corpus: default_seed_corpus(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_text_length: default_min_text_length(),
            official_headers: default_official_headers(),
            keywords: KeywordRuleTable::default(),
            model: StatisticalConfig::default(),
        }
    }
}

fn default_min_text_length() -> usize {
    10
}

fn default_official_headers() -> Vec<String> {
    DEFAULT_OFFICIAL_HEADERS.iter().map(|h| h.to_string()).collect()
}

/// `<cache dir>/lexcheck/models/classifier_model.json`
pub fn default_model_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lexcheck")
        .join("models")
        .join("classifier_model.json")
}

impl ClassifierConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Use a different artifact location
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model.path = path.into();
        self
    }

    /// Reject configurations the classifier cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.min_text_length == 0 {
            return Err(lexcheck_core::Error::config(
                "min_text_length must be at least 1",
            ));
        }

        if self.official_headers.iter().all(|h| h.trim().is_empty()) {
            return Err(lexcheck_core::Error::config(
                "official_headers must contain at least one phrase",
            ));
        }

        self.keywords.validate()?;

        let params = &self.model.params;
        let (min_n, max_n) = params.vectorizer.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(lexcheck_core::Error::config(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        if params.vectorizer.max_features == 0 {
            return Err(lexcheck_core::Error::config("max_features must be positive"));
        }
        if !(params.smoothing.is_finite() && params.smoothing > 0.0) {
            return Err(lexcheck_core::Error::config("smoothing must be a positive number"));
        }

        if self
            .model
            .seed_corpus
            .iter()
            .any(|ex| ex.label == Label::Unknown)
        {
            return Err(lexcheck_core::Error::config(
                "seed corpus may only use the labels legal and illegal",
            ));
        }

        Ok(())
    }
}
