//! Application configuration

use anyhow::Context;
use lexcheck_classifiers::{ClassifierConfig, DocumentClassifier};
use lexcheck_compliance::{ComplianceAnalyzer, RuleCatalogue};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::Cli;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Compliance catalogue path; the built-in catalogue when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalogue: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &Path, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", config_path.display()))?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(model) = &cli.model {
            config.classifier.model.path = model.clone();
        }

        if let Some(catalogue) = &cli.catalogue {
            config.catalogue = Some(catalogue.clone());
        }

        config
            .classifier
            .validate()
            .context("Invalid classifier configuration")?;
        Ok(config)
    }

    pub fn classifier(&self) -> anyhow::Result<DocumentClassifier> {
        DocumentClassifier::from_config(&self.classifier).context("Failed to build classifier")
    }

    pub fn analyzer(&self) -> anyhow::Result<ComplianceAnalyzer> {
        let catalogue = match &self.catalogue {
            Some(path) => RuleCatalogue::from_file(path)
                .with_context(|| format!("Failed to load catalogue {}", path.display()))?,
            None => RuleCatalogue::india()?,
        };
        let analyzer = ComplianceAnalyzer::new(&catalogue).context("Invalid compliance catalogue")?;

        debug!(
            catalogue = analyzer.catalogue_name(),
            rules = analyzer.categories().count(),
            "Loaded compliance catalogue"
        );
        Ok(analyzer)
    }
}
