//! Rule catalogue and rule definitions

use lexcheck_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Trigger;

const INDIA_CATALOGUE: &str = include_str!("../catalogues/india.yaml");

/// A complete catalogue of compliance rules, evaluated in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCatalogue {
    /// Catalogue name
    pub name: String,

    /// Description of what this catalogue checks
    #[serde(default)]
    pub description: String,

    /// Jurisdiction the rules apply to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,

    /// Version of the catalogue
    #[serde(default)]
    pub version: String,

    /// Rules in evaluation order
    pub rules: Vec<ComplianceRule>,
}

impl RuleCatalogue {
    /// Load a catalogue from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a catalogue from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::compliance(format!(
                "Failed to read catalogue {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// The built-in catalogue for Indian documents
    pub fn india() -> Result<Self> {
        Self::from_yaml(INDIA_CATALOGUE)
    }

    /// Check that every rule has a category, a trigger pattern, a
    /// description and a recommendation, and that every trigger compiles
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::compliance("Catalogue name must not be empty"));
        }

        for (index, rule) in self.rules.iter().enumerate() {
            rule.validate().map_err(|e| {
                Error::compliance(format!(
                    "Rule {} ({:?}) in catalogue {}: {}",
                    index, rule.category, self.name, e
                ))
            })?;
        }

        Ok(())
    }

    /// Rules that take part in analysis
    pub fn enabled_rules(&self) -> impl Iterator<Item = &ComplianceRule> {
        self.rules.iter().filter(|r| r.enabled)
    }
}

/// A single rule within a catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRule {
    /// Rule family reported on each issue
    pub category: String,

    /// Explanation template; `{match}` is replaced with the excerpt
    pub description: String,

    /// Remediation template; `{match}` is replaced with the excerpt
    pub recommendation: String,

    /// Trigger conditions
    pub trigger: Trigger,

    /// Specific regulation this rule maps to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<String>,

    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl ComplianceRule {
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("category", &self.category),
            ("description", &self.description),
            ("recommendation", &self.recommendation),
        ] {
            if value.trim().is_empty() {
                return Err(Error::compliance(format!("{} must not be empty", field)));
            }
        }

        if self.trigger.is_empty() {
            return Err(Error::compliance("trigger pattern must not be empty"));
        }

        self.trigger.compile().map(|_| ())
    }
}
