//! Compliance analysis engine

use lexcheck_core::{ComplianceIssue, Result};
use regex::Regex;
use tracing::debug;

use crate::{ComplianceRule, RuleCatalogue};

/// Placeholder in description and recommendation templates
pub const MATCH_PLACEHOLDER: &str = "{match}";

/// Scans document text against a compiled rule catalogue
pub struct ComplianceAnalyzer {
    catalogue: String,
    rules: Vec<CompiledRule>,
}

struct CompiledRule {
    category: String,
    description: String,
    recommendation: String,
    regex: Regex,
}

impl CompiledRule {
    fn compile(rule: &ComplianceRule) -> Result<Self> {
        Ok(Self {
            category: rule.category.clone(),
            description: rule.description.clone(),
            recommendation: rule.recommendation.clone(),
            regex: rule.trigger.compile()?,
        })
    }

    fn issue(&self, excerpt: &str) -> ComplianceIssue {
        ComplianceIssue {
            category: self.category.clone(),
            text: excerpt.to_string(),
            description: self.description.replace(MATCH_PLACEHOLDER, excerpt),
            recommendation: self.recommendation.replace(MATCH_PLACEHOLDER, excerpt),
        }
    }
}

impl ComplianceAnalyzer {
    /// Validate and compile a catalogue. Disabled rules are dropped.
    pub fn new(catalogue: &RuleCatalogue) -> Result<Self> {
        catalogue.validate()?;

        let rules = catalogue
            .enabled_rules()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            catalogue = %catalogue.name,
            rules = rules.len(),
            "Compiled compliance catalogue"
        );

        Ok(Self {
            catalogue: catalogue.name.clone(),
            rules,
        })
    }

    /// Analyzer over the built-in Indian catalogue
    pub fn with_default_catalogue() -> Result<Self> {
        Self::new(&RuleCatalogue::india()?)
    }

    /// Name of the catalogue this analyzer was built from
    pub fn catalogue_name(&self) -> &str {
        &self.catalogue
    }

    /// Categories of the active rules, in evaluation order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.category.as_str())
    }

    /// Report every rule match in `raw_text`, one issue per occurrence,
    /// ordered by rule then by position. Excerpts are taken verbatim from
    /// `raw_text`. An empty result means no rule matched.
    pub fn analyze_compliance(&self, raw_text: &str) -> Vec<ComplianceIssue> {
        if raw_text.trim().is_empty() {
            return Vec::new();
        }

        let mut issues = Vec::new();

        for rule in &self.rules {
            let before = issues.len();
            issues.extend(
                rule.regex
                    .find_iter(raw_text)
                    .filter(|m| !m.as_str().is_empty())
                    .map(|m| rule.issue(m.as_str())),
            );

            let found = issues.len() - before;
            if found > 0 {
                metrics::counter!(
                    "lexcheck_compliance_issues_total",
                    "category" => rule.category.clone()
                )
                .increment(found as u64);
            }
        }

        debug!(
            catalogue = %self.catalogue,
            issues = issues.len(),
            "Compliance analysis complete"
        );
        issues
    }
}
