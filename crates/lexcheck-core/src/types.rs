//! Core types for lexcheck

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document category produced by classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Document appears legitimate under the configured jurisdiction
    Legal,
    /// Document shows signs of forgery, fraud or other illegality
    Illegal,
    /// Too little evidence to classify
    Unknown,
}

impl Label {
    /// Lowercase wire name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Illegal => "illegal",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legal" => Ok(Self::Legal),
            "illegal" => Ok(Self::Illegal),
            "unknown" => Ok(Self::Unknown),
            other => Err(crate::Error::config(format!("unknown label '{}'", other))),
        }
    }
}

/// Which tier of the classifier produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Input was empty or below the minimum length
    InsufficientInput,
    /// A strong-signal gate fired and keyword scoring decided
    RuleBased,
    /// The statistical model decided
    Statistical,
    /// The statistical model was unavailable or failed; keyword scoring decided
    StatisticalFallback,
}

impl Route {
    /// Metric/log friendly name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsufficientInput => "insufficient_input",
            Self::RuleBased => "rule_based",
            Self::Statistical => "statistical",
            Self::StatisticalFallback => "statistical_fallback",
        }
    }
}

/// Result of classifying one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Classification label
    pub label: Label,

    /// Confidence as a percentage (0.0-100.0)
    pub confidence: f64,

    /// Tier that produced the result
    pub route: Route,
}

impl ClassificationResult {
    /// Create a new classification result, clamping confidence into 0-100
    pub fn new(label: Label, confidence: f64, route: Route) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            label,
            confidence,
            route,
        }
    }

    /// The "unknown"/0.0 sentinel returned for missing or too-short input
    pub fn insufficient() -> Self {
        Self::new(Label::Unknown, 0.0, Route::InsufficientInput)
    }
}

/// One detected compliance rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    /// Rule family that was violated
    pub category: String,

    /// Offending excerpt, verbatim from the input text
    pub text: String,

    /// Human-readable explanation
    pub description: String,

    /// Suggested remediation
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serde_is_lowercase() {
        let json = serde_json::to_string(&Label::Illegal).unwrap();
        assert_eq!(json, "\"illegal\"");

        let label: Label = serde_json::from_str("\"legal\"").unwrap();
        assert_eq!(label, Label::Legal);
    }

    #[test]
    fn test_label_from_str() {
        assert_eq!("LEGAL".parse::<Label>().unwrap(), Label::Legal);
        assert_eq!(" unknown ".parse::<Label>().unwrap(), Label::Unknown);
        assert!("maybe".parse::<Label>().is_err());
    }

    #[test]
    fn test_confidence_is_clamped() {
        let result = ClassificationResult::new(Label::Legal, 140.0, Route::RuleBased);
        assert_eq!(result.confidence, 100.0);

        let result = ClassificationResult::new(Label::Illegal, -3.0, Route::RuleBased);
        assert_eq!(result.confidence, 0.0);

        let result = ClassificationResult::new(Label::Legal, f64::NAN, Route::Statistical);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_insufficient_sentinel() {
        let result = ClassificationResult::insufficient();
        assert_eq!(result.label, Label::Unknown);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.route, Route::InsufficientInput);
    }

    #[test]
    fn test_result_serialization() {
        let result = ClassificationResult::new(Label::Legal, 70.0, Route::RuleBased);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["label"], "legal");
        assert_eq!(json["confidence"], 70.0);
        assert_eq!(json["route"], "rule_based");
    }
}
