//! Weighted keyword scoring (Tier A)
//!
//! Sums fixed weights for every legal-signal and illegal-signal phrase
//! present in the normalized text and turns the two scores into a label
//! and a heuristic confidence. Presence is counted once per phrase, not
//! per occurrence.

use crate::classifier::{Classifier, ClassifierTier};
use aho_corasick::AhoCorasick;
use lexcheck_core::{normalize, ClassificationResult, Label, NormalizedText, Result, Route};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;

/// Confidence cap for one-sided evidence
pub const MAX_RULE_CONFIDENCE: f64 = 95.0;

/// Confidence used when both or neither side matched
pub const AMBIGUOUS_CONFIDENCE: f64 = 70.0;

/// Two disjoint weighted phrase tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRuleTable {
    /// Phrases indicating a genuine document
    pub legal: BTreeMap<String, u32>,

    /// Phrases indicating forgery, fraud or other illegality
    pub illegal: BTreeMap<String, u32>,
}

impl Default for KeywordRuleTable {
    fn default() -> Self {
        let legal = [
            ("supreme court", 3),
            ("supreme court of india", 4),
            ("high court", 3),
            ("civil court", 3),
            ("judiciary", 2),
            ("government of india", 3),
            ("income tax act", 3),
            ("contract act", 3),
            ("companies act", 3),
            ("registration act", 3),
            ("tamil nadu state board", 3),
            ("government of tamil nadu", 3),
            ("hall ticket", 2),
            ("marksheet", 2),
            ("subject code", 1),
            ("pass", 1),
            ("fail", 1),
            ("section", 2),
            ("notarized", 3),
            ("registered", 3),
            ("stamp duty paid", 2),
            ("seal", 2),
        ];

        let illegal = [
            ("fake", 3),
            ("forged", 3),
            ("illegal", 3),
            ("unregistered", 2),
            ("counterfeit", 3),
            ("smuggle", 2),
            ("black money", 2),
            ("bribe", 2),
            ("not valid", 2),
            ("fabricated", 3),
        ];

        Self {
            legal: legal.iter().map(|(k, w)| (k.to_string(), *w)).collect(),
            illegal: illegal.iter().map(|(k, w)| (k.to_string(), *w)).collect(),
        }
    }
}

impl KeywordRuleTable {
    /// Check weights are positive, phrases non-empty and the tables disjoint
    pub fn validate(&self) -> Result<()> {
        for (side, table) in [("legal", &self.legal), ("illegal", &self.illegal)] {
            if table.is_empty() {
                return Err(lexcheck_core::Error::config(format!(
                    "{} keyword table is empty",
                    side
                )));
            }
            for (phrase, weight) in table {
                if normalize(phrase).is_empty() {
                    return Err(lexcheck_core::Error::config(format!(
                        "{} keyword table contains a blank phrase",
                        side
                    )));
                }
                if *weight == 0 {
                    return Err(lexcheck_core::Error::config(format!(
                        "{} keyword '{}' must have a positive weight",
                        side, phrase
                    )));
                }
            }
        }

        let legal: Vec<_> = self.legal.keys().map(|k| normalize(k)).collect();
        if let Some(shared) = self
            .illegal
            .keys()
            .map(|k| normalize(k))
            .find(|k| legal.contains(k))
        {
            return Err(lexcheck_core::Error::config(format!(
                "keyword '{}' appears in both legal and illegal tables",
                shared
            )));
        }

        Ok(())
    }
}

/// Legal and illegal scores for one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordScores {
    pub legal: u32,
    pub illegal: u32,

    /// Phrases that contributed, legal side first, in table order
    pub matched: Vec<String>,
}

impl KeywordScores {
    /// Apply the decision policy to the two scores
    pub fn decide(&self) -> (Label, f64) {
        let capped = |score: u32| (f64::from(score) * 10.0).min(MAX_RULE_CONFIDENCE);

        if self.legal > 0 && self.illegal == 0 {
            (Label::Legal, capped(self.legal))
        } else if self.illegal > 0 && self.legal == 0 {
            (Label::Illegal, capped(self.illegal))
        } else if self.legal >= self.illegal {
            // ties, including 0 vs 0, resolve to legal
            (Label::Legal, AMBIGUOUS_CONFIDENCE)
        } else {
            (Label::Illegal, AMBIGUOUS_CONFIDENCE)
        }
    }
}

/// One side of the table compiled into a matcher
struct WeightedMatcher {
    matcher: AhoCorasick,
    phrases: Vec<String>,
    weights: Vec<u32>,
}

impl WeightedMatcher {
    fn new(table: &BTreeMap<String, u32>) -> Result<Self> {
        let (phrases, weights): (Vec<String>, Vec<u32>) = table
            .iter()
            .map(|(phrase, weight)| (normalize(phrase).into_inner(), *weight))
            .unzip();

        let matcher = AhoCorasick::new(&phrases).map_err(|e| {
            lexcheck_core::Error::classifier(format!("Failed to build keyword matcher: {}", e))
        })?;

        Ok(Self {
            matcher,
            phrases,
            weights,
        })
    }

    /// Sum of weights of every phrase present at least once, saturating
    /// at `u32::MAX`
    fn score(&self, text: &str, matched: &mut Vec<String>) -> u32 {
        let mut seen = vec![false; self.phrases.len()];
        for m in self.matcher.find_overlapping_iter(text) {
            seen[m.pattern().as_usize()] = true;
        }

        seen.iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .map(|(idx, _)| {
                matched.push(self.phrases[idx].clone());
                self.weights[idx]
            })
            .fold(0u32, u32::saturating_add)
    }
}

/// Keyword-table classifier
pub struct RuleBasedClassifier {
    legal: WeightedMatcher,
    illegal: WeightedMatcher,
}

impl RuleBasedClassifier {
    /// Compile a validated keyword table
    pub fn new(table: &KeywordRuleTable) -> Result<Self> {
        table.validate()?;

        Ok(Self {
            legal: WeightedMatcher::new(&table.legal)?,
            illegal: WeightedMatcher::new(&table.illegal)?,
        })
    }

    /// Compute both scores
    pub fn scores(&self, text: &NormalizedText) -> KeywordScores {
        let mut matched = Vec::new();
        let legal = self.legal.score(text.as_str(), &mut matched);
        let illegal = self.illegal.score(text.as_str(), &mut matched);

        KeywordScores {
            legal,
            illegal,
            matched,
        }
    }

    /// Score and decide, tagging the result with `route`
    pub fn score_with_route(&self, text: &NormalizedText, route: Route) -> ClassificationResult {
        let (label, confidence) = self.scores(text).decide();
        ClassificationResult::new(label, confidence, route)
    }

    /// Score and decide on the deterministic path
    pub fn score(&self, text: &NormalizedText) -> ClassificationResult {
        self.score_with_route(text, Route::RuleBased)
    }
}

impl Classifier for RuleBasedClassifier {
    type Error = Infallible;

    fn classify(
        &self,
        text: &NormalizedText,
    ) -> std::result::Result<ClassificationResult, Infallible> {
        Ok(self.score(text))
    }

    fn name(&self) -> &str {
        "keyword_rules"
    }

    fn tier(&self) -> ClassifierTier {
        ClassifierTier::A
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RuleBasedClassifier {
        RuleBasedClassifier::new(&KeywordRuleTable::default()).unwrap()
    }

    #[test]
    fn test_legal_only() {
        let result = classifier().score(&normalize("Notarized and registered lease deed"));
        assert_eq!(result.label, Label::Legal);
        // notarized 3 + registered 3
        assert_eq!(result.confidence, 60.0);
        assert_eq!(result.route, Route::RuleBased);
    }

    #[test]
    fn test_illegal_only() {
        let result = classifier().score(&normalize("This FORGED certificate is FAKE"));
        assert_eq!(result.label, Label::Illegal);
        assert_eq!(result.confidence, 60.0);
    }

    #[test]
    fn test_confidence_capped_at_95() {
        let text = normalize(
            "supreme court of india high court civil court judiciary income tax act seal",
        );
        let scores = classifier().scores(&text);
        assert!(scores.legal * 10 > 95);
        assert_eq!(scores.decide(), (Label::Legal, 95.0));
    }

    #[test]
    fn test_no_keywords_defaults_legal_70() {
        let result = classifier().score(&normalize("a quiet afternoon by the river"));
        assert_eq!(result.label, Label::Legal);
        assert_eq!(result.confidence, 70.0);
    }

    #[test]
    fn test_mixed_evidence() {
        let c = classifier();

        // legal: section 2, illegal: bribe 2 -> tie leans legal
        let result = c.score(&normalize("Section 7 covers any bribe offered"));
        assert_eq!((result.label, result.confidence), (Label::Legal, 70.0));

        // legal: seal 2, illegal: forged 3 + counterfeit 3
        let result = c.score(&normalize("forged seal on a counterfeit note"));
        assert_eq!((result.label, result.confidence), (Label::Illegal, 70.0));
    }

    #[test]
    fn test_substring_semantics() {
        // "unregistered" also contains "registered"; both sides fire.
        let scores = classifier().scores(&normalize("UNREGISTERED PROPERTY"));
        assert_eq!(scores.legal, 3);
        assert_eq!(scores.illegal, 2);
        assert!(scores.matched.contains(&"registered".to_string()));
        assert!(scores.matched.contains(&"unregistered".to_string()));
    }

    #[test]
    fn test_repeated_phrase_counts_once() {
        let scores = classifier().scores(&normalize("fake fake fake"));
        assert_eq!(scores.illegal, 3);
    }

    #[test]
    fn test_supreme_court_header_reaches_70() {
        let result = classifier().score(&normalize("IN THE SUPREME COURT OF INDIA"));
        assert_eq!(result.label, Label::Legal);
        assert_eq!(result.confidence, 70.0);
    }

    #[test]
    fn test_large_weights_saturate() {
        let table = KeywordRuleTable {
            legal: [("alpha".to_string(), u32::MAX), ("beta".to_string(), 2)]
                .into_iter()
                .collect(),
            illegal: [("fake".to_string(), u32::MAX)].into_iter().collect(),
        };
        let c = RuleBasedClassifier::new(&table).unwrap();

        let scores = c.scores(&normalize("alpha beta"));
        assert_eq!(scores.legal, u32::MAX);
        assert_eq!(scores.decide(), (Label::Legal, 95.0));

        // both sides saturated: a tie, not a wrapped-around illegal win
        let result = c.score(&normalize("alpha beta fake"));
        assert_eq!((result.label, result.confidence), (Label::Legal, 70.0));
    }

    #[test]
    fn test_validation() {
        let mut table = KeywordRuleTable::default();
        table.illegal.insert("Section".to_string(), 1);
        assert!(table.validate().is_err());

        let mut table = KeywordRuleTable::default();
        table.legal.insert("stamp".to_string(), 0);
        assert!(table.validate().is_err());

        let mut table = KeywordRuleTable::default();
        table.illegal.clear();
        assert!(RuleBasedClassifier::new(&table).is_err());

        assert!(KeywordRuleTable::default().validate().is_ok());
    }
}
