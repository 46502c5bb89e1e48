//! Classification dispatcher
//!
//! Public entry point for classification. Decides per document whether the
//! strong-signal gates justify deterministic keyword scoring or whether the
//! statistical model should decide, and degrades to keyword scoring when
//! the model cannot be loaded or invoked.

use crate::classifier::Classifier;
use crate::config::ClassifierConfig;
use crate::model::ModelError;
use crate::model_store::ModelStore;
use crate::patterns::{SignalDetector, Signals};
use crate::rules::RuleBasedClassifier;
use crate::statistical::StatisticalClassifier;
use lexcheck_core::{normalize, ClassificationResult, Result, Route};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Two-tier document classifier
pub struct DocumentClassifier<S = StatisticalClassifier> {
    min_text_length: usize,
    detector: SignalDetector,
    rules: RuleBasedClassifier,
    statistical: S,
}

impl DocumentClassifier<StatisticalClassifier> {
    /// Build from configuration with a persisted model store at
    /// `config.model.path`
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let store = Arc::new(ModelStore::new(
            config.model.path.clone(),
            config.model.seed_corpus.clone(),
            config.model.params,
        ));
        Self::with_statistical(config, StatisticalClassifier::new(store))
    }

    /// The model store behind the statistical tier
    pub fn model_store(&self) -> &Arc<ModelStore> {
        self.statistical.store()
    }
}

impl<S> DocumentClassifier<S>
where
    S: Classifier<Error = ModelError>,
{
    /// Build with a caller-supplied statistical tier
    pub fn with_statistical(config: &ClassifierConfig, statistical: S) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            min_text_length: config.min_text_length,
            detector: SignalDetector::new(config.official_headers.as_slice())?,
            rules: RuleBasedClassifier::new(&config.keywords)?,
            statistical,
        })
    }

    /// Which strong-signal gates fire for the raw text
    pub fn signals(&self, raw_text: &str) -> Signals {
        self.detector.detect(&normalize(raw_text))
    }

    /// Classify extracted document text. Never fails: too-short input
    /// yields the unknown sentinel and model failures fall back to keyword
    /// scoring.
    pub fn classify_document(&self, raw_text: &str) -> ClassificationResult {
        if raw_text.trim().chars().count() < self.min_text_length {
            debug!("Input below minimum length, not classifying");
            return record(ClassificationResult::insufficient());
        }

        let text = normalize(raw_text);
        let signals = self.detector.detect(&text);

        let result = if signals.any() {
            debug!(?signals, "Strong signal present, using keyword rules");
            self.rules.score(&text)
        } else {
            let started = Instant::now();
            let outcome = self.statistical.classify(&text);
            let elapsed_us = started.elapsed().as_micros() as u64;
            let budget_us = self.statistical.tier().latency_budget_us();
            if elapsed_us > budget_us {
                debug!(
                    classifier = self.statistical.name(),
                    elapsed_us,
                    budget_us,
                    "Statistical tier exceeded its latency budget"
                );
            }

            match outcome {
                Ok(result) => result,
                Err(e) => {
                    let phase = e.phase();
                    match &e {
                        ModelError::NoFeatures => {
                            debug!(
                                classifier = self.statistical.name(),
                                "No model features, using keyword rules"
                            )
                        }
                        _ => warn!(
                            classifier = self.statistical.name(),
                            error = %e,
                            phase = phase.as_str(),
                            "Statistical classifier failed, using keyword rules"
                        ),
                    }
                    metrics::counter!("lexcheck_model_fallbacks_total", "phase" => phase.as_str())
                        .increment(1);
                    self.rules.score_with_route(&text, Route::StatisticalFallback)
                }
            }
        };

        debug!(
            label = %result.label,
            confidence = result.confidence,
            route = result.route.as_str(),
            "Classified document"
        );
        record(result)
    }
}

fn record(result: ClassificationResult) -> ClassificationResult {
    metrics::counter!("lexcheck_classifications_total", "route" => result.route.as_str())
        .increment(1);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexcheck_core::{Label, NormalizedText};

    /// Statistical tier that always reports a load failure
    struct UnavailableModel;

    impl Classifier for UnavailableModel {
        type Error = ModelError;

        fn classify(
            &self,
            _text: &NormalizedText,
        ) -> std::result::Result<ClassificationResult, ModelError> {
            Err(ModelError::ChecksumMismatch)
        }

        fn name(&self) -> &str {
            "unavailable"
        }

        fn tier(&self) -> crate::ClassifierTier {
            crate::ClassifierTier::B
        }
    }

    fn fallback_only() -> DocumentClassifier<UnavailableModel> {
        DocumentClassifier::with_statistical(&ClassifierConfig::default(), UnavailableModel)
            .unwrap()
    }

    #[test]
    fn test_short_input_is_unknown() {
        let classifier = fallback_only();
        for text in ["", "   ", "too short", "  \n 123456789 \t "] {
            let result = classifier.classify_document(text);
            assert_eq!(result.label, Label::Unknown, "{:?}", text);
            assert_eq!(result.confidence, 0.0);
        }

        // exactly ten characters is enough
        assert_ne!(classifier.classify_document("0123456789").label, Label::Unknown);
    }

    #[test]
    fn test_gate_routes_to_rules() {
        let result = fallback_only().classify_document("Aadhaar 1234 5678 9012 holder");
        assert_eq!(result.route, Route::RuleBased);
        assert_eq!((result.label, result.confidence), (Label::Legal, 70.0));
    }

    #[test]
    fn test_model_failure_falls_back_to_rules() {
        let result = fallback_only().classify_document("a forged will found in the attic");
        assert_eq!(result.route, Route::StatisticalFallback);
        assert_eq!(result.label, Label::Illegal);
        assert_eq!(result.confidence, 30.0);
    }

    #[test]
    fn test_signals_exposed() {
        let signals = fallback_only().signals("PAN ABCDE1234F");
        assert!(signals.tax_id);
        assert!(!signals.official_header);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ClassifierConfig::default();
        config.min_text_length = 0;
        assert!(DocumentClassifier::with_statistical(&config, UnavailableModel).is_err());
    }
}
