//! Mock statistical tiers for testing
//!
//! Configurable implementations of the Classifier trait used to check
//! dispatcher routing and fallback behaviour without a trained model.

use lexcheck_classifiers::{
    Classifier, ClassifierConfig, ClassifierTier, DocumentClassifier, ModelError,
};
use lexcheck_core::{ClassificationResult, Label, NormalizedText, Route};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A configurable mock model that counts invocations
pub struct MockModel {
    label: Label,
    confidence: f64,
    call_count: Arc<AtomicU32>,
}

impl MockModel {
    pub fn new(label: Label, confidence: f64) -> Self {
        Self {
            label,
            confidence,
            call_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Shared handle to the invocation counter
    pub fn counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.call_count)
    }
}

impl Classifier for MockModel {
    type Error = ModelError;

    fn classify(&self, _text: &NormalizedText) -> Result<ClassificationResult, ModelError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(ClassificationResult::new(
            self.label,
            self.confidence,
            Route::Statistical,
        ))
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn tier(&self) -> ClassifierTier {
        ClassifierTier::B
    }
}

/// A model that always fails - for testing fallback paths
pub struct FailingModel {
    make_error: fn() -> ModelError,
    call_count: Arc<AtomicU32>,
}

impl FailingModel {
    pub fn new(make_error: fn() -> ModelError) -> Self {
        Self {
            make_error,
            call_count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.call_count)
    }
}

impl Classifier for FailingModel {
    type Error = ModelError;

    fn classify(&self, _text: &NormalizedText) -> Result<ClassificationResult, ModelError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Err((self.make_error)())
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn tier(&self) -> ClassifierTier {
        ClassifierTier::B
    }
}

fn dispatcher<S: Classifier<Error = ModelError>>(model: S) -> DocumentClassifier<S> {
    DocumentClassifier::with_statistical(&ClassifierConfig::default(), model).unwrap()
}

#[test]
fn test_identity_number_skips_model() {
    let model = MockModel::new(Label::Illegal, 99.0);
    let calls = model.counter();
    let classifier = dispatcher(model);

    let result = classifier.classify_document("Reference 1234 5678 9012 attached");
    assert_eq!(result.route, Route::RuleBased);
    assert_eq!(result.label, Label::Legal);
    assert_eq!(result.confidence, 70.0);
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn test_tax_id_and_header_skip_model() {
    let model = MockModel::new(Label::Illegal, 99.0);
    let calls = model.counter();
    let classifier = dispatcher(model);

    classifier.classify_document("PAN card number ABCDE1234F");
    classifier.classify_document("Directorate of Government Examinations");
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn test_unstructured_prose_uses_model() {
    let model = MockModel::new(Label::Illegal, 88.5);
    let calls = model.counter();
    let classifier = dispatcher(model);

    let result = classifier.classify_document("the parties met on a sunny afternoon");
    assert_eq!(result.route, Route::Statistical);
    assert_eq!((result.label, result.confidence), (Label::Illegal, 88.5));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn test_short_input_never_reaches_model() {
    let model = MockModel::new(Label::Illegal, 99.0);
    let calls = model.counter();
    let classifier = dispatcher(model);

    let result = classifier.classify_document("  fake  ");
    assert_eq!(result, ClassificationResult::insufficient());
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn test_every_failure_phase_falls_back() {
    let failures: [fn() -> ModelError; 4] = [
        || ModelError::ChecksumMismatch,
        || ModelError::EmptyCorpus,
        || ModelError::Persist {
            path: "/nowhere".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        },
        || ModelError::NoFeatures,
    ];

    for make_error in failures {
        let model = FailingModel::new(make_error);
        let calls = model.counter();
        let classifier = dispatcher(model);

        let result = classifier.classify_document("counterfeit notes were smuggled in");
        assert_eq!(result.route, Route::StatisticalFallback);
        // counterfeit 3 + smuggle 2
        assert_eq!((result.label, result.confidence), (Label::Illegal, 50.0));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}

#[test]
fn test_fallback_tie_defaults_legal() {
    let classifier = dispatcher(FailingModel::new(|| ModelError::NoFeatures));

    let result = classifier.classify_document("nothing of note happened here");
    assert_eq!(result.route, Route::StatisticalFallback);
    assert_eq!((result.label, result.confidence), (Label::Legal, 70.0));
}
