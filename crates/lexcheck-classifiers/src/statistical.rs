//! Statistical fallback classifier (Tier B)

use crate::classifier::{Classifier, ClassifierTier};
use crate::model::ModelError;
use crate::model_store::ModelStore;
use lexcheck_core::{ClassificationResult, NormalizedText, Route};
use std::sync::Arc;

/// Classifier backed by the persisted TF-IDF + naive Bayes model.
///
/// Used only when no strong-signal gate fired. Confidence is the model's
/// probability for the chosen label, as a percentage.
pub struct StatisticalClassifier {
    store: Arc<ModelStore>,
}

impl StatisticalClassifier {
    pub fn new(store: Arc<ModelStore>) -> Self {
        Self { store }
    }

    /// The store backing this classifier
    pub fn store(&self) -> &Arc<ModelStore> {
        &self.store
    }
}

impl Classifier for StatisticalClassifier {
    type Error = ModelError;

    fn classify(&self, text: &NormalizedText) -> Result<ClassificationResult, ModelError> {
        let model = self.store.get()?;
        let (label, probability) = model.predict_with_probability(text)?;

        Ok(ClassificationResult::new(
            label,
            probability * 100.0,
            Route::Statistical,
        ))
    }

    fn name(&self) -> &str {
        "statistical"
    }

    fn tier(&self) -> ClassifierTier {
        ClassifierTier::B
    }
}
