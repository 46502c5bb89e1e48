//! Classifier trait and common types

use lexcheck_core::{ClassificationResult, NormalizedText};

/// Trait for the classification tiers behind the dispatcher
pub trait Classifier: Send + Sync {
    /// Failure type; deterministic tiers use `Infallible`
    type Error: std::error::Error + Send + Sync + 'static;

    /// Classify already-normalized text
    fn classify(&self, text: &NormalizedText) -> Result<ClassificationResult, Self::Error>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Get the tier (performance category)
    fn tier(&self) -> ClassifierTier;
}

/// Classifier performance tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierTier {
    /// Ultra-fast (<2ms) - Pattern gates and keyword tables
    A,
    /// Fast (<5ms) - Lightweight statistical model (excluding first-use training)
    B,
}

impl ClassifierTier {
    /// Get the latency budget for this tier in microseconds
    pub fn latency_budget_us(&self) -> u64 {
        match self {
            Self::A => 2_000,
            Self::B => 5_000,
        }
    }
}
