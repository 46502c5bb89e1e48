//! lexcheck Classifiers
//!
//! Hybrid legal/illegal document classification.
//!
//! Classifiers are organized into tiers based on latency budgets:
//! - Tier A (<2ms): Strong-signal pattern gates and weighted keyword scoring
//! - Tier B (<5ms): TF-IDF + naive Bayes statistical fallback, persisted on
//!   disk and trained from a seed corpus on first use
//!
//! [`DocumentClassifier`] dispatches between them: any strong signal
//! (identity-number shape, tax-ID shape, official header) means keyword
//! scoring decides; otherwise the statistical model decides, degrading to
//! keyword scoring if it cannot be loaded or invoked.

pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod model;
pub mod model_store;
pub mod patterns;
pub mod rules;
pub mod statistical;
pub mod vectorizer;

pub use classifier::{Classifier, ClassifierTier};
pub use config::{default_model_path, ClassifierConfig, StatisticalConfig};
pub use dispatcher::DocumentClassifier;
pub use model::{
    default_seed_corpus, ModelError, ModelParams, ModelPhase, StatisticalModel, TrainingExample,
};
pub use model_store::ModelStore;
pub use patterns::{SignalDetector, Signals};
pub use rules::{KeywordRuleTable, KeywordScores, RuleBasedClassifier};
pub use statistical::StatisticalClassifier;
pub use vectorizer::{TfidfVectorizer, VectorizerConfig};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, ClassifierTier};
    pub use crate::config::ClassifierConfig;
    pub use crate::dispatcher::DocumentClassifier;
    pub use crate::model::ModelError;
    pub use crate::patterns::SignalDetector;
    pub use crate::rules::RuleBasedClassifier;
    pub use crate::statistical::StatisticalClassifier;
    pub use lexcheck_core::{ClassificationResult, Label, Route};
}
