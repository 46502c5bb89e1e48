//! Statistical text classifier: TF-IDF features into multinomial naive Bayes

use crate::vectorizer::{SparseVector, TfidfVectorizer, VectorizerConfig};
use lexcheck_core::{normalize, Label, NormalizedText};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Stage of the statistical path a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPhase {
    Load,
    Train,
    Persist,
    Predict,
}

impl ModelPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Train => "train",
            Self::Persist => "persist",
            Self::Predict => "predict",
        }
    }
}

/// Errors from loading, training, persisting or invoking the model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode model artifact: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("model artifact format version {found} is not supported (expected {expected})")]
    Incompatible { found: u32, expected: u32 },

    #[error("model artifact checksum mismatch")]
    ChecksumMismatch,

    #[error("model artifact is internally inconsistent: {0}")]
    Inconsistent(String),

    #[error("training corpus is empty")]
    EmptyCorpus,

    #[error("training corpus needs at least two labels, found {0}")]
    SingleClass(usize),

    #[error("failed to serialize model: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to persist model artifact {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("text has no features known to the model")]
    NoFeatures,
}

impl ModelError {
    /// Which stage failed
    pub fn phase(&self) -> ModelPhase {
        match self {
            Self::Read { .. }
            | Self::Decode(_)
            | Self::Incompatible { .. }
            | Self::ChecksumMismatch
            | Self::Inconsistent(_) => ModelPhase::Load,
            Self::EmptyCorpus | Self::SingleClass(_) => ModelPhase::Train,
            Self::Serialize(_) | Self::Persist { .. } => ModelPhase::Persist,
            Self::NoFeatures => ModelPhase::Predict,
        }
    }

    /// True when the artifact simply does not exist yet
    pub fn is_missing_artifact(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// One labelled document of the seed corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: Label,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// The built-in seed corpus used when no model has been trained offline
pub fn default_seed_corpus() -> Vec<TrainingExample> {
    vec![
        TrainingExample::new("IN THE SUPREME COURT OF INDIA", Label::Legal),
        TrainingExample::new("INCOME TAX ACT", Label::Legal),
        TrainingExample::new("LEASE DEED", Label::Legal),
        TrainingExample::new("GOVERNMENT OF TAMIL NADU", Label::Legal),
        TrainingExample::new("FAKE DOCUMENT", Label::Illegal),
        TrainingExample::new("UNREGISTERED PROPERTY", Label::Illegal),
        TrainingExample::new("ILLEGAL AGREEMENT", Label::Illegal),
        TrainingExample::new("FORGED CERTIFICATE", Label::Illegal),
    ]
}

/// Training hyper-parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    #[serde(default)]
    pub vectorizer: VectorizerConfig,

    /// Additive (Laplace/Lidstone) smoothing
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            smoothing: default_smoothing(),
        }
    }
}

fn default_smoothing() -> f64 {
    0.1
}

/// Trained vectorizer + classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalModel {
    vectorizer: TfidfVectorizer,
    classes: Vec<Label>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl StatisticalModel {
    /// Fit on a labelled corpus. Deterministic for a given corpus and params.
    pub fn train(corpus: &[TrainingExample], params: ModelParams) -> Result<Self, ModelError> {
        if corpus.is_empty() {
            return Err(ModelError::EmptyCorpus);
        }

        let mut classes: Vec<Label> = corpus.iter().map(|ex| ex.label).collect();
        classes.sort();
        classes.dedup();
        if classes.len() < 2 {
            return Err(ModelError::SingleClass(classes.len()));
        }

        let docs: Vec<NormalizedText> = corpus.iter().map(|ex| normalize(&ex.text)).collect();
        let vectorizer = TfidfVectorizer::fit(&docs, params.vectorizer);
        let n_features = vectorizer.len();

        let mut class_counts = vec![0usize; classes.len()];
        let mut feature_counts = vec![vec![0.0f64; n_features]; classes.len()];

        for (doc, example) in docs.iter().zip(corpus) {
            let c = class_index(&classes, example.label);
            class_counts[c] += 1;
            for (idx, weight) in vectorizer.transform(doc) {
                feature_counts[c][idx] += weight;
            }
        }

        let total = corpus.len() as f64;
        let class_log_prior = class_counts
            .iter()
            .map(|&count| (count as f64 / total).ln())
            .collect();

        let alpha = params.smoothing;
        let feature_log_prob = feature_counts
            .into_iter()
            .map(|counts| {
                let denom: f64 = counts.iter().sum::<f64>() + alpha * n_features as f64;
                counts
                    .into_iter()
                    .map(|count| ((count + alpha) / denom).ln())
                    .collect()
            })
            .collect();

        Ok(Self {
            vectorizer,
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Labels the model can emit, in model order
    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Probability per label
    pub fn predict_probabilities(
        &self,
        text: &NormalizedText,
    ) -> Result<BTreeMap<Label, f64>, ModelError> {
        let features = self.vectorizer.transform(text);
        if features.is_empty() {
            return Err(ModelError::NoFeatures);
        }

        let joint = self.joint_log_likelihood(&features);
        let max = joint.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = joint.iter().map(|ll| (ll - max).exp()).collect();
        let sum: f64 = exp.iter().sum();

        Ok(self
            .classes
            .iter()
            .zip(exp)
            .map(|(label, e)| (*label, e / sum))
            .collect())
    }

    /// Most probable label with its probability. Exact ties resolve to the
    /// earliest label in `Label` order, which puts `Legal` first.
    pub fn predict_with_probability(
        &self,
        text: &NormalizedText,
    ) -> Result<(Label, f64), ModelError> {
        let probabilities = self.predict_probabilities(text)?;

        let mut best: Option<(Label, f64)> = None;
        for (label, p) in probabilities {
            match best {
                Some((_, best_p)) if p <= best_p => {}
                _ => best = Some((label, p)),
            }
        }

        best.ok_or(ModelError::NoFeatures)
    }

    /// Most probable label
    pub fn predict(&self, text: &NormalizedText) -> Result<Label, ModelError> {
        self.predict_with_probability(text).map(|(label, _)| label)
    }

    /// Structural sanity check for artifacts read from disk
    pub(crate) fn check_consistency(&self) -> Result<(), ModelError> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(ModelError::Inconsistent(format!(
                "{} classes recorded",
                n_classes
            )));
        }
        if self.class_log_prior.len() != n_classes || self.feature_log_prob.len() != n_classes {
            return Err(ModelError::Inconsistent(
                "class tables disagree in length".to_string(),
            ));
        }
        if !self.vectorizer.is_consistent()
            || self
                .feature_log_prob
                .iter()
                .any(|row| row.len() != self.vectorizer.len())
        {
            return Err(ModelError::Inconsistent(
                "feature tables disagree with vocabulary".to_string(),
            ));
        }
        Ok(())
    }

    fn joint_log_likelihood(&self, features: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + features
                        .iter()
                        .map(|(idx, weight)| weight * log_probs[*idx])
                        .sum::<f64>()
            })
            .collect()
    }
}

fn class_index(classes: &[Label], label: Label) -> usize {
    classes.iter().position(|c| *c == label).unwrap_or(0)
}
