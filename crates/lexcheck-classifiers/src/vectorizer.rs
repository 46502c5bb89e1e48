//! Word n-gram TF-IDF vectorizer

use lexcheck_core::NormalizedText;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Sparse feature vector: (feature index, weight), sorted by index
pub type SparseVector = Vec<(usize, f64)>;

/// Vectorizer hyper-parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Vocabulary cap, keeping the most frequent n-grams
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Inclusive n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            ngram_range: default_ngram_range(),
        }
    }
}

fn default_max_features() -> usize {
    10_000
}

fn default_ngram_range() -> (usize, usize) {
    (1, 3)
}

/// Fitted vocabulary and inverse document frequencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    ngram_range: (usize, usize),
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF weights from a corpus
    pub fn fit(docs: &[NormalizedText], config: VectorizerConfig) -> Self {
        let (min_n, max_n) = config.ngram_range;

        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in docs {
            let grams = ngrams(doc, min_n, max_n);
            let mut seen = std::collections::HashSet::new();
            for gram in grams {
                if seen.insert(gram.clone()) {
                    *doc_freq.entry(gram.clone()).or_insert(0) += 1;
                }
                *term_freq.entry(gram).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(config.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = docs.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        Self {
            ngram_range: config.ngram_range,
            vocabulary,
            idf,
        }
    }

    /// L2-normalized TF-IDF vector; empty when no n-gram is in the vocabulary
    pub fn transform(&self, text: &NormalizedText) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in ngrams(text, self.ngram_range.0, self.ngram_range.1) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }

        vector
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Index of a term, if it is in the vocabulary
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// True when the stored IDF table matches the vocabulary
    pub(crate) fn is_consistent(&self) -> bool {
        self.idf.len() == self.vocabulary.len()
            && self.vocabulary.values().all(|&idx| idx < self.idf.len())
            && self.ngram_range.0 >= 1
            && self.ngram_range.0 <= self.ngram_range.1
    }
}

/// Contiguous word n-grams of the normalized text
fn ngrams(text: &NormalizedText, min_n: usize, max_n: usize) -> Vec<String> {
    let tokens: Vec<&str> = text.tokens().collect();
    let mut grams = Vec::new();

    for n in min_n.max(1)..=max_n {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }

    grams
}
