//! Strong-signal pattern gates (Tier A)
//!
//! Identity-number shapes, tax-ID shapes and official header phrases. A
//! positive result from any gate routes a document to keyword scoring
//! instead of the statistical model.

use aho_corasick::AhoCorasick;
use lexcheck_core::{normalize, NormalizedText, Result};
use regex::Regex;

/// Header phrases used when the configuration does not override them
pub const DEFAULT_OFFICIAL_HEADERS: &[&str] = &[
    "government of india",
    "govt. of india",
    "ministry of",
    "department of",
    "supreme court",
    "high court",
    "government of tamil nadu",
    "directorate of government examinations",
    "tamil nadu state board",
];

/// Which gates fired for a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Signals {
    /// 12-digit national ID shape (4-4-4, optional space/hyphen separators)
    pub identity_number: bool,

    /// Permanent account number shape (5 letters, 4 digits, 1 letter)
    pub tax_id: bool,

    /// Institutional or judicial header phrase
    pub official_header: bool,
}

impl Signals {
    /// True if any gate fired
    pub fn any(&self) -> bool {
        self.identity_number || self.tax_id || self.official_header
    }
}

/// Regex and Aho-Corasick backed detectors over normalized text
pub struct SignalDetector {
    identity_number_regex: Regex,
    tax_id_regex: Regex,
    headers: AhoCorasick,
}

impl SignalDetector {
    /// Create a detector for the given header phrases.
    ///
    /// Phrases are normalized before matching, so "govt. of india" matches
    /// the normalized form "govt of india".
    pub fn new<S: AsRef<str>>(official_headers: &[S]) -> Result<Self> {
        let phrases: Vec<String> = official_headers
            .iter()
            .map(|h| normalize(h.as_ref()).into_inner())
            .filter(|h| !h.is_empty())
            .collect();

        if phrases.is_empty() {
            return Err(lexcheck_core::Error::config(
                "at least one official header phrase is required",
            ));
        }

        let headers = AhoCorasick::new(&phrases).map_err(|e| {
            lexcheck_core::Error::classifier(format!("Failed to build header matcher: {}", e))
        })?;

        Ok(Self {
            identity_number_regex: Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}\b").map_err(|e| {
                lexcheck_core::Error::classifier(format!(
                    "Failed to compile identity number regex: {}",
                    e
                ))
            })?,
            tax_id_regex: Regex::new(r"(?i)\b[a-z]{5}[0-9]{4}[a-z]\b").map_err(|e| {
                lexcheck_core::Error::classifier(format!("Failed to compile tax id regex: {}", e))
            })?,
            headers,
        })
    }

    /// Detector with [`DEFAULT_OFFICIAL_HEADERS`]
    pub fn with_default_headers() -> Result<Self> {
        Self::new(DEFAULT_OFFICIAL_HEADERS)
    }

    pub fn has_identity_number_pattern(&self, text: &NormalizedText) -> bool {
        self.identity_number_regex.is_match(text.as_str())
    }

    pub fn has_tax_id_pattern(&self, text: &NormalizedText) -> bool {
        self.tax_id_regex.is_match(text.as_str())
    }

    pub fn has_official_header(&self, text: &NormalizedText) -> bool {
        self.headers.is_match(text.as_str())
    }

    /// Run all gates
    pub fn detect(&self, text: &NormalizedText) -> Signals {
        Signals {
            identity_number: self.has_identity_number_pattern(text),
            tax_id: self.has_tax_id_pattern(text),
            official_header: self.has_official_header(text),
        }
    }
}
