//! Compliance rule triggers

use lexcheck_core::{normalize, Error, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Separator accepted between the words of a phrase: any run of characters
/// the normalizer would collapse to a single space
const WORD_SEPARATOR: &str = r"[^\p{Alphabetic}\p{N}]+";

/// Trigger condition for a compliance rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Fixed phrases, matched case-insensitively with any punctuation or
    /// whitespace between words
    Phrases {
        /// Phrases to look for
        phrases: Vec<String>,
    },

    /// Regular expression over the original text
    Regex {
        /// The pattern to match
        pattern: String,

        /// Case-insensitive matching
        #[serde(default = "default_true")]
        case_insensitive: bool,
    },
}

fn default_true() -> bool {
    true
}

impl Trigger {
    /// Whether the trigger has nothing to match on
    pub fn is_empty(&self) -> bool {
        match self {
            Trigger::Phrases { phrases } => phrases.iter().all(|p| normalize(p).is_empty()),
            Trigger::Regex { pattern, .. } => pattern.trim().is_empty(),
        }
    }

    /// Compile into a regex that runs against the original, non-normalized
    /// text, so matches can be reported verbatim
    pub fn compile(&self) -> Result<Regex> {
        let source = match self {
            Trigger::Phrases { phrases } => phrase_pattern(phrases)?,
            Trigger::Regex { pattern, .. } => pattern.clone(),
        };
        let case_insensitive = match self {
            Trigger::Phrases { .. } => true,
            Trigger::Regex {
                case_insensitive, ..
            } => *case_insensitive,
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| Error::compliance(format!("Invalid trigger pattern: {}", e)))?;

        if regex.is_match("") {
            return Err(Error::compliance(format!(
                "Trigger pattern matches the empty string: {}",
                source
            )));
        }

        Ok(regex)
    }
}

/// Alternation of the phrases, longest first so that a longer phrase wins
/// over a shorter one starting at the same position
fn phrase_pattern(phrases: &[String]) -> Result<String> {
    let mut words: Vec<Vec<String>> = phrases
        .iter()
        .map(|p| {
            normalize(p)
                .tokens()
                .map(regex::escape)
                .collect::<Vec<_>>()
        })
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return Err(Error::compliance("Phrase trigger has no phrases"));
    }

    words.sort_by(|a, b| {
        let len = |w: &Vec<String>| w.iter().map(String::len).sum::<usize>() + w.len();
        len(b).cmp(&len(a)).then_with(|| a.cmp(b))
    });
    words.dedup();

    let alternatives: Vec<String> = words.iter().map(|w| w.join(WORD_SEPARATOR)).collect();
    Ok(format!("(?:{})", alternatives.join("|")))
}
