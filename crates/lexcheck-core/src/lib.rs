//! lexcheck Core
//!
//! Core types, traits, and utilities shared across lexcheck components.
//!
//! This crate provides:
//! - Classification labels and results, and structured compliance issues
//! - Error types and result handling
//! - Text normalization used by every detector and scorer

pub mod error;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use text::{normalize, NormalizedText};
pub use types::{ClassificationResult, ComplianceIssue, Label, Route};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::text::{normalize, NormalizedText};
    pub use crate::types::{ClassificationResult, ComplianceIssue, Label, Route};
}
