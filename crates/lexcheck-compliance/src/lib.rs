//! lexcheck Compliance Analyzer
//!
//! Declarative rule catalogue for flagging problematic passages in
//! document text.
//!
//! Catalogues are defined in YAML and specify, per rule:
//! - A category reported on every issue
//! - A trigger (fixed phrases or a regular expression)
//! - Description and recommendation templates
//! - An optional regulatory reference
//!
//! A default catalogue for Indian documents is embedded in the crate.

pub mod engine;
pub mod rule;
pub mod trigger;

pub use engine::{ComplianceAnalyzer, MATCH_PLACEHOLDER};
pub use rule::{ComplianceRule, RuleCatalogue};
pub use trigger::Trigger;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::ComplianceAnalyzer;
    pub use crate::rule::{ComplianceRule, RuleCatalogue};
    pub use crate::trigger::Trigger;
    pub use lexcheck_core::ComplianceIssue;
}
