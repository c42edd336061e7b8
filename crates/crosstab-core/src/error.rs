//! Engine error taxonomy.
//!
//! Every failure the engine can report is one of four variants, and the
//! `Display` rendering of each variant is the exact message a client sees in
//! the wire error record. Transport status codes are the serving layer's
//! concern; the engine only distinguishes caller mistakes from its own.

use thiserror::Error;

/// Failure reported by the dispatcher or a computor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Test family other than the one this engine implements.
    #[error("Unsupported test type: {0}")]
    UnsupportedTest(String),

    /// Unknown subtype within the chi-square family.
    #[error("Invalid Chi-Square subtype: {0}")]
    UnsupportedSubtype(String),

    /// A computor precondition failed: empty input, zero totals, wrong
    /// shape, an inconsistent expected distribution.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unexpected failure inside the engine.
    #[error("An internal error occurred: {0}")]
    Internal(String),
}

impl EngineError {
    /// True for failures that are the engine's fault rather than the
    /// caller's.
    pub fn is_internal(&self) -> bool {
        matches!(self, EngineError::Internal(_))
    }

    /// Wire error record: `{"message": "..."}`.
    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::json!({ "message": self.to_string() })
    }
}
