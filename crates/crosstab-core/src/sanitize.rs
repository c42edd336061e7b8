//! Centralized numeric sanitation.
//!
//! **ALL** scrubbing of non-finite values lives in this module. Computors
//! produce raw `f64` results and never hand-check NaN or infinity on their
//! own; this is the single, auditable gateway between the numeric stack and
//! the wire.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   raw f64    ┌────────────┐   Option<f64>   ┌───────────┐
//! │ Computor │ ───────────► │ finite()   │ ──────────────► │ record    │
//! └──────────┘              └────────────┘                 └─────┬─────┘
//!                                                               │
//!                                                         to_wire()
//!                                                               │
//!                                                               ▼
//!                                                      JSON (null = absent)
//! ```
//!
//! The chi-square family can legitimately produce NaN and ±infinity (an
//! undefined odds ratio, a division by a zero expected count). JSON has no
//! token for either, so every such value must leave the engine as `null`.
//! [`finite`] enforces that for scalar fields; [`to_wire`] is the boundary
//! pass that guarantees it for anything nested, since the serializer renders
//! every non-finite float as `null` rather than emitting an invalid literal.

use serde::Serialize;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Scalar gateway
// ---------------------------------------------------------------------------

/// Map a raw float to its serialization-safe form.
///
/// This is the **single gateway** for scalar sanitation: every statistic,
/// p-value, effect size, and odds ratio passes through here before it is
/// placed in a result record. `None` is the absent marker and encodes as
/// JSON `null`.
pub fn finite(value: f64) -> Option<f64> {
    if value.is_finite() { Some(value) } else { None }
}

// ---------------------------------------------------------------------------
// Record encoding
// ---------------------------------------------------------------------------

/// Encode a result record for the wire.
///
/// The sanitize-then-encode pass at the output boundary. The serializer
/// recurses through nested sequences and maps, so no output path can leak a
/// NaN or infinity literal regardless of how a record shape nests its
/// numbers.
pub fn to_wire<T: Serialize>(record: &T) -> Result<serde_json::Value, EngineError> {
    serde_json::to_value(record).map_err(|e| EngineError::Internal(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
