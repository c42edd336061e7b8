//! The four test computors.
//!
//! Each computor is a free function from a borrowed request to a result
//! record or an [`EngineError`](crate::error::EngineError). Computors hold
//! no shared state, and every derived scalar leaves through the sanitation
//! gateway.

pub mod fishers_exact;
pub mod goodness_of_fit;
pub mod homogeneity;
pub mod independence;

/// Caveat shared by the two contingency-table procedures.
pub(crate) const LOW_EXPECTED_CELL_NOTE: &str = "Note: The accuracy of this test may be \
     reduced because one or more cells had an expected frequency below 5.";

/// True when any expected cell falls below the classic reliability
/// threshold of 5.
pub(crate) fn any_expected_below_five(expected: &[Vec<f64>]) -> bool {
    expected.iter().flatten().any(|&e| e < 5.0)
}
