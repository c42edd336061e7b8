//! Fisher's exact test for 2x2 tables.
//!
//! Exact conditional inference on the hypergeometric distribution of the
//! top-left cell given fixed margins. The odds ratio is the reported
//! statistic; the two-sided p-value sums the probabilities of every table
//! no more likely than the observed one.

use log::warn;

use crate::error::EngineError;
use crate::interpret::interpret;
use crate::report::{Df, FisherExactReport, TestReport};
use crate::request::{Observed, TestRequest};
use crate::sanitize;
use crate::stat;

/// Relative slack when comparing point probabilities, absorbing rounding in
/// the tail accumulation.
const PMF_RELATIVE_GATE: f64 = 1.0 + 1e-7;

const ZERO_MARGIN_NOTE: &str = "Note: The odds ratio cannot be calculated because \
     one or more groups have zero observations.";
const UNRELIABLE_RATIO_NOTE: &str = "Note: The odds ratio cannot be reliably \
     calculated for this data configuration.";
const ALTERNATIVE_HYPOTHESIS: &str =
    "There is a non-random association between the two variables.";
const POSITIVE_CONCLUSION: &str =
    "The analysis reveals a significant association between the variables.";
const NEGATIVE_CONCLUSION: &str =
    "There is no statistical evidence of an association between the variables.";

/// Run Fisher's exact test.
pub fn run(request: &TestRequest) -> Result<TestReport, EngineError> {
    let cells = match &request.observed {
        Observed::Table(rows) if rows.len() == 2 && rows.iter().all(|r| r.len() == 2) => {
            rows.as_slice()
        }
        _ => {
            return Err(EngineError::Validation(
                "Fisher's Exact Test is only applicable to 2x2 tables.".to_string(),
            ));
        }
    };

    let row_sums = [cells[0][0] + cells[0][1], cells[1][0] + cells[1][1]];
    let col_sums = [cells[0][0] + cells[1][0], cells[0][1] + cells[1][1]];
    let grand_total: f64 = row_sums.iter().sum();

    let (statistic, p_value, notes) = if row_sums.contains(&0.0) || col_sums.contains(&0.0) {
        // Degenerate but valid: nothing to condition on, so the test
        // trivially fails to reject and the ratio is undefined.
        warn!("zero row or column total, odds ratio undefined");
        (None, 1.0, ZERO_MARGIN_NOTE)
    } else {
        let (a, b, c, d) = truncated_cells(cells)?;
        let odds_ratio = if b > 0 && c > 0 {
            (a as f64 * d as f64) / (b as f64 * c as f64)
        } else {
            f64::INFINITY
        };
        let p_value = two_sided_p(a, b, c, d);
        match sanitize::finite(odds_ratio) {
            Some(ratio) => (Some(ratio), p_value, ""),
            None => {
                warn!("odds ratio {odds_ratio} is not finite, reporting it as absent");
                (None, p_value, UNRELIABLE_RATIO_NOTE)
            }
        }
    };

    let interpretation = interpret(p_value, POSITIVE_CONCLUSION, NEGATIVE_CONCLUSION, notes);

    let label = |labels: &[String], index: usize| -> String {
        labels.get(index).cloned().unwrap_or_default()
    };
    let null_hypothesis = format!(
        "There is no association between 'Variable 1' ({} vs {}) and 'Variable 2' ({} vs {}).",
        label(&request.row_labels, 0),
        label(&request.row_labels, 1),
        label(&request.col_labels, 0),
        label(&request.col_labels, 1),
    );

    Ok(TestReport::FisherExact(FisherExactReport {
        test: "Fisher's Exact Test",
        subtype: "Contingency",
        statistic,
        statistic_label: "Odds Ratio",
        p_value: sanitize::finite(p_value),
        df: Df::NotApplicable,
        sample_size: grand_total as u64,
        observed_table: cells.to_vec(),
        row_labels: request.row_labels.clone(),
        col_labels: request.col_labels.clone(),
        null_hypothesis,
        alternative_hypothesis: ALTERNATIVE_HYPOTHESIS.to_string(),
        interpretation,
    }))
}

/// Truncate the cells toward zero for the exact computation, rejecting
/// negative counts. Fractional parts are dropped; the reported table keeps
/// the caller's values.
fn truncated_cells(cells: &[Vec<f64>]) -> Result<(u64, u64, u64, u64), EngineError> {
    let mut ints = [0u64; 4];
    for (slot, &cell) in ints
        .iter_mut()
        .zip(cells.iter().flatten())
    {
        let truncated = cell.trunc();
        if truncated < 0.0 {
            return Err(EngineError::Validation(
                "All values in the observed table must be nonnegative".to_string(),
            ));
        }
        *slot = truncated as u64;
    }
    Ok((ints[0], ints[1], ints[2], ints[3]))
}

/// Two-sided p-value: total probability of every top-left cell value whose
/// point probability does not exceed the observed one.
fn two_sided_p(a: u64, b: u64, c: u64, d: u64) -> f64 {
    let population = a + b + c + d;
    let successes = a + b;
    let draws = a + c;

    let lo = draws.saturating_sub(c + d);
    let hi = draws.min(successes);

    let observed_p = stat::hypergeometric_pmf(population, successes, draws, a);

    // An observed cell at the distribution's mode makes every table at
    // least as extreme, so the p-value is exactly 1 with no summation.
    let mode = (draws + 1) * (successes + 1) / (population + 2);
    let mode_p = stat::hypergeometric_pmf(population, successes, draws, mode);
    if (observed_p - mode_p).abs() / observed_p.max(mode_p) <= 1e-14 {
        return 1.0;
    }

    let gate = observed_p * PMF_RELATIVE_GATE;
    let mut total = 0.0;
    for k in lo..=hi {
        let p = stat::hypergeometric_pmf(population, successes, draws, k);
        if p <= gate {
            total += p;
        }
    }
    total.min(1.0)
}
