//! Contingency-table validation and chi-square computation.
//!
//! The independence and homogeneity procedures share this path in full,
//! which is what makes them numerically identical: same validation
//! sequence, same expected table, same statistic, same df.

use crate::error::EngineError;
use crate::request::Observed;
use crate::stat;

/// Chi-square statistics for a validated contingency table.
#[derive(Debug, Clone)]
pub struct ContingencyStats {
    pub chi2: f64,
    pub p_value: f64,
    pub df: u64,
    pub expected: Vec<Vec<f64>>,
    pub grand_total: f64,
    pub rows: usize,
    pub cols: usize,
}

/// Pull the 2-D cells out of an observed payload.
///
/// Applies the contingency validation sequence in its contractual order:
/// rectangularity, presence, nonzero total, then dimensionality.
pub fn contingency_cells(observed: &Observed) -> Result<&[Vec<f64>], EngineError> {
    if let Observed::Table(rows) = observed {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            return Err(EngineError::Validation(
                "Observed data must be a rectangular 2D table".to_string(),
            ));
        }
    }
    if observed.cell_count() == 0 {
        return Err(EngineError::Validation(
            "No observed data provided".to_string(),
        ));
    }
    if observed.total() == 0.0 {
        return Err(EngineError::Validation(
            "All observed values are zero".to_string(),
        ));
    }
    match observed {
        Observed::Table(rows) => Ok(rows.as_slice()),
        Observed::Counts(_) => Err(EngineError::Validation(
            "Observed data must be a 2D contingency table".to_string(),
        )),
    }
}

/// Compute the chi-square statistics for a rectangular table of counts.
///
/// Cells must be nonnegative; a negative cell is rejected before any
/// expected frequency is computed, so a table whose negative cells cancel
/// a marginal still reports the nonnegativity failure. Expected counts
/// come from the independence model,
/// `expected[i][j] = row_total[i] * col_total[j] / grand_total`. A zero
/// marginal makes an expected cell zero and the test undefined, which is
/// rejected with the cell position. A table with a single nontrivial
/// dimension has df 0 and resolves to the degenerate statistic 0 with
/// p-value 1.
pub fn contingency_statistics(cells: &[Vec<f64>]) -> Result<ContingencyStats, EngineError> {
    if cells.iter().flatten().any(|&cell| cell < 0.0) {
        return Err(EngineError::Validation(
            "All values in `observed` must be nonnegative.".to_string(),
        ));
    }

    let rows = cells.len();
    let cols = cells.first().map(Vec::len).unwrap_or(0);

    let mut row_totals = vec![0.0; rows];
    let mut col_totals = vec![0.0; cols];
    let mut grand_total = 0.0;
    for (i, row) in cells.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            row_totals[i] += cell;
            col_totals[j] += cell;
            grand_total += cell;
        }
    }

    let mut expected = vec![vec![0.0; cols]; rows];
    for i in 0..rows {
        for j in 0..cols {
            let e = row_totals[i] * col_totals[j] / grand_total;
            if e == 0.0 {
                return Err(EngineError::Validation(format!(
                    "The internally computed table of expected frequencies \
                     has a zero element at ({i}, {j})."
                )));
            }
            expected[i][j] = e;
        }
    }

    let df = (rows.saturating_sub(1) * cols.saturating_sub(1)) as u64;
    if df == 0 {
        // One nontrivial dimension: the observed table is its own
        // expectation, so the test passes vacuously.
        return Ok(ContingencyStats {
            chi2: 0.0,
            p_value: 1.0,
            df,
            expected,
            grand_total,
            rows,
            cols,
        });
    }

    let mut chi2 = 0.0;
    for i in 0..rows {
        for j in 0..cols {
            let diff = cells[i][j] - expected[i][j];
            chi2 += diff * diff / expected[i][j];
        }
    }
    let p_value = stat::chi_square_sf(chi2, df as f64);

    Ok(ContingencyStats {
        chi2,
        p_value,
        df,
        expected,
        grand_total,
        rows,
        cols,
    })
}
