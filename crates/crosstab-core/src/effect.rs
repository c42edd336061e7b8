//! Effect-size measures for contingency tables.

use crate::sanitize;

/// Cramér's V association strength for an `r x c` table.
///
/// Absent (`None`) when the chi-square statistic itself is absent or the
/// sample size is zero. A table with a single row or column cannot express
/// association, so its V is exactly `0.0`. Otherwise
/// `sqrt((chi2 / n) / min(r - 1, c - 1))`, routed through the sanitation
/// gateway like every derived scalar.
pub fn cramers_v(chi2: Option<f64>, n: f64, rows: usize, cols: usize) -> Option<f64> {
    let chi2 = chi2?;
    if n == 0.0 {
        return None;
    }
    let min_dim = rows.saturating_sub(1).min(cols.saturating_sub(1));
    if min_dim == 0 {
        return Some(0.0);
    }
    sanitize::finite(((chi2 / n) / min_dim as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_association_is_one() {
        // 2x2 diagonal table: chi2 = n, so V = 1.
        let v = cramers_v(Some(20.0), 20.0, 2, 2).unwrap();
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reference_value() {
        let v = cramers_v(Some(16.666666666666668), 100.0, 2, 2).unwrap();
        assert!((v - 0.408248290463863).abs() < 1e-12);
    }

    #[test]
    fn test_min_dim_uses_smaller_side() {
        // 2x3 table divides by min(1, 2) = 1.
        let v = cramers_v(Some(2.5446428571428568), 60.0, 2, 3).unwrap();
        assert!((v - 0.2059386177619785).abs() < 1e-12);
    }

    #[test]
    fn test_absent_chi2_gives_absent_v() {
        assert_eq!(cramers_v(None, 50.0, 2, 2), None);
    }

    #[test]
    fn test_zero_sample_gives_absent_v() {
        assert_eq!(cramers_v(Some(4.0), 0.0, 2, 2), None);
    }

    #[test]
    fn test_single_row_or_column_is_exactly_zero() {
        assert_eq!(cramers_v(Some(0.0), 16.0, 1, 4), Some(0.0));
        assert_eq!(cramers_v(Some(0.0), 16.0, 4, 1), Some(0.0));
    }

    #[test]
    fn test_negative_chi2_is_absent_not_nan() {
        // sqrt of a negative ratio sanitizes to the absent marker.
        assert_eq!(cramers_v(Some(-1.0), 10.0, 2, 2), None);
    }
}
