//! Distribution primitives.
//!
//! Thin wrappers over statrs that pin down the edge behavior the computors
//! rely on, so the call sites stay free of case analysis.

use statrs::distribution::{ChiSquared, ContinuousCDF, Discrete, Hypergeometric};

/// Upper-tail probability of the chi-square distribution.
///
/// Degenerate inputs resolve instead of erroring: a NaN statistic or a
/// non-positive df yields NaN, which the sanitation gateway turns into the
/// absent marker; an infinite statistic yields 0.0, since an unbounded
/// deviation leaves no tail mass.
pub fn chi_square_sf(statistic: f64, df: f64) -> f64 {
    if statistic.is_nan() || !(df > 0.0) {
        return f64::NAN;
    }
    if statistic == f64::INFINITY {
        return 0.0;
    }
    match ChiSquared::new(df) {
        Ok(dist) => dist.sf(statistic),
        Err(_) => f64::NAN,
    }
}

/// Point probability of the hypergeometric distribution.
///
/// `population` items of which `successes` are marked, `draws` taken without
/// replacement; probability of drawing exactly `k` marked items. NaN when
/// the parameters are inconsistent.
pub fn hypergeometric_pmf(population: u64, successes: u64, draws: u64, k: u64) -> f64 {
    match Hypergeometric::new(population, successes, draws) {
        Ok(dist) => dist.pmf(k),
        Err(_) => f64::NAN,
    }
}
