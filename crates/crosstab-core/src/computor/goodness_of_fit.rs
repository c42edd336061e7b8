//! Chi-square goodness-of-fit.
//!
//! Tests 1-D observed counts against a uniform expectation or a custom
//! percentage split keyed by category code.

use crate::error::EngineError;
use crate::interpret::{interpret, quoted_list};
use crate::report::{Df, GoodnessOfFitReport, TestReport};
use crate::request::{Observed, TestRequest};
use crate::sanitize;
use crate::stat;

/// Relative tolerance for the expected/observed total agreement check.
const TOTAL_AGREEMENT_RTOL: f64 = 1e-8;

const LOW_EXPECTED_NOTE: &str = "Note: At least one category had an expected frequency \
     below 5, which can reduce the accuracy of this test.";

/// Run the goodness-of-fit procedure.
pub fn run(request: &TestRequest) -> Result<TestReport, EngineError> {
    let observed = match &request.observed {
        Observed::Counts(counts) => counts.as_slice(),
        Observed::Table(_) => {
            return Err(EngineError::Validation(
                "Observed data must be a 1D sequence of counts".to_string(),
            ));
        }
    };
    if observed.is_empty() {
        return Err(EngineError::Validation(
            "No observed data provided".to_string(),
        ));
    }

    let total: f64 = observed.iter().sum();
    if total == 0.0 {
        return Err(EngineError::Validation(
            "Total observed count is zero".to_string(),
        ));
    }

    let (expected, dist_text) = expected_counts(request, observed, total)?;

    // The statistic is meaningless if the two distributions do not describe
    // the same number of observations.
    let expected_total: f64 = expected.iter().sum();
    if (expected_total - total).abs() > TOTAL_AGREEMENT_RTOL * total.abs() {
        return Err(EngineError::Validation(format!(
            "The sum of the expected counts ({expected_total}) must agree with \
             the sum of the observed counts ({total})"
        )));
    }

    let chi2: f64 = observed
        .iter()
        .zip(&expected)
        .map(|(o, e)| {
            let diff = o - e;
            diff * diff / e
        })
        .sum();
    let df = observed.len() as u64 - 1;
    let p_value = stat::chi_square_sf(chi2, df as f64);

    let notes = if expected.iter().any(|&e| e < 5.0) {
        LOW_EXPECTED_NOTE
    } else {
        ""
    };

    let categories_text = quoted_list(&request.category_labels);
    let positive = format!(
        "The frequencies of your categories ({categories_text}) are significantly \
         different from the expected {dist_text} distribution."
    );
    let negative = format!(
        "There is no statistical evidence that the frequencies of your categories \
         ({categories_text}) differ from the expected {dist_text} distribution."
    );
    let interpretation = interpret(p_value, &positive, &negative, notes);

    Ok(TestReport::GoodnessOfFit(GoodnessOfFitReport {
        test: "Chi-Square Test",
        subtype: "Goodness-of-Fit",
        statistic: sanitize::finite(chi2),
        p_value: sanitize::finite(p_value),
        df: Df::Count(df),
        sample_size: total as u64,
        observed_counts: observed.to_vec(),
        expected_counts: expected,
        category_labels: request.category_labels.clone(),
        null_hypothesis: format!(
            "The observed frequencies of the categories ({categories_text}) match \
             the expected {dist_text} distribution."
        ),
        alternative_hypothesis: format!(
            "The observed frequencies of the categories ({categories_text}) do not \
             match the expected {dist_text} distribution."
        ),
        interpretation,
    }))
}

/// Derive the expected counts from the requested distribution.
///
/// `uniform` splits the observed total evenly; `custom` multiplies the
/// total by each code's percentage, with codes missing from the
/// proportions map contributing an expected count of zero.
fn expected_counts(
    request: &TestRequest,
    observed: &[f64],
    total: f64,
) -> Result<(Vec<f64>, &'static str), EngineError> {
    match request.distribution.kind.as_deref() {
        Some("uniform") => {
            let even = total / observed.len() as f64;
            Ok((vec![even; observed.len()], "uniform"))
        }
        Some("custom") => {
            if request.codes.len() != observed.len() {
                return Err(EngineError::Validation(format!(
                    "Custom distribution requires one code per observed category \
                     (got {} codes for {} counts)",
                    request.codes.len(),
                    observed.len()
                )));
            }
            let expected = request
                .codes
                .iter()
                .map(|code| {
                    let percent = request
                        .distribution
                        .proportions
                        .get(&code.key())
                        .copied()
                        .unwrap_or(0.0);
                    total * (percent / 100.0)
                })
                .collect();
            Ok((expected, "specified custom"))
        }
        _ => Err(EngineError::Validation(
            "Invalid distribution type specified.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Distribution;
    use std::collections::HashMap;

    fn uniform_request(observed: Vec<f64>) -> TestRequest {
        TestRequest {
            observed: Observed::Counts(observed),
            distribution: Distribution {
                kind: Some("uniform".to_string()),
                proportions: HashMap::new(),
            },
            category_labels: vec!["a".to_string(), "b".to_string()],
            ..TestRequest::default()
        }
    }

    fn custom_request(
        observed: Vec<f64>,
        codes: &[i64],
        proportions: &[(&str, f64)],
    ) -> TestRequest {
        TestRequest {
            observed: Observed::Counts(observed),
            distribution: Distribution {
                kind: Some("custom".to_string()),
                proportions: proportions
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect(),
            },
            codes: serde_json::from_value(serde_json::json!(codes)).unwrap(),
            ..TestRequest::default()
        }
    }

    fn unwrap_gof(report: TestReport) -> GoodnessOfFitReport {
        match report {
            TestReport::GoodnessOfFit(r) => r,
            _ => panic!("wrong report shape"),
        }
    }

    #[test]
    fn test_uniform_exact_fit() {
        let report = unwrap_gof(run(&uniform_request(vec![10.0, 10.0, 10.0, 10.0])).unwrap());
        assert_eq!(report.statistic, Some(0.0));
        assert_eq!(report.p_value, Some(1.0));
        assert_eq!(report.df, Df::Count(3));
        assert_eq!(report.sample_size, 40);
        assert_eq!(report.expected_counts, vec![10.0, 10.0, 10.0, 10.0]);
        assert!(report.interpretation.contains("not statistically significant"));
        assert!(report.interpretation.contains("fail to reject"));
    }

    #[test]
    fn test_uniform_reference_statistic() {
        let report = unwrap_gof(run(&uniform_request(vec![12.0, 9.0, 11.0, 8.0])).unwrap());
        let statistic = report.statistic.unwrap();
        let p_value = report.p_value.unwrap();
        assert!((statistic - 1.0).abs() < 1e-12);
        assert!((p_value - 0.8012519569012008).abs() < 1e-12);
    }

    #[test]
    fn test_custom_proportions_reference() {
        let request = custom_request(
            vec![50.0, 30.0, 20.0],
            &[1, 2, 3],
            &[("1", 40.0), ("2", 35.0), ("3", 25.0)],
        );
        let report = unwrap_gof(run(&request).unwrap());
        assert!((report.statistic.unwrap() - 4.214285714285714).abs() < 1e-12);
        assert!((report.p_value.unwrap() - 0.12158485594365533).abs() < 1e-12);
        assert_eq!(report.expected_counts, vec![40.0, 35.0, 25.0]);
        assert_eq!(report.df, Df::Count(2));
    }

    #[test]
    fn test_missing_code_defaults_to_zero_expected() {
        // Proportions cover only codes 1 and 2, yet still sum to 100, so
        // the total check passes and the zero expected count drives the
        // statistic to infinity.
        let request = custom_request(
            vec![5.0, 5.0, 10.0],
            &[1, 2, 3],
            &[("1", 50.0), ("2", 50.0)],
        );
        let report = unwrap_gof(run(&request).unwrap());
        assert_eq!(report.expected_counts, vec![10.0, 10.0, 0.0]);
        assert_eq!(report.statistic, None);
        assert_eq!(report.p_value, Some(0.0));
        assert!(report.interpretation.contains("we reject the null hypothesis"));
        assert!(report.interpretation.contains("below 5"));
    }

    #[test]
    fn test_rejects_empty_observed() {
        let err = run(&uniform_request(vec![])).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("No observed data provided".to_string())
        );
    }

    #[test]
    fn test_rejects_zero_total() {
        let err = run(&uniform_request(vec![0.0, 0.0])).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("Total observed count is zero".to_string())
        );
    }

    #[test]
    fn test_rejects_tabular_observed() {
        let request = TestRequest {
            observed: Observed::Table(vec![vec![1.0, 2.0]]),
            ..uniform_request(vec![])
        };
        let err = run(&request).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("Observed data must be a 1D sequence of counts".to_string())
        );
    }

    #[test]
    fn test_rejects_unknown_distribution_type() {
        let mut request = uniform_request(vec![5.0, 5.0]);
        request.distribution.kind = Some("poisson".to_string());
        let err = run(&request).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("Invalid distribution type specified.".to_string())
        );

        request.distribution.kind = None;
        let err = run(&request).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("Invalid distribution type specified.".to_string())
        );
    }

    #[test]
    fn test_rejects_code_count_mismatch() {
        let request = custom_request(vec![5.0, 5.0, 5.0], &[1, 2], &[("1", 50.0), ("2", 50.0)]);
        let err = run(&request).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert!(err.to_string().contains("one code per observed category"));
    }

    #[test]
    fn test_rejects_disagreeing_totals() {
        let request = custom_request(
            vec![50.0, 50.0],
            &[1, 2],
            &[("1", 30.0), ("2", 30.0)],
        );
        let err = run(&request).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert!(err.to_string().contains("must agree with"));
    }

    #[test]
    fn test_low_expected_note_threshold() {
        // Expected counts of exactly 5 carry no caveat.
        let report = unwrap_gof(run(&uniform_request(vec![4.0, 6.0])).unwrap());
        assert!(!report.interpretation.contains("Note:"));

        let report = unwrap_gof(run(&uniform_request(vec![4.0, 5.0])).unwrap());
        assert!(report.interpretation.contains(
            "Note: At least one category had an expected frequency below 5"
        ));
    }

    #[test]
    fn test_labels_flow_into_hypotheses() {
        let mut request = uniform_request(vec![30.0, 70.0]);
        request.category_labels = vec!["spring".to_string(), "summer".to_string()];
        let report = unwrap_gof(run(&request).unwrap());
        assert_eq!(
            report.null_hypothesis,
            "The observed frequencies of the categories ('spring', 'summer') match \
             the expected uniform distribution."
        );
        assert_eq!(
            report.alternative_hypothesis,
            "The observed frequencies of the categories ('spring', 'summer') do not \
             match the expected uniform distribution."
        );
    }

    #[test]
    fn test_string_codes_resolve_proportions() {
        let request = TestRequest {
            observed: Observed::Counts(vec![30.0, 70.0]),
            distribution: Distribution {
                kind: Some("custom".to_string()),
                proportions: [("1".to_string(), 25.0), ("2".to_string(), 75.0)]
                    .into_iter()
                    .collect(),
            },
            codes: serde_json::from_value(serde_json::json!(["1", "2"])).unwrap(),
            ..TestRequest::default()
        };
        let report = unwrap_gof(run(&request).unwrap());
        assert_eq!(report.expected_counts, vec![25.0, 75.0]);
        assert!((report.statistic.unwrap() - 1.3333333333333333).abs() < 1e-12);
        assert!((report.p_value.unwrap() - 0.24821307898992384).abs() < 1e-12);
    }
}
