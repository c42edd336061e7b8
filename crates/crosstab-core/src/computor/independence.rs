//! Chi-square test of independence.
//!
//! Association between the row variable and the column variable of a 2-D
//! contingency table.

use crate::computor::{LOW_EXPECTED_CELL_NOTE, any_expected_below_five};
use crate::effect;
use crate::error::EngineError;
use crate::interpret::interpret;
use crate::report::{ContingencyReport, Df, TestReport};
use crate::request::TestRequest;
use crate::sanitize;
use crate::table;

const NULL_HYPOTHESIS: &str =
    "There is no association between the variables 'Codes' and 'Documents'.";
const ALTERNATIVE_HYPOTHESIS: &str =
    "There is a significant association between the variables 'Codes' and 'Documents'.";
const POSITIVE_CONCLUSION: &str = "The analysis suggests a significant association \
     exists between your selected codes and documents.";
const NEGATIVE_CONCLUSION: &str = "There is no statistical evidence of an association \
     between your selected codes and documents.";

/// Run the independence procedure.
pub fn run(request: &TestRequest) -> Result<TestReport, EngineError> {
    let cells = table::contingency_cells(&request.observed)?;
    let stats = table::contingency_statistics(cells)?;

    let statistic = sanitize::finite(stats.chi2);
    let cramers_v = effect::cramers_v(statistic, stats.grand_total, stats.rows, stats.cols);

    let notes = if any_expected_below_five(&stats.expected) {
        LOW_EXPECTED_CELL_NOTE
    } else {
        ""
    };
    let interpretation = interpret(
        stats.p_value,
        POSITIVE_CONCLUSION,
        NEGATIVE_CONCLUSION,
        notes,
    );

    Ok(TestReport::Contingency(ContingencyReport {
        test: "Chi-Square Test",
        subtype: "Independence",
        statistic,
        p_value: sanitize::finite(stats.p_value),
        df: Df::Count(stats.df),
        cramers_v,
        sample_size: stats.grand_total as u64,
        observed_table: cells.to_vec(),
        expected_table: stats.expected,
        row_labels: request.row_labels.clone(),
        col_labels: request.col_labels.clone(),
        null_hypothesis: NULL_HYPOTHESIS.to_string(),
        alternative_hypothesis: ALTERNATIVE_HYPOTHESIS.to_string(),
        interpretation,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Observed;

    fn request(rows: &[&[f64]]) -> TestRequest {
        TestRequest {
            observed: Observed::Table(rows.iter().map(|r| r.to_vec()).collect()),
            row_labels: vec!["Code A".to_string(), "Code B".to_string()],
            col_labels: vec!["Doc 1".to_string(), "Doc 2".to_string()],
            ..TestRequest::default()
        }
    }

    fn unwrap_contingency(report: TestReport) -> ContingencyReport {
        match report {
            TestReport::Contingency(r) => r,
            _ => panic!("wrong report shape"),
        }
    }

    #[test]
    fn test_perfect_association() {
        let report = unwrap_contingency(run(&request(&[&[10.0, 0.0], &[0.0, 10.0]])).unwrap());
        assert!((report.statistic.unwrap() - 20.0).abs() < 1e-12);
        assert!((report.p_value.unwrap() - 7.744216431044084e-6).abs() < 1e-14);
        assert!((report.cramers_v.unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(report.df, Df::Count(1));
        assert_eq!(report.sample_size, 20);
        // Every expected cell lands on exactly 5, which does not trip the
        // strict below-5 caveat.
        assert_eq!(report.expected_table, vec![vec![5.0, 5.0], vec![5.0, 5.0]]);
        assert!(!report.interpretation.contains("Note:"));
        assert!(report.interpretation.contains("we reject the null hypothesis"));
    }

    #[test]
    fn test_reference_values() {
        let report = unwrap_contingency(run(&request(&[&[30.0, 10.0], &[20.0, 40.0]])).unwrap());
        assert!((report.statistic.unwrap() - 16.666666666666668).abs() < 1e-12);
        assert!((report.p_value.unwrap() - 4.455709060405617e-5).abs() < 1e-14);
        assert!((report.cramers_v.unwrap() - 0.408248290463863).abs() < 1e-12);
    }

    #[test]
    fn test_small_cells_carry_note() {
        let report = unwrap_contingency(run(&request(&[&[4.0, 2.0], &[3.0, 5.0]])).unwrap());
        assert!((report.statistic.unwrap() - 1.1666666666666667).abs() < 1e-12);
        assert!((report.p_value.unwrap() - 0.2800872108114977).abs() < 1e-12);
        assert!(report.interpretation.contains(LOW_EXPECTED_CELL_NOTE));
        assert!(report.interpretation.contains("fail to reject"));
    }

    #[test]
    fn test_fixed_hypotheses() {
        let report = unwrap_contingency(run(&request(&[&[25.0, 15.0], &[15.0, 25.0]])).unwrap());
        assert_eq!(
            report.null_hypothesis,
            "There is no association between the variables 'Codes' and 'Documents'."
        );
        assert_eq!(
            report.alternative_hypothesis,
            "There is a significant association between the variables 'Codes' and 'Documents'."
        );
        assert!((report.p_value.unwrap() - 0.025347318677468218).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_single_row() {
        let report = unwrap_contingency(run(&request(&[&[5.0, 3.0, 2.0]])).unwrap());
        assert_eq!(report.statistic, Some(0.0));
        assert_eq!(report.p_value, Some(1.0));
        assert_eq!(report.df, Df::Count(0));
        assert_eq!(report.cramers_v, Some(0.0));
        assert!(report.interpretation.contains("fail to reject"));
    }

    #[test]
    fn test_validation_errors_in_order() {
        let empty = TestRequest::default();
        assert_eq!(
            run(&empty).unwrap_err(),
            EngineError::Validation("No observed data provided".to_string())
        );

        let zeros = request(&[&[0.0, 0.0], &[0.0, 0.0]]);
        assert_eq!(
            run(&zeros).unwrap_err(),
            EngineError::Validation("All observed values are zero".to_string())
        );

        let flat = TestRequest {
            observed: Observed::Counts(vec![1.0, 2.0, 3.0]),
            ..TestRequest::default()
        };
        assert_eq!(
            run(&flat).unwrap_err(),
            EngineError::Validation("Observed data must be a 2D contingency table".to_string())
        );
    }

    #[test]
    fn test_zero_column_is_rejected() {
        let err = run(&request(&[&[3.0, 0.0], &[4.0, 0.0]])).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation(
                "The internally computed table of expected frequencies \
                 has a zero element at (0, 1)."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_negative_cells_are_rejected() {
        let err = run(&request(&[&[1.0, -2.0], &[3.0, 4.0]])).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("All values in `observed` must be nonnegative.".to_string())
        );
    }

    #[test]
    fn test_fractional_counts_are_accepted() {
        let report = unwrap_contingency(
            run(&request(&[&[2.5, 2.5], &[2.5, 2.5]])).unwrap(),
        );
        assert_eq!(report.statistic, Some(0.0));
        assert_eq!(report.sample_size, 10);
    }
}
