//! Chi-square test of homogeneity.
//!
//! Numerically identical to the independence procedure. The distinction is
//! the framing: rows are code counts, columns are groups, and the
//! hypotheses speak about distributions across groups. Row labels use a
//! `variable:level` convention and the narrative names the distinct
//! variable prefixes.

use std::collections::BTreeSet;

use crate::computor::{LOW_EXPECTED_CELL_NOTE, any_expected_below_five};
use crate::effect;
use crate::error::EngineError;
use crate::interpret::{interpret, quoted_list};
use crate::report::{ContingencyReport, Df, TestReport};
use crate::request::TestRequest;
use crate::sanitize;
use crate::table;

const POSITIVE_CONCLUSION: &str = "The analysis suggests that the frequency distribution \
     of codes is significantly different across the defined groups.";
const NEGATIVE_CONCLUSION: &str = "There is no statistical evidence that the frequency \
     distribution of codes differs across the defined groups.";

/// Run the homogeneity procedure.
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

    let group_name = quoted_list(&request.col_labels);
    // Row labels follow a "variable:level" convention; the hypotheses name
    // each distinct variable once, in sorted order.
    let variables: BTreeSet<&str> = request
        .row_labels
        .iter()
        .map(|label| label.split(':').next().unwrap_or(""))
        .collect();
    let codes_label = if variables.len() > 1 { "codes" } else { "code" };
    let var_name = quoted_list(&variables);

    Ok(TestReport::Contingency(ContingencyReport {
        test: "Chi-Square Test",
        subtype: "Homogeneity",
        statistic,
        p_value: sanitize::finite(stats.p_value),
        df: Df::Count(stats.df),
        cramers_v,
        sample_size: stats.grand_total as u64,
        observed_table: cells.to_vec(),
        expected_table: stats.expected,
        row_labels: request.row_labels.clone(),
        col_labels: request.col_labels.clone(),
        null_hypothesis: format!(
            "The distribution of the {codes_label} ({var_name}) is the same \
             across all groups ({group_name})."
        ),
        alternative_hypothesis: format!(
            "The distribution of the {codes_label} ({var_name}) is different \
             for at least one group in ({group_name})."
        ),
        interpretation,
    }))
}
