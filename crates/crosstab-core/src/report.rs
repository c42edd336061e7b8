//! Outbound result records.
//!
//! Wire field names are camelCase. Scalar statistics are `Option<f64>` with
//! `None` as the absent marker; the sanitation gateway guarantees nothing
//! non-finite survives encoding.

use serde::{Serialize, Serializer};

/// Degrees of freedom: a count for the chi-square procedures, the literal
/// string `"N/A"` for Fisher's exact test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Df {
    Count(u64),
    NotApplicable,
}

impl Serialize for Df {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Df::Count(n) => serializer.serialize_u64(*n),
            Df::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record shapes
// ---------------------------------------------------------------------------

/// Goodness-of-fit result record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodnessOfFitReport {
    pub test: &'static str,
    pub subtype: &'static str,
    pub statistic: Option<f64>,
    pub p_value: Option<f64>,
    pub df: Df,
    pub sample_size: u64,
    pub observed_counts: Vec<f64>,
    pub expected_counts: Vec<f64>,
    pub category_labels: Vec<String>,
    pub null_hypothesis: String,
    pub alternative_hypothesis: String,
    pub interpretation: String,
}

/// Result record shared by the independence and homogeneity procedures,
/// which differ only in narrative.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContingencyReport {
    pub test: &'static str,
    pub subtype: &'static str,
    pub statistic: Option<f64>,
    pub p_value: Option<f64>,
    pub df: Df,
    pub cramers_v: Option<f64>,
    pub sample_size: u64,
    pub observed_table: Vec<Vec<f64>>,
    pub expected_table: Vec<Vec<f64>>,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub null_hypothesis: String,
    pub alternative_hypothesis: String,
    pub interpretation: String,
}

/// Fisher's exact test result record. The statistic is the odds ratio, so
/// the record carries a label for it and no expected table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FisherExactReport {
    pub test: &'static str,
    pub subtype: &'static str,
    pub statistic: Option<f64>,
    pub statistic_label: &'static str,
    pub p_value: Option<f64>,
    pub df: Df,
    pub sample_size: u64,
    pub observed_table: Vec<Vec<f64>>,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub null_hypothesis: String,
    pub alternative_hypothesis: String,
    pub interpretation: String,
}

/// Any of the family's result records.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TestReport {
    GoodnessOfFit(GoodnessOfFitReport),
    Contingency(ContingencyReport),
    FisherExact(FisherExactReport),
}

impl TestReport {
    /// The statistic field, whichever shape carries it.
    pub fn statistic(&self) -> Option<f64> {
        match self {
            TestReport::GoodnessOfFit(r) => r.statistic,
            TestReport::Contingency(r) => r.statistic,
            TestReport::FisherExact(r) => r.statistic,
        }
    }

    /// The p-value field.
    pub fn p_value(&self) -> Option<f64> {
        match self {
            TestReport::GoodnessOfFit(r) => r.p_value,
            TestReport::Contingency(r) => r.p_value,
            TestReport::FisherExact(r) => r.p_value,
        }
    }

    /// Degrees of freedom.
    pub fn df(&self) -> Df {
        match self {
            TestReport::GoodnessOfFit(r) => r.df,
            TestReport::Contingency(r) => r.df,
            TestReport::FisherExact(r) => r.df,
        }
    }

    /// The interpretation sentence.
    pub fn interpretation(&self) -> &str {
        match self {
            TestReport::GoodnessOfFit(r) => &r.interpretation,
            TestReport::Contingency(r) => &r.interpretation,
            TestReport::FisherExact(r) => &r.interpretation,
        }
    }
}
