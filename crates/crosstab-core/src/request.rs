//! Inbound request model.
//!
//! Every field is optional at the serde layer and defaults to an empty
//! value. The computors own validation, so a missing or empty field
//! produces the engine's own message instead of a deserializer error.

use std::collections::HashMap;

use serde::Deserialize;

/// A single hypothesis-test request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestRequest {
    /// Test family selector. Only `"chi-square"` is routable.
    pub test_type: Option<String>,
    /// Procedure within the family.
    pub subtype: Option<String>,
    /// Observed counts, flat or tabular.
    pub observed: Observed,
    /// Expected-distribution specification (goodness-of-fit only).
    pub distribution: Distribution,
    /// Category identifiers aligned with the observed counts
    /// (goodness-of-fit with a custom distribution).
    pub codes: Vec<CodeId>,
    /// Category names for goodness-of-fit narrative text.
    pub category_labels: Vec<String>,
    /// Row names for contingency-table narrative text.
    pub row_labels: Vec<String>,
    /// Column names for contingency-table narrative text.
    pub col_labels: Vec<String>,
}

/// Observed counts: a 1-D sequence for goodness-of-fit, a 2-D table for the
/// contingency tests. An untyped `[]` parses as the empty flat form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Observed {
    Counts(Vec<f64>),
    Table(Vec<Vec<f64>>),
}

impl Default for Observed {
    fn default() -> Self {
        Observed::Counts(Vec::new())
    }
}

impl Observed {
    /// Number of scalar cells across either shape.
    pub fn cell_count(&self) -> usize {
        match self {
            Observed::Counts(counts) => counts.len(),
            Observed::Table(rows) => rows.iter().map(Vec::len).sum(),
        }
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        match self {
            Observed::Counts(counts) => counts.iter().sum(),
            Observed::Table(rows) => rows.iter().flatten().sum(),
        }
    }
}

/// Expected-distribution specification for goodness-of-fit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Distribution {
    /// `"uniform"` or `"custom"`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Category id to percentage of the total, keyed by the id's decimal
    /// rendering. Categories missing from the map get an expected count of
    /// zero.
    pub proportions: HashMap<String, f64>,
}

/// Category identifier. Clients send these as JSON strings or numbers; both
/// resolve to the same string key into the proportions map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CodeId {
    Text(String),
    Number(serde_json::Number),
}

impl CodeId {
    /// Key used to look this code up in [`Distribution::proportions`].
    pub fn key(&self) -> String {
        match self {
            CodeId::Text(text) => text.clone(),
            CodeId::Number(number) => number.to_string(),
        }
    }
}
