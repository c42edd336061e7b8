//! Decision narrative.
//!
//! One fixed significance threshold and two fixed sentence templates shared
//! by every test in the family. Each computor supplies its own conclusion
//! pair and optional caveat note; the framing around them never varies.

/// Significance threshold applied to every p-value.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Build the interpretation sentence for a test outcome.
///
/// `p_value < 0.05` selects the significant branch. The boundary value
/// itself and a NaN p-value (an undefined statistic) both read as not
/// significant. A non-empty caveat note is appended after the conclusion.
pub fn interpret(p_value: f64, positive: &str, negative: &str, notes: &str) -> String {
    let mut text = if p_value < SIGNIFICANCE_LEVEL {
        format!(
            "The result is statistically significant (p < 0.05). \
             Therefore, we reject the null hypothesis. {positive}"
        )
    } else {
        format!(
            "The result is not statistically significant (p >= 0.05). \
             Therefore, we fail to reject the null hypothesis. {negative}"
        )
    };
    if !notes.is_empty() {
        text.push(' ');
        text.push_str(notes);
    }
    text
}

/// Quote and comma-join labels for hypothesis text: `'a', 'b', 'c'`.
pub fn quoted_list<I, S>(labels: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| format!("'{}'", label.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
