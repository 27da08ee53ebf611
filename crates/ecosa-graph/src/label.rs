//! Hover labels and the reverse lookup used when a label is clicked.

use ecosa_core::MetricKind;

use crate::metrics::MetricValue;

const DELIMITER: &str = " has ";

/// `"<name> has <metric phrase>: <value>"`.
///
/// Counts print as integers, scores with four decimals.
#[must_use]
pub fn node_label(name: &str, metric: MetricKind, value: MetricValue) -> String {
    format!("{name}{DELIMITER}{}: {value}", metric.label_phrase())
}

/// Recover the party name from a label built by [`node_label`].
///
/// Splits on the last `" has "`, so party names that themselves contain
/// "has" survive. Returns `None` when the delimiter is missing or the name
/// part is empty.
#[must_use]
pub fn parse_node_label(label: &str) -> Option<&str> {
    let at = label.rfind(DELIMITER)?;
    let name = label[..at].trim();
    (!name.is_empty()).then_some(name)
}
