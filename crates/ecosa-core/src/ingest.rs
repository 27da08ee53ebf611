//! Row ingestion and validation.
//!
//! # Overview
//!
//! Source tables arrive as loosely typed rows keyed by spreadsheet column
//! names (`Title`, `Date`, `Parties`, `Policy Domain`, ...). Each row is
//! validated exactly once here and turned into an [`AgreementRecord`]; the
//! rest of the pipeline never touches raw cells.
//!
//! ## Cell shapes
//!
//! - `Parties`, `Sector`, `Policy Domain`: a `;`-delimited string or a list
//!   of strings. Anything else is a [`Error::MalformedRecord`].
//! - `Date`: `YYYY-MM-DD`, optionally followed by a time (`T` or space
//!   separated), or an RFC 3339 timestamp. Absent dates are
//!   [`Error::MissingField`].
//! - `null` cells are treated as absent.
//!
//! ## Policies
//!
//! [`IngestPolicy::Tolerant`] skips rows that fail validation, logs them at
//! `warn` and lists them in [`IngestReport::rejected`]. [`IngestPolicy::Strict`]
//! stops at the first bad row.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::party;
use crate::record::{AgreementRecord, Membership};

/// One source row with its cells still untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Title", default)]
    pub title: Option<Value>,
    #[serde(rename = "Date", default)]
    pub date: Option<Value>,
    #[serde(rename = "Parties", default)]
    pub parties: Option<Value>,
    #[serde(rename = "Sector", default)]
    pub sector: Option<Value>,
    #[serde(rename = "Policy Domain", default)]
    pub policy_domain: Option<Value>,
    #[serde(rename = "Form of Cooperation", default)]
    pub form_of_cooperation: Option<Value>,
    #[serde(rename = "Quote(s)", default)]
    pub quotes: Option<Value>,
    #[serde(rename = "Military Alliance", default)]
    pub military_alliance: Option<Value>,
    #[serde(rename = "Free Trade Agreement", default)]
    pub free_trade_agreement: Option<Value>,
    #[serde(rename = "Corpus", default)]
    pub corpus: Option<Value>,
}

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IngestPolicy {
    #[default]
    Tolerant,
    Strict,
}

/// A row dropped by tolerant ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    pub code: &'static str,
    pub message: String,
}

/// Outcome of ingesting a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub records: Vec<AgreementRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl IngestReport {
    /// Records whose party list came out empty.
    #[must_use]
    pub fn partyless_count(&self) -> usize {
        self.records.iter().filter(|r| !r.has_parties()).count()
    }
}

/// Validate a single row.
///
/// # Errors
///
/// Returns [`Error::MissingField`] when `Title` or `Date` is absent,
/// [`Error::InvalidDate`] when the date cannot be parsed, and
/// [`Error::MalformedRecord`] when a cell has the wrong shape.
pub fn validate(row: usize, raw: RawRecord) -> Result<AgreementRecord> {
    let title = text(row, "Title", raw.title)?.ok_or(Error::MissingField {
        row,
        field: "Title",
    })?;
    let date = match raw.date {
        None | Some(Value::Null) => {
            return Err(Error::MissingField { row, field: "Date" });
        }
        Some(value) => parse_date_cell(row, &value)?,
    };

    let parties = party::dedup(list(row, "Parties", raw.parties)?);
    let sector = list(row, "Sector", raw.sector)?;
    let policy_domain = list(row, "Policy Domain", raw.policy_domain)?;
    let form_of_cooperation =
        text(row, "Form of Cooperation", raw.form_of_cooperation)?.unwrap_or_default();
    let quotes = text(row, "Quote(s)", raw.quotes)?.filter(|q| !q.is_empty());
    let corpus = text(row, "Corpus", raw.corpus)?.filter(|c| !c.is_empty());
    let military_alliance = text(row, "Military Alliance", raw.military_alliance)?
        .map(|v| Membership::parse(&v))
        .unwrap_or_default();
    let free_trade_agreement = text(row, "Free Trade Agreement", raw.free_trade_agreement)?
        .map(|v| Membership::parse(&v))
        .unwrap_or_default();

    Ok(AgreementRecord {
        row,
        title,
        date,
        parties,
        sector,
        policy_domain,
        form_of_cooperation,
        quotes,
        military_alliance,
        free_trade_agreement,
        corpus,
    })
}

/// Validate a sequence of typed raw rows.
///
/// # Errors
///
/// Under [`IngestPolicy::Strict`], returns the first row-level error.
#[instrument(skip(rows))]
pub fn ingest<I>(rows: I, policy: IngestPolicy) -> Result<IngestReport>
where
    I: IntoIterator<Item = RawRecord>,
{
    ingest_results(
        rows.into_iter()
            .enumerate()
            .map(|(row, raw)| validate(row, raw)),
        policy,
    )
}

/// Validate untyped JSON rows. Elements that are not objects are malformed.
///
/// # Errors
///
/// Under [`IngestPolicy::Strict`], returns the first row-level error.
#[instrument(skip(rows))]
pub fn ingest_values(rows: Vec<Value>, policy: IngestPolicy) -> Result<IngestReport> {
    ingest_results(
        rows.into_iter().enumerate().map(|(row, value)| {
            if !value.is_object() {
                return Err(Error::MalformedRecord {
                    row,
                    reason: format!("expected an object, found {}", kind_of(&value)),
                });
            }
            let raw: RawRecord =
                serde_json::from_value(value).map_err(|e| Error::MalformedRecord {
                    row,
                    reason: e.to_string(),
                })?;
            validate(row, raw)
        }),
        policy,
    )
}

/// Parse a JSON array of rows from a string.
///
/// # Errors
///
/// Returns [`Error::Json`] if the text is not a JSON array, plus any error
/// [`ingest_values`] raises.
pub fn ingest_json_str(json: &str, policy: IngestPolicy) -> Result<IngestReport> {
    let rows: Vec<Value> = serde_json::from_str(json)?;
    ingest_values(rows, policy)
}

/// Read and ingest a JSON file holding an array of rows.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, otherwise as
/// [`ingest_json_str`].
pub fn load_json(path: &Path, policy: IngestPolicy) -> Result<IngestReport> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ingest_json_str(&content, policy)
}

fn ingest_results<I>(results: I, policy: IngestPolicy) -> Result<IngestReport>
where
    I: Iterator<Item = Result<AgreementRecord>>,
{
    let mut report = IngestReport::default();

    for result in results {
        match result {
            Ok(record) => {
                if !record.has_parties() {
                    debug!(row = record.row, title = %record.title, "record has no parties");
                }
                report.records.push(record);
            }
            Err(err) if policy == IngestPolicy::Tolerant && err.is_row_level() => {
                warn!(error = %err, "skipping row");
                report.rejected.push(RejectedRow {
                    row: row_of(&err),
                    code: err.code().code(),
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        accepted = report.records.len(),
        rejected = report.rejected.len(),
        "ingestion finished"
    );
    Ok(report)
}

const fn row_of(err: &Error) -> usize {
    match err {
        Error::MalformedRecord { row, .. }
        | Error::MissingField { row, .. }
        | Error::InvalidDate { row, .. } => *row,
        _ => 0,
    }
}

/// Parse a date string in any of the accepted layouts.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(stamp.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|stamp| stamp.date_naive())
}

fn parse_date_cell(row: usize, value: &Value) -> Result<NaiveDate> {
    let parsed = value.as_str().and_then(parse_date);
    parsed.ok_or_else(|| Error::InvalidDate {
        row,
        value: value
            .as_str()
            .map_or_else(|| value.to_string(), ToString::to_string),
    })
}

/// Scalar cell as cleaned text. Numbers and booleans are stringified.
fn text(row: usize, field: &str, value: Option<Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(other) => Err(Error::MalformedRecord {
            row,
            reason: format!("{field} must be text, found {}", kind_of(&other)),
        }),
    }
}

/// List cell: a delimited string or an array of strings.
fn list(row: usize, field: &str, value: Option<Value>) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(party::split(&s)),
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                Value::String(s) => Ok(party::clean(&s)),
                other => Err(Error::MalformedRecord {
                    row,
                    reason: format!("{field} list holds a {}", kind_of(&other)),
                }),
            })
            .filter(|item| !matches!(item, Ok(s) if s.is_empty()))
            .collect(),
        Some(other) => Err(Error::MalformedRecord {
            row,
            reason: format!(
                "{field} must be a delimited string or a list, found {}",
                kind_of(&other)
            ),
        }),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRecord {
        serde_json::from_value(value).expect("raw record")
    }

    fn base() -> Value {
        json!({
            "Title": "Paris Accord",
            "Date": "2015-12-12",
            "Parties": "France; Germany ; Italy",
            "Sector": "Energy;Climate",
            "Policy Domain": ["Environment"],
            "Form of Cooperation": "Treaty",
            "Quote(s)": "",
            "Military Alliance": "No",
            "Free Trade Agreement": "Some members",
            "Corpus": null
        })
    }

    #[test]
    fn valid_row_becomes_record() {
        let record = validate(0, row(base())).expect("valid");
        assert_eq!(record.title, "Paris Accord");
        assert_eq!(record.iso_date(), "2015-12-12");
        assert_eq!(record.parties, ["France", "Germany", "Italy"]);
        assert_eq!(record.sector, ["Energy", "Climate"]);
        assert_eq!(record.policy_domain, ["Environment"]);
        assert_eq!(record.quotes, None);
        assert_eq!(record.corpus, None);
        assert_eq!(record.military_alliance, Membership::No);
        assert_eq!(record.free_trade_agreement, Membership::SomeMembers);
    }

    #[test]
    fn parties_list_is_accepted_and_deduplicated() {
        let mut value = base();
        value["Parties"] = json!([" France", "france", "Spain", null]);
        let record = validate(0, row(value)).expect("valid");
        assert_eq!(record.parties, ["France", "Spain"]);
    }

    #[test]
    fn numeric_parties_is_malformed() {
        let mut value = base();
        value["Parties"] = json!(42);
        let err = validate(7, row(value)).expect_err("malformed");
        assert!(matches!(err, Error::MalformedRecord { row: 7, .. }), "{err}");
    }

    #[test]
    fn missing_date_is_missing_field() {
        let mut value = base();
        value.as_object_mut().expect("object").remove("Date");
        let err = validate(2, row(value)).expect_err("missing");
        assert!(matches!(err, Error::MissingField { row: 2, field: "Date" }));
    }

    #[test]
    fn unparseable_date_is_reported_verbatim() {
        let mut value = base();
        value["Date"] = json!("12/12/2015");
        let err = validate(0, row(value)).expect_err("bad date");
        assert!(matches!(err, Error::InvalidDate { ref value, .. } if value == "12/12/2015"));
    }

    #[test]
    fn timestamp_dates_are_truncated() {
        assert_eq!(
            parse_date("2019-05-01 00:00:00"),
            NaiveDate::from_ymd_opt(2019, 5, 1)
        );
        assert_eq!(
            parse_date("2019-05-01T13:45:00.000"),
            NaiveDate::from_ymd_opt(2019, 5, 1)
        );
        assert_eq!(
            parse_date("2019-05-01T13:45:00+02:00"),
            NaiveDate::from_ymd_opt(2019, 5, 1)
        );
        assert_eq!(parse_date("soon"), None);
    }

    #[test]
    fn empty_parties_is_kept_not_rejected() {
        let mut value = base();
        value["Parties"] = Value::Null;
        let report = ingest_values(vec![value], IngestPolicy::Strict).expect("ingest");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.partyless_count(), 1);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn tolerant_policy_skips_bad_rows() {
        let mut bad = base();
        bad["Parties"] = json!({"a": 1});
        let rows = vec![base(), bad, json!("not a row"), base()];

        let report = ingest_values(rows, IngestPolicy::Tolerant).expect("tolerant");
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[1].row, 3);
        let rejected: Vec<usize> = report.rejected.iter().map(|r| r.row).collect();
        assert_eq!(rejected, [1, 2]);
        assert_eq!(report.rejected[0].code, "E1001");
    }

    #[test]
    fn strict_policy_stops_at_first_bad_row() {
        let mut bad = base();
        bad["Title"] = Value::Null;
        let err = ingest_values(vec![base(), bad], IngestPolicy::Strict).expect_err("strict");
        assert!(matches!(err, Error::MissingField { row: 1, field: "Title" }));
    }

    #[test]
    fn non_array_json_is_rejected() {
        let err = ingest_json_str("{\"Title\": \"x\"}", IngestPolicy::Tolerant)
            .expect_err("not an array");
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn load_json_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rows.json");
        std::fs::write(&path, serde_json::to_string(&vec![base()]).expect("json"))
            .expect("write");

        let report = load_json(&path, IngestPolicy::Strict).expect("load");
        assert_eq!(report.records.len(), 1);

        let missing = load_json(&dir.path().join("nope.json"), IngestPolicy::Strict);
        assert!(matches!(missing, Err(Error::Io { .. })));
    }
}
