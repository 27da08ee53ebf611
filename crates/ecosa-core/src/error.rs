use std::fmt;
use std::path::PathBuf;

use crate::kind::MetricKind;

/// Machine-readable error codes for callers that branch on failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedRecord,
    MissingField,
    InvalidDate,
    LayoutFailure,
    MetricUndefined,
    ConfigParseError,
    InputUnreadable,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedRecord => "E1001",
            Self::MissingField => "E1002",
            Self::InvalidDate => "E1003",
            Self::LayoutFailure => "E2001",
            Self::MetricUndefined => "E2002",
            Self::ConfigParseError => "E3001",
            Self::InputUnreadable => "E3002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedRecord => "Malformed agreement record",
            Self::MissingField => "Required field missing",
            Self::InvalidDate => "Unparseable agreement date",
            Self::LayoutFailure => "Layout embedding failed",
            Self::MetricUndefined => "Metric undefined for this graph",
            Self::ConfigParseError => "Config file parse error",
            Self::InputUnreadable => "Input data could not be read",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedRecord => {
                Some("Parties must be a semicolon-delimited string or a list of strings.")
            }
            Self::MissingField => Some("Every row needs a Title and a Date."),
            Self::InvalidDate => Some("Use YYYY-MM-DD dates."),
            Self::LayoutFailure => Some("Pick a different layout or check the graph is non-empty."),
            Self::MetricUndefined => {
                Some("Widen the filter selection so at least two parties remain.")
            }
            Self::ConfigParseError => Some("Fix the TOML syntax in the config file and retry."),
            Self::InputUnreadable => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while ingesting records, building graphs and annotating them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("row {row}: malformed record: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: cannot parse date {value:?}")]
    InvalidDate { row: usize, value: String },

    #[error("layout `{layout}` failed: {reason}")]
    LayoutFailure { layout: String, reason: String },

    #[error("{metric} is undefined for a graph with {node_count} node(s)")]
    MetricUndefined {
        metric: MetricKind,
        node_count: usize,
    },

    #[error("failed to parse config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is not a JSON array of rows")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedRecord { .. } => ErrorCode::MalformedRecord,
            Self::MissingField { .. } => ErrorCode::MissingField,
            Self::InvalidDate { .. } => ErrorCode::InvalidDate,
            Self::LayoutFailure { .. } => ErrorCode::LayoutFailure,
            Self::MetricUndefined { .. } => ErrorCode::MetricUndefined,
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::Io { .. } | Self::Json(_) => ErrorCode::InputUnreadable,
        }
    }

    /// Whether tolerant ingestion may skip the offending row and continue.
    #[must_use]
    pub const fn is_row_level(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. } | Self::MissingField { .. } | Self::InvalidDate { .. }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
