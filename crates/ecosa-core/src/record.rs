//! Validated agreement records.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Tri-state membership flag used by the Military Alliance and Free Trade
/// Agreement columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    Yes,
    No,
    SomeMembers,
    /// Any other value, kept verbatim (empty when the cell was blank).
    Unknown(String),
}

impl Membership {
    /// Parse a cell value; matching is case-insensitive and whitespace-tolerant.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let cleaned = crate::party::clean(raw);
        match cleaned.to_lowercase().as_str() {
            "yes" => Self::Yes,
            "no" => Self::No,
            "some members" | "some" => Self::SomeMembers,
            _ => Self::Unknown(cleaned),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::SomeMembers => "Some members",
            Self::Unknown(raw) => raw,
        }
    }
}

impl Default for Membership {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cooperation agreement, validated at ingestion.
///
/// `parties` holds cleaned, de-duplicated names in source order. It may be
/// empty: such records still show up in detail views but contribute nothing
/// to the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementRecord {
    /// Zero-based position in the source table.
    pub row: usize,
    pub title: String,
    pub date: NaiveDate,
    pub parties: Vec<String>,
    pub sector: Vec<String>,
    pub policy_domain: Vec<String>,
    pub form_of_cooperation: String,
    pub quotes: Option<String>,
    pub military_alliance: Membership,
    pub free_trade_agreement: Membership,
    pub corpus: Option<String>,
}

impl AgreementRecord {
    /// ISO 8601 calendar date, e.g. `2021-03-04`.
    #[must_use]
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    #[must_use]
    pub fn has_parties(&self) -> bool {
        !self.parties.is_empty()
    }

    /// The parties rejoined into a single delimited cell.
    #[must_use]
    pub fn parties_cell(&self) -> String {
        self.parties.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_parses_known_values() {
        assert_eq!(Membership::parse("Yes"), Membership::Yes);
        assert_eq!(Membership::parse(" no "), Membership::No);
        assert_eq!(Membership::parse("Some  Members"), Membership::SomeMembers);
        assert_eq!(
            Membership::parse("pending"),
            Membership::Unknown("pending".to_string())
        );
        assert_eq!(Membership::parse("").as_str(), "");
    }

    #[test]
    fn iso_date_is_zero_padded() {
        let record = AgreementRecord {
            row: 0,
            title: "Accord".to_string(),
            date: NaiveDate::from_ymd_opt(2003, 2, 7).expect("valid date"),
            parties: vec!["A".to_string(), "B".to_string()],
            sector: vec![],
            policy_domain: vec![],
            form_of_cooperation: String::new(),
            quotes: None,
            military_alliance: Membership::No,
            free_trade_agreement: Membership::Yes,
            corpus: None,
        };
        assert_eq!(record.iso_date(), "2003-02-07");
        assert_eq!(record.year(), 2003);
        assert_eq!(record.parties_cell(), "A; B");
    }
}
