//! Per-agreement detail views for a selected party.

use serde::Serialize;

use crate::party;
use crate::record::AgreementRecord;

/// Display-ready view of one agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgreementDetail {
    pub title: String,
    pub date: String,
    pub parties: String,
    pub sector: String,
    pub policy_domain: String,
    pub form_of_cooperation: String,
    pub quotes: String,
    pub military_alliance: String,
    pub free_trade_agreement: String,
    /// Only present when the source row carried corpus text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus: Option<String>,
}

impl From<&AgreementRecord> for AgreementDetail {
    fn from(record: &AgreementRecord) -> Self {
        Self {
            title: record.title.clone(),
            date: record.iso_date(),
            parties: record.parties_cell(),
            sector: record.sector.join(", "),
            policy_domain: record.policy_domain.join(", "),
            form_of_cooperation: record.form_of_cooperation.clone(),
            quotes: record.quotes.clone().unwrap_or_default(),
            military_alliance: record.military_alliance.to_string(),
            free_trade_agreement: record.free_trade_agreement.to_string(),
            corpus: record.corpus.clone(),
        }
    }
}

/// Every agreement whose party list mentions `party`, in input order.
///
/// Matching is a substring test on normalized party keys, the same keys the
/// graph merges nodes by. Selecting `"Korea"` also lists agreements signed
/// by `"Republic of Korea"`, and every spelling folded into one node is
/// found. A blank name matches nothing.
#[must_use]
pub fn agreements_involving<'a>(
    records: &'a [AgreementRecord],
    name: &str,
) -> Vec<&'a AgreementRecord> {
    let needle = party::key(name);
    if needle.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|record| {
            record
                .parties
                .iter()
                .any(|p| party::key(p).contains(&needle))
        })
        .collect()
}
