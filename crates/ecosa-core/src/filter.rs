//! Multi-select filtering over agreement records.
//!
//! Every facet is a set; an empty set means "all values". A record passes
//! when it matches every non-empty facet. List-valued columns (sector,
//! policy domain, parties) match when any of their entries is selected.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::party;
use crate::record::AgreementRecord;

/// A filter selection as chosen in the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub policy_domains: BTreeSet<String>,
    #[serde(default)]
    pub forms_of_cooperation: BTreeSet<String>,
    #[serde(default)]
    pub sectors: BTreeSet<String>,
    /// Matched by normalized party key, so case and spacing do not matter.
    #[serde(default)]
    pub parties: BTreeSet<String>,
    #[serde(default)]
    pub years: BTreeSet<i32>,
}

impl FilterSelection {
    /// No facet selected: every record passes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policy_domains.is_empty()
            && self.forms_of_cooperation.is_empty()
            && self.sectors.is_empty()
            && self.parties.is_empty()
            && self.years.is_empty()
    }

    /// Whether a single record passes. Prefer [`apply`](Self::apply) for a
    /// whole table; it normalizes the party facet once.
    #[must_use]
    pub fn matches(&self, record: &AgreementRecord) -> bool {
        self.matches_with(record, &self.party_keys())
    }

    /// Records that pass the selection, in input order.
    #[must_use]
    pub fn apply(&self, records: &[AgreementRecord]) -> Vec<AgreementRecord> {
        if self.is_empty() {
            return records.to_vec();
        }
        let wanted = self.party_keys();
        records
            .iter()
            .filter(|record| self.matches_with(record, &wanted))
            .cloned()
            .collect()
    }

    /// Normalized keys of the selected parties.
    fn party_keys(&self) -> BTreeSet<String> {
        self.parties.iter().map(|p| party::key(p)).collect()
    }

    fn matches_with(&self, record: &AgreementRecord, wanted: &BTreeSet<String>) -> bool {
        any_selected(&self.policy_domains, &record.policy_domain)
            && (self.forms_of_cooperation.is_empty()
                || self.forms_of_cooperation.contains(&record.form_of_cooperation))
            && any_selected(&self.sectors, &record.sector)
            && (wanted.is_empty() || record.parties.iter().any(|p| wanted.contains(&party::key(p))))
            && (self.years.is_empty() || self.years.contains(&record.year()))
    }

    /// Stable BLAKE3 key for caching whatever was built from this selection.
    ///
    /// Sets are ordered, so two selections with the same members produce
    /// the same key regardless of insertion order.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        let sections: [(&str, Vec<String>); 5] = [
            ("policy_domain", self.policy_domains.iter().cloned().collect()),
            ("form", self.forms_of_cooperation.iter().cloned().collect()),
            ("sector", self.sectors.iter().cloned().collect()),
            (
                "party",
                self.party_keys().into_iter().collect(),
            ),
            ("year", self.years.iter().map(ToString::to_string).collect()),
        ];
        for (name, values) in sections {
            hasher.update(name.as_bytes());
            hasher.update(b"\x01");
            for value in values {
                hasher.update(value.as_bytes());
                hasher.update(b"\x00");
            }
        }
        format!("blake3:{}", hasher.finalize())
    }
}

fn any_selected(selected: &BTreeSet<String>, values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

/// The distinct values available for each facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub policy_domains: Vec<String>,
    pub forms_of_cooperation: Vec<String>,
    pub sectors: Vec<String>,
    pub parties: Vec<String>,
    pub years: Vec<i32>,
}

/// Collect sorted unique facet values from `records`.
///
/// Parties are unique by normalized key and keep their first spelling.
#[must_use]
pub fn facets(records: &[AgreementRecord]) -> Facets {
    let mut policy_domains = BTreeSet::new();
    let mut forms = BTreeSet::new();
    let mut sectors = BTreeSet::new();
    let mut parties: BTreeMap<String, String> = BTreeMap::new();
    let mut years = BTreeSet::new();

    for record in records {
        policy_domains.extend(record.policy_domain.iter().cloned());
        if !record.form_of_cooperation.is_empty() {
            forms.insert(record.form_of_cooperation.clone());
        }
        sectors.extend(record.sector.iter().cloned());
        for name in &record.parties {
            parties
                .entry(party::key(name))
                .or_insert_with(|| name.clone());
        }
        years.insert(record.year());
    }

    Facets {
        policy_domains: policy_domains.into_iter().collect(),
        forms_of_cooperation: forms.into_iter().collect(),
        sectors: sectors.into_iter().collect(),
        parties: parties.into_values().collect(),
        years: years.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Membership;
    use chrono::NaiveDate;

    fn record(row: usize, year: i32, domain: &str, form: &str, parties: &[&str]) -> AgreementRecord {
        AgreementRecord {
            row,
            title: format!("agreement {row}"),
            date: NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date"),
            parties: parties.iter().map(ToString::to_string).collect(),
            sector: vec!["Defence".to_string(), "Space".to_string()],
            policy_domain: vec![domain.to_string()],
            form_of_cooperation: form.to_string(),
            quotes: None,
            military_alliance: Membership::No,
            free_trade_agreement: Membership::No,
            corpus: None,
        }
    }

    fn table() -> Vec<AgreementRecord> {
        vec![
            record(0, 2001, "Security", "Treaty", &["France", "Germany"]),
            record(1, 2005, "Trade", "Treaty", &["France", "Japan"]),
            record(2, 2005, "Security", "MoU", &["Japan", "India"]),
        ]
    }

    fn set<T: Ord + Clone>(items: &[T]) -> BTreeSet<T> {
        items.iter().cloned().collect()
    }

    #[test]
    fn empty_selection_keeps_everything() {
        let selection = FilterSelection::default();
        assert!(selection.is_empty());
        assert_eq!(selection.apply(&table()).len(), 3);
    }

    #[test]
    fn facets_combine_with_and() {
        let selection = FilterSelection {
            policy_domains: set(&["Security".to_string()]),
            years: set(&[2005]),
            ..FilterSelection::default()
        };
        let rows: Vec<usize> = selection.apply(&table()).iter().map(|r| r.row).collect();
        assert_eq!(rows, [2]);
    }

    #[test]
    fn values_within_a_facet_combine_with_or() {
        let selection = FilterSelection {
            forms_of_cooperation: set(&["MoU".to_string(), "Treaty".to_string()]),
            ..FilterSelection::default()
        };
        assert_eq!(selection.apply(&table()).len(), 3);
    }

    #[test]
    fn party_filter_ignores_case() {
        let selection = FilterSelection {
            parties: set(&["  japan".to_string()]),
            ..FilterSelection::default()
        };
        let rows: Vec<usize> = selection.apply(&table()).iter().map(|r| r.row).collect();
        assert_eq!(rows, [1, 2]);
    }

    #[test]
    fn single_record_match_agrees_with_apply() {
        let selection = FilterSelection {
            parties: set(&["FRANCE".to_string(), "india ".to_string()]),
            years: set(&[2005]),
            ..FilterSelection::default()
        };
        let table = table();
        let one_by_one: Vec<usize> = table
            .iter()
            .filter(|r| selection.matches(r))
            .map(|r| r.row)
            .collect();
        let applied: Vec<usize> = selection.apply(&table).iter().map(|r| r.row).collect();
        assert_eq!(one_by_one, [1, 2]);
        assert_eq!(applied, one_by_one);
    }

    #[test]
    fn list_columns_match_any_entry() {
        let selection = FilterSelection {
            sectors: set(&["Space".to_string()]),
            ..FilterSelection::default()
        };
        assert_eq!(selection.apply(&table()).len(), 3);
    }

    #[test]
    fn cache_key_depends_on_members_not_order() {
        let mut a = FilterSelection::default();
        a.years.insert(2005);
        a.years.insert(2001);
        let mut b = FilterSelection::default();
        b.years.insert(2001);
        b.years.insert(2005);
        assert_eq!(a.cache_key(), b.cache_key());

        b.years.insert(2010);
        assert_ne!(a.cache_key(), b.cache_key());
        assert!(a.cache_key().starts_with("blake3:"));
    }

    #[test]
    fn cache_key_separates_facets() {
        let by_domain = FilterSelection {
            policy_domains: set(&["Trade".to_string()]),
            ..FilterSelection::default()
        };
        let by_sector = FilterSelection {
            sectors: set(&["Trade".to_string()]),
            ..FilterSelection::default()
        };
        assert_ne!(by_domain.cache_key(), by_sector.cache_key());
    }

    #[test]
    fn facets_are_sorted_and_unique() {
        let mut rows = table();
        rows.push(record(3, 2001, "Trade", "Treaty", &["FRANCE", "Brazil"]));
        let f = facets(&rows);
        assert_eq!(f.policy_domains, ["Security", "Trade"]);
        assert_eq!(f.forms_of_cooperation, ["MoU", "Treaty"]);
        assert_eq!(f.parties, ["Brazil", "France", "Germany", "India", "Japan"]);
        assert_eq!(f.years, [2001, 2005]);
    }
}
