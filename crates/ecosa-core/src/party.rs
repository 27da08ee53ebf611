//! Party name normalization.
//!
//! A party is identified by its trimmed, whitespace-collapsed, case-folded
//! name. The display spelling is whatever appeared first; later spellings
//! that normalize to the same key collapse onto it.

use std::collections::HashSet;

/// Delimiter between parties in a single `Parties` cell.
pub const PARTY_DELIMITER: char = ';';

/// Trim and collapse internal whitespace runs to a single space.
#[must_use]
pub fn clean(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Identity key for a party: [`clean`]ed and lowercased.
#[must_use]
pub fn key(name: &str) -> String {
    clean(name).to_lowercase()
}

/// Split a delimited `Parties` cell into cleaned, non-empty names.
#[must_use]
pub fn split(raw: &str) -> Vec<String> {
    raw.split(PARTY_DELIMITER)
        .map(clean)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Drop empty names and later duplicates (by [`key`]) while keeping order.
#[must_use]
pub fn dedup<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|name| clean(name.as_ref()))
        .filter(|name| !name.is_empty() && seen.insert(name.to_lowercase()))
        .collect()
}
