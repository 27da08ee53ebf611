pub mod agreements;
pub mod facets;
pub mod graph;
pub mod stats;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use ecosa_core::config::EcosaConfig;
use ecosa_core::ingest::load_json;
use ecosa_core::{AgreementRecord, FilterSelection, IngestPolicy};
use tracing::{info, warn};

/// Input table shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON file holding an array of agreement rows.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Fail on the first invalid row instead of skipping it.
    #[arg(long)]
    pub strict: bool,
}

impl InputArgs {
    fn policy(&self, config: &EcosaConfig) -> IngestPolicy {
        if self.strict {
            IngestPolicy::Strict
        } else {
            config.ingest.policy
        }
    }
}

/// Multi-select filter flags. Each may be repeated; omitted means all.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep agreements in this policy domain.
    #[arg(long = "policy-domain", value_name = "DOMAIN")]
    pub policy_domains: Vec<String>,

    /// Keep agreements with this form of cooperation.
    #[arg(long = "form", value_name = "FORM")]
    pub forms: Vec<String>,

    /// Keep agreements in this sector.
    #[arg(long = "sector", value_name = "SECTOR")]
    pub sectors: Vec<String>,

    /// Keep agreements signed by this party (case-insensitive).
    #[arg(long = "party", value_name = "PARTY")]
    pub parties: Vec<String>,

    /// Keep agreements dated in this year.
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<i32>,
}

impl FilterArgs {
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            policy_domains: self.policy_domains.iter().cloned().collect(),
            forms_of_cooperation: self.forms.iter().cloned().collect(),
            sectors: self.sectors.iter().cloned().collect(),
            parties: self.parties.iter().cloned().collect(),
            years: self.years.iter().copied().collect(),
        }
    }
}

/// Load, validate and filter the input table.
pub fn load_records(
    input: &InputArgs,
    filter: &FilterArgs,
    config: &EcosaConfig,
) -> anyhow::Result<Vec<AgreementRecord>> {
    let report = load_json(&input.input, input.policy(config))
        .with_context(|| format!("loading {}", input.input.display()))?;

    if !report.rejected.is_empty() {
        warn!(
            rejected = report.rejected.len(),
            "some rows were skipped; rerun with --strict to see the first failure"
        );
    }

    let selection = filter.selection();
    let records = selection.apply(&report.records);
    info!(
        loaded = report.records.len(),
        selected = records.len(),
        selection = %selection.cache_key(),
        "records ready"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_flags_select_everything() {
        assert!(FilterArgs::default().selection().is_empty());
    }

    #[test]
    fn repeated_flags_collect_into_sets() {
        let args = FilterArgs {
            years: vec![2016, 2012, 2016],
            parties: vec!["Chile".to_string()],
            ..FilterArgs::default()
        };
        let selection = args.selection();
        assert_eq!(selection.years.into_iter().collect::<Vec<_>>(), [2012, 2016]);
        assert!(selection.parties.contains("Chile"));
    }

    #[test]
    fn strict_flag_overrides_config() {
        let input = InputArgs {
            input: PathBuf::from("rows.json"),
            strict: true,
        };
        assert_eq!(input.policy(&EcosaConfig::default()), IngestPolicy::Strict);

        let lenient = InputArgs {
            strict: false,
            ..input
        };
        assert_eq!(lenient.policy(&EcosaConfig::default()), IngestPolicy::Tolerant);
    }
}
