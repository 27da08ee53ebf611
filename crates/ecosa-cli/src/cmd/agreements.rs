//! `ecosa agreements`: detail lookup for a party or a clicked node label.

use std::io::Write;

use anyhow::Context as _;
use clap::Args;
use ecosa_core::config::EcosaConfig;
use ecosa_core::detail::{AgreementDetail, agreements_involving};
use ecosa_graph::parse_node_label;
use serde::Serialize;

use super::{FilterArgs, InputArgs, load_records};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `ecosa agreements`.
#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["party", "label"])))]
pub struct AgreementsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Party name to look up (case-sensitive substring).
    #[arg(value_name = "PARTY")]
    pub party: Option<String>,

    /// Node label as printed by `ecosa graph`, e.g. "France has connections: 3".
    #[arg(long, value_name = "LABEL")]
    pub label: Option<String>,
}

impl AgreementsArgs {
    fn target(&self) -> anyhow::Result<String> {
        if let Some(label) = &self.label {
            return parse_node_label(label)
                .map(str::to_string)
                .with_context(|| format!("{label:?} is not a node label"));
        }
        self.party
            .clone()
            .context("either a party name or --label is required")
    }
}

/// Report payload for `ecosa agreements`.
#[derive(Debug, Serialize)]
pub struct AgreementsReport {
    pub party: String,
    pub agreements: Vec<AgreementDetail>,
}

/// Execute `ecosa agreements`.
pub fn run_agreements(
    args: &AgreementsArgs,
    config: &EcosaConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let party = args.target()?;
    let records = load_records(&args.input, &args.filter, config)?;
    let agreements = agreements_involving(&records, &party)
        .into_iter()
        .map(AgreementDetail::from)
        .collect();

    let report = AgreementsReport { party, agreements };
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &AgreementsReport, w: &mut dyn Write) -> std::io::Result<()> {
    for detail in &report.agreements {
        writeln!(w, "{}\t{}\t{}", detail.date, detail.title, detail.parties)?;
    }
    Ok(())
}

fn render_pretty(report: &AgreementsReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "{} agreement(s) involving {}",
            report.agreements.len(),
            report.party
        ),
    )?;
    for detail in &report.agreements {
        pretty_kv(w, "Title", &detail.title)?;
        pretty_kv(w, "Date", &detail.date)?;
        pretty_kv(w, "Parties", &detail.parties)?;
        pretty_kv(w, "Sector", &detail.sector)?;
        pretty_kv(w, "Policy Domain", &detail.policy_domain)?;
        pretty_kv(w, "Form of Cooperation", &detail.form_of_cooperation)?;
        pretty_kv(w, "Quote(s)", &detail.quotes)?;
        pretty_kv(w, "Military Alliance", &detail.military_alliance)?;
        pretty_kv(w, "Free Trade Agreement", &detail.free_trade_agreement)?;
        if let Some(corpus) = &detail.corpus {
            pretty_kv(w, "Corpus", corpus)?;
        }
        pretty_rule(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(party: Option<&str>, label: Option<&str>) -> AgreementsArgs {
        AgreementsArgs {
            input: InputArgs {
                input: "rows.json".into(),
                strict: false,
            },
            filter: FilterArgs::default(),
            party: party.map(str::to_string),
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn label_resolves_to_party() {
        let target = args(None, Some("Republic of Korea has degree centrality: 0.5000"))
            .target()
            .expect("label parses");
        assert_eq!(target, "Republic of Korea");
    }

    #[test]
    fn plain_party_is_used_verbatim() {
        assert_eq!(args(Some("Chile"), None).target().expect("party"), "Chile");
    }

    #[test]
    fn malformed_label_is_rejected() {
        assert!(args(None, Some("just a name")).target().is_err());
    }
}
