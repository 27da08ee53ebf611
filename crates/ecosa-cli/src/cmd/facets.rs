//! `ecosa facets`: the values each filter flag can take.

use std::io::Write;

use clap::Args;
use ecosa_core::config::EcosaConfig;
use ecosa_core::filter::{Facets, facets};

use super::{FilterArgs, InputArgs, load_records};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `ecosa facets`.
#[derive(Args, Debug)]
pub struct FacetsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute `ecosa facets`.
pub fn run_facets(args: &FacetsArgs, config: &EcosaConfig, output: OutputMode) -> anyhow::Result<()> {
    let records = load_records(&args.input, &FilterArgs::default(), config)?;
    let available = facets(&records);
    render_mode(output, &available, render_text, render_pretty)
}

fn sections(f: &Facets) -> [(&'static str, Vec<String>); 5] {
    [
        ("policy-domain", f.policy_domains.clone()),
        ("form", f.forms_of_cooperation.clone()),
        ("sector", f.sectors.clone()),
        ("party", f.parties.clone()),
        ("year", f.years.iter().map(ToString::to_string).collect()),
    ]
}

fn render_text(f: &Facets, w: &mut dyn Write) -> std::io::Result<()> {
    for (flag, values) in sections(f) {
        for value in values {
            writeln!(w, "{flag}\t{value}")?;
        }
    }
    Ok(())
}

fn render_pretty(f: &Facets, w: &mut dyn Write) -> std::io::Result<()> {
    for (flag, values) in sections(f) {
        pretty_section(w, &format!("--{flag} ({})", values.len()))?;
        for value in values {
            writeln!(w, "  {value}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}
