//! How `ecosa` writes results and errors.
//!
//! Each subcommand builds one serializable report and hands it to
//! [`render_mode`] together with two writers: a tab-separated one for
//! scripts and an aligned one for terminals. JSON needs no writer; the
//! report is serialized as-is, so its field names are the stable contract.
//!
//! The mode is picked once per invocation by [`resolve_output_mode`]:
//! `--format` first, then `--json`, then the `FORMAT` environment variable,
//! and finally [`OutputMode::Pretty`] on a terminal or [`OutputMode::Text`]
//! when stdout is redirected. Unrecognised `FORMAT` values are ignored.

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Column width of the dashed line under section headings.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Dashed line spanning [`PRETTY_RULE_WIDTH`] columns.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", "-".repeat(PRETTY_RULE_WIDTH))
}

/// Heading such as `Cooperation graph`, underlined.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// One `name:  value` row, names padded so values line up.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<22} {}", format!("{key}:"), value.as_ref())
}

/// Output flavour for every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Headed sections and aligned key/value rows.
    Pretty,
    /// One tab-separated record per line.
    Text,
    /// The report serialized as indented JSON.
    Json,
}

impl OutputMode {
    /// Parse a `FORMAT` value, ignoring case; `None` for anything unknown.
    fn from_env_value(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value.trim(), true).ok()
    }
}

fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    format_flag
        .or_else(|| json_flag.then_some(OutputMode::Json))
        .or_else(|| format_env.and_then(OutputMode::from_env_value))
        .unwrap_or(if is_tty {
            OutputMode::Pretty
        } else {
            OutputMode::Text
        })
}

/// Pick the output mode for this run from flags, `FORMAT` and stdout.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let format_env = std::env::var("FORMAT").ok();
    resolve_output_mode_inner(
        format_flag,
        json_flag,
        format_env.as_deref(),
        io::stdout().is_terminal(),
    )
}

/// Write `report` to stdout in `mode`.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    report: &T,
    text: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
        OutputMode::Text => text(report, &mut out)?,
        OutputMode::Pretty => pretty(report, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

/// A failure as shown to the user: message, plus code and hint when known.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Stable `E####` code when the failure came from the core library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Build from any error chain, picking up the core error code when one
    /// is in the chain.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let core = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<ecosa_core::Error>());
        Self {
            message: format!("{err:#}"),
            hint: core.and_then(|e| e.code().hint()).map(str::to_string),
            error_code: core.map(|e| e.code().code().to_string()),
        }
    }
}

/// Write `error` to stderr; JSON mode wraps it as `{"error": {...}}`.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let mut out = io::stderr().lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            match &error.error_code {
                Some(code) => writeln!(out, "error[{code}]: {}", error.message)?,
                None => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(hint) = &error.hint {
                writeln!(out, "  hint: {hint}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_everything() {
        assert_eq!(
            resolve_output_mode_inner(Some(OutputMode::Text), true, Some("json"), true),
            OutputMode::Text
        );
    }

    #[test]
    fn json_flag_beats_env() {
        assert_eq!(
            resolve_output_mode_inner(None, true, Some("pretty"), true),
            OutputMode::Json
        );
    }

    #[test]
    fn env_then_tty_default() {
        assert_eq!(
            resolve_output_mode_inner(None, false, Some("TEXT"), true),
            OutputMode::Text
        );
        assert_eq!(
            resolve_output_mode_inner(None, false, Some(" json "), false),
            OutputMode::Json
        );
        assert_eq!(
            resolve_output_mode_inner(None, false, Some("bogus"), true),
            OutputMode::Pretty
        );
        assert_eq!(
            resolve_output_mode_inner(None, false, None, false),
            OutputMode::Text
        );
    }

    #[test]
    fn cli_error_picks_up_core_code() {
        let core = ecosa_core::Error::LayoutFailure {
            layout: "spring".to_string(),
            reason: "diverged".to_string(),
        };
        let err = anyhow::Error::new(core).context("annotating graph");
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E2001"));
        assert!(cli.hint.is_some());
        assert!(cli.message.contains("diverged"), "{}", cli.message);
    }

    #[test]
    fn cli_error_without_core_cause() {
        let cli = CliError::from_anyhow(&anyhow::anyhow!("boom"));
        assert_eq!(cli.error_code, None);
        assert_eq!(cli.hint, None);
        assert_eq!(cli.message, "boom");
    }
}
