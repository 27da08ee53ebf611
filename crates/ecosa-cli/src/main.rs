#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ecosa_core::config::{EcosaConfig, load_config, load_project_config};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::output::{CliError, OutputMode, render_error, resolve_output_mode};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ecosa: explore economic cooperation agreements as a graph",
    long_about = None
)]
struct Cli {
    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides --json and the FORMAT env var).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Config file (default: ./ecosa.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Build, lay out and annotate the cooperation graph",
        long_about = "Load agreement rows, apply the filter selection, build the cooperation graph, \
                      run a layout and annotate every party with the chosen metric.",
        after_help = "EXAMPLES:\n    # Betweenness with the default spring layout\n    ecosa graph agreements.json --metric betweenness\n\n    # Energy agreements since 2015, circular layout\n    ecosa graph agreements.json --sector Energy --year 2015 --year 2016 --layout circular\n\n    # Emit machine-readable output\n    ecosa graph agreements.json --json"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        about = "Summarize the cooperation graph",
        after_help = "EXAMPLES:\n    # Whole table\n    ecosa stats agreements.json\n\n    # Only agreements involving Chile\n    ecosa stats agreements.json --party Chile --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "List agreements involving a party",
        long_about = "List agreements whose party list mentions a name. The name can be given \
                      directly or as a node label copied from `ecosa graph`.",
        after_help = "EXAMPLES:\n    # By party name\n    ecosa agreements agreements.json France\n\n    # By a label from the graph output\n    ecosa agreements agreements.json --label \"France has connections: 3\""
    )]
    Agreements(cmd::agreements::AgreementsArgs),

    #[command(
        about = "List the filter values present in the data",
        after_help = "EXAMPLES:\n    ecosa facets agreements.json\n    ecosa facets agreements.json --json"
    )]
    Facets(cmd::facets::FacetsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ECOSA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "ecosa=debug,info"
        } else {
            "ecosa=info,warn"
        })
    });

    let format = env::var("ECOSA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<EcosaConfig> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => load_project_config(&env::current_dir()?)?,
    };
    debug!(?config, "configuration loaded");
    Ok(config)
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let config = load_settings(cli.config.as_ref())?;
    match &cli.command {
        Commands::Graph(args) => cmd::graph::run_graph(args, &config, output),
        Commands::Stats(args) => cmd::stats::run_stats(args, &config, output),
        Commands::Agreements(args) => cmd::agreements::run_agreements(args, &config, output),
        Commands::Facets(args) => cmd::facets::run_facets(args, &config, output),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let output = resolve_output_mode(cli.format, cli.json);

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Nothing more useful to do if stderr itself is gone.
            let _ = render_error(output, &CliError::from_anyhow(&err));
            ExitCode::FAILURE
        }
    }
}
