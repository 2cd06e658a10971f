use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    provenance::{self, ParseProvenanceArgs},
    run::{self, RunArgs},
    variants::{self, ShowArgs},
};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tsreport", about = "Diversity reports for tree-sequence simulation outputs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one row per input file for a report variant.
    Run(RunArgs),
    /// List the built-in report variants.
    Variants,
    /// Print a built-in variant as YAML.
    Show(ShowArgs),
    /// Print the parsed provenance record of one file as JSON.
    ParseProvenance(ParseProvenanceArgs),
}

/// Logs go to stderr so stdout carries only the report.
/// `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tsreport=info,tsreport_core=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Variants => variants::list(),
        Command::Show(args) => variants::show(&args),
        Command::ParseProvenance(args) => provenance::run(&args),
    }
}
