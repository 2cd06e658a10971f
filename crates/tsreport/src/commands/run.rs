use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Args;
use tracing::info;
use tsreport_core::{builtin_variant, load_variant, run_variant, FailurePolicy, VariantConfig};
use tsreport_tskit::TskitLoader;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Built-in variant to run (see `tsreport variants`).
    #[arg(long, conflicts_with = "config", required_unless_present = "config")]
    pub variant: Option<String>,
    /// YAML file declaring a custom variant.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory the variant's pattern is resolved against.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Skip files that fail to load or extract instead of aborting the run.
    #[arg(long)]
    pub skip_failures: bool,
}

fn resolve_variant(args: &RunArgs) -> Result<VariantConfig, Box<dyn Error>> {
    match (&args.variant, &args.config) {
        (_, Some(path)) => Ok(load_variant(path)?),
        (Some(name), None) => Ok(builtin_variant(name)?),
        (None, None) => Err("one of --variant or --config is required".into()),
    }
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let variant = resolve_variant(args)?;
    let policy = if args.skip_failures {
        FailurePolicy::SkipAndWarn
    } else {
        FailurePolicy::Abort
    };
    let stdout = io::stdout();
    let summary = run_variant(&variant, &TskitLoader, &args.root, stdout.lock(), policy)?;
    if !summary.skipped.is_empty() {
        info!(
            skipped = summary.skipped.len(),
            "some inputs were skipped; the report has fewer rows than inputs"
        );
    }
    Ok(())
}
