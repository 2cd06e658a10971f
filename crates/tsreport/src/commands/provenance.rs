use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use tsreport_core::{parse_record, ErrorInfo, ReportError, TreeSequenceSource};
use tsreport_tskit::TskitSource;

#[derive(Args, Debug)]
pub struct ParseProvenanceArgs {
    /// Tree-sequence file to inspect.
    pub input: PathBuf,
    /// Index of the provenance record.
    #[arg(long, default_value_t = 0)]
    pub index: usize,
}

pub fn run(args: &ParseProvenanceArgs) -> Result<(), Box<dyn Error>> {
    let source = TskitSource::load(&args.input)?;
    let record = source.provenance_record(args.index).ok_or_else(|| {
        ReportError::Metadata(
            ErrorInfo::new("META001", "provenance record is missing")
                .with_path(&args.input)
                .with_context("record_index", args.index.to_string()),
        )
    })?;
    let params = parse_record(&record).map_err(|err| err.at_path(&args.input))?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
