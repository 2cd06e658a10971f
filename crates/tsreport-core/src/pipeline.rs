use std::io::Write;
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::emit::ReportWriter;
use crate::errors::{ErrorInfo, ReportError};
use crate::filename::parse_filename;
use crate::params::Parameters;
use crate::provenance::parse_record;
use crate::record::SimulationRecord;
use crate::source::{SourceLoader, TreeSequenceSource};
use crate::stats::{compute_diversity, max_roots};
use crate::variant::{Extraction, VariantConfig};

/// What to do when a single input file cannot be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failing file. Rows already written stay written.
    #[default]
    Abort,
    /// Log the failure, skip the file and continue. The report may then
    /// contain fewer rows than there were input files.
    SkipAndWarn,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_seen: usize,
    pub rows_written: usize,
    pub skipped: Vec<PathBuf>,
}

/// Lists every path matching `pattern` below `root`.
///
/// The sequence is lazy and follows the glob listing order, which callers
/// must not assume to be sorted. A pattern that matches nothing yields an
/// empty sequence.
pub fn enumerate_inputs(
    root: &Path,
    pattern: &str,
) -> Result<impl Iterator<Item = Result<PathBuf, ReportError>>, ReportError> {
    let Some(root_str) = root.to_str() else {
        return Err(ReportError::Config(
            ErrorInfo::new("CFG006", "report root is not valid UTF-8").with_path(root),
        ));
    };
    let full = if root_str.is_empty() || root_str == "." {
        pattern.to_string()
    } else {
        format!("{}/{}", Pattern::escape(root_str.trim_end_matches('/')), pattern)
    };
    let entries = glob(&full).map_err(|err| {
        ReportError::Config(
            ErrorInfo::new("CFG007", "invalid input pattern")
                .with_context("pattern", full.as_str())
                .with_context("source", err.to_string()),
        )
    })?;
    Ok(entries.map(|entry| {
        entry.map_err(|err| {
            ReportError::Enumerate(
                ErrorInfo::new("ENUM001", "failed to read a matching path")
                    .with_path(err.path())
                    .with_context("source", err.error().to_string()),
            )
        })
    }))
}

/// Extracts the variant's parameters for one file and checks that every key
/// referenced by the columns is present.
pub fn extract_parameters<S: TreeSequenceSource + ?Sized>(
    variant: &VariantConfig,
    source: &S,
    path: &Path,
) -> Result<Parameters, ReportError> {
    let params = match &variant.extraction {
        Extraction::Provenance { record_index } => {
            let record = source.provenance_record(*record_index).ok_or_else(|| {
                ReportError::Metadata(
                    ErrorInfo::new("META001", "provenance record is missing")
                        .with_context("record_index", record_index.to_string()),
                )
            })?;
            parse_record(&record)?
        }
        Extraction::Filename { delimiter, fields } => parse_filename(path, delimiter, fields)?,
    };
    for key in variant.required_keys() {
        params.require(key)?;
    }
    Ok(params)
}

/// Builds the record for an already loaded source.
pub fn build_record<S: TreeSequenceSource + ?Sized>(
    variant: &VariantConfig,
    source: &S,
    path: &Path,
) -> Result<SimulationRecord, ReportError> {
    let parameters = extract_parameters(variant, source, path)?;
    let sample_set = variant.samples.select(source);
    let diversity = compute_diversity(source, &sample_set)?;
    let max_roots = if variant.scans_roots() {
        max_roots(&source.root_counts()?)
    } else {
        None
    };
    Ok(SimulationRecord {
        source_path: path.to_path_buf(),
        parameters,
        sample_set,
        diversity,
        max_roots,
    })
}

/// Loads one file and builds its record. The loaded source is released
/// before returning.
pub fn process_file<L: SourceLoader>(
    variant: &VariantConfig,
    loader: &L,
    path: &Path,
) -> Result<SimulationRecord, ReportError> {
    let source = loader.load(path).map_err(|err| err.at_path(path))?;
    build_record(variant, &source, path).map_err(|err| err.at_path(path))
}

/// Writes the header, then one row per input in iteration order.
pub fn run_report<L, W, I>(
    variant: &VariantConfig,
    loader: &L,
    inputs: I,
    writer: &mut ReportWriter<W>,
    policy: FailurePolicy,
) -> Result<RunSummary, ReportError>
where
    L: SourceLoader,
    W: Write,
    I: IntoIterator<Item = Result<PathBuf, ReportError>>,
{
    writer.write_header()?;
    let mut summary = RunSummary::default();
    for input in inputs {
        let path = input?;
        summary.files_seen += 1;
        debug!(path = %path.display(), variant = %variant.name, "processing tree sequence");
        match process_file(variant, loader, &path) {
            Ok(record) => {
                writer.write_record(&record)?;
                summary.rows_written += 1;
            }
            Err(err) if policy == FailurePolicy::SkipAndWarn && err.is_per_file() => {
                warn!(path = %path.display(), error = %err, "skipping input");
                summary.skipped.push(path);
            }
            Err(err) => return Err(err),
        }
    }
    info!(
        variant = %variant.name,
        files = summary.files_seen,
        rows = summary.rows_written,
        skipped = summary.skipped.len(),
        "report complete"
    );
    Ok(summary)
}

/// Runs `variant` over the files matching its pattern below `root`.
pub fn run_variant<L, W>(
    variant: &VariantConfig,
    loader: &L,
    root: &Path,
    out: W,
    policy: FailurePolicy,
) -> Result<RunSummary, ReportError>
where
    L: SourceLoader,
    W: Write,
{
    variant.validate()?;
    let inputs = enumerate_inputs(root, &variant.pattern)?;
    let mut writer = ReportWriter::new(out, variant);
    run_report(variant, loader, inputs, &mut writer, policy)
}
