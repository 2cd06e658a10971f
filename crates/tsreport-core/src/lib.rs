#![doc = "Parameter extraction and diversity reporting for tree-sequence simulation outputs."]

pub mod emit;
pub mod errors;
pub mod filename;
pub mod params;
pub mod pipeline;
pub mod provenance;
mod record;
pub mod samples;
pub mod source;
pub mod stats;
pub mod variant;

pub use emit::ReportWriter;
pub use errors::{ErrorInfo, ReportError};
pub use filename::{parse_filename, FilenameField};
pub use params::{format_float, ParamValue, Parameters};
pub use pipeline::{
    build_record, enumerate_inputs, extract_parameters, process_file, run_report, run_variant,
    FailurePolicy, RunSummary,
};
pub use provenance::parse_record;
pub use record::SimulationRecord;
pub use samples::SamplePolicy;
pub use source::{NodeIndex, SourceLoader, TreeSequenceSource};
pub use stats::{compute_diversity, max_roots, running_max, BranchDiversity};
pub use variant::{
    builtin_variant, builtin_variants, load_variant, variant_to_yaml, Column, Extraction,
    VariantConfig,
};
