use std::path::PathBuf;

use serde::Serialize;

use crate::params::Parameters;
use crate::source::NodeIndex;

/// Everything reported for one input file.
///
/// Built in a single pass, written as one row and dropped; nothing is kept
/// across files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRecord {
    pub source_path: PathBuf,
    pub parameters: Parameters,
    /// Never empty once a diversity value has been computed.
    pub sample_set: Vec<NodeIndex>,
    pub diversity: f64,
    /// Present only for variants that scan root counts.
    pub max_roots: Option<usize>,
}
