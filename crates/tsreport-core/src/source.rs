use std::path::Path;

use crate::errors::ReportError;

/// Index of a node in a tree sequence's node table.
pub type NodeIndex = usize;

/// Read-only view of one loaded tree sequence.
///
/// Implementations wrap an external tree-sequence library; the reporting
/// pipeline only needs the provenance text, sample metadata and the two
/// statistics below.
pub trait TreeSequenceSource {
    /// Returns the provenance record at `index`, if the source has one.
    fn provenance_record(&self, index: usize) -> Option<String>;

    /// Returns the nodes the source designates as samples, in native order.
    fn samples(&self) -> Vec<NodeIndex>;

    /// Returns the flag word of every node, indexed by node.
    fn node_flags(&self) -> Vec<u32>;

    /// Computes branch-mode diversity, one value per sample set.
    fn diversity(&self, sample_sets: &[Vec<NodeIndex>]) -> Result<Vec<f64>, ReportError>;

    /// Returns the number of roots of every local tree, left to right.
    fn root_counts(&self) -> Result<Vec<usize>, ReportError>;
}

/// Opens input files as [`TreeSequenceSource`]s.
pub trait SourceLoader {
    /// Concrete source produced by this loader.
    type Source: TreeSequenceSource;

    /// Loads the file at `path`. Failures are reported as [`ReportError::Load`].
    fn load(&self, path: &Path) -> Result<Self::Source, ReportError>;
}
