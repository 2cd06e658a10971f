//! `tskit`-backed implementation of the tsreport source traits.
//!
//! Files are loaded with `tskit::TreeSequence::load`. Branch-mode diversity is
//! computed by streaming the local trees of the sequence through
//! [`BranchDiversity`], and root counts come straight from each tree's root
//! list.

use std::path::Path;

use streaming_iterator::StreamingIterator;
use tracing::debug;
use tsreport_core::{
    BranchDiversity, ErrorInfo, NodeIndex, ReportError, SourceLoader, TreeSequenceSource,
};

/// A loaded `.trees` file.
pub struct TskitSource {
    ts: tskit::TreeSequence,
}

impl TskitSource {
    /// Loads a tree sequence from disk.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let Some(filename) = path.to_str() else {
            return Err(ReportError::Load(
                ErrorInfo::new("LOAD002", "tree sequence path is not valid UTF-8").with_path(path),
            ));
        };
        let ts = tskit::TreeSequence::load(filename).map_err(|err| {
            ReportError::Load(
                ErrorInfo::new("LOAD001", "failed to load tree sequence")
                    .with_path(path)
                    .with_context("source", err.to_string()),
            )
        })?;
        Ok(Self { ts })
    }

    fn node_times(&self) -> Vec<f64> {
        self.ts
            .nodes()
            .time_slice()
            .iter()
            .map(|time| f64::from(*time))
            .collect()
    }
}

fn tree_error(err: tskit::TskitError) -> ReportError {
    ReportError::Statistic(
        ErrorInfo::new("STAT004", "failed to iterate local trees")
            .with_context("source", err.to_string()),
    )
}

// NULL and other negative ids have no node index.
fn node_index(node: tskit::NodeId) -> Option<NodeIndex> {
    usize::try_from(node).ok()
}

impl TreeSequenceSource for TskitSource {
    fn provenance_record(&self, index: usize) -> Option<String> {
        let row = i32::try_from(index).ok()?;
        self.ts
            .provenances()
            .record(tskit::ProvenanceId::from(row))
            .map(str::to_string)
    }

    fn samples(&self) -> Vec<NodeIndex> {
        self.ts
            .sample_nodes()
            .iter()
            .filter_map(|node| node_index(*node))
            .collect()
    }

    fn node_flags(&self) -> Vec<u32> {
        self.ts
            .nodes()
            .flags_slice()
            .iter()
            .map(|flags| flags.bits())
            .collect()
    }

    fn diversity(&self, sample_sets: &[Vec<NodeIndex>]) -> Result<Vec<f64>, ReportError> {
        let times = self.node_times();
        let mut accumulator = BranchDiversity::new(&times, sample_sets)?;
        let mut trees = self
            .ts
            .tree_iterator(tskit::TreeFlags::default())
            .map_err(tree_error)?;
        let mut num_trees = 0usize;
        while let Some(tree) = trees.next() {
            let (left, right) = tree.interval();
            let parents = tree.parent_array();
            accumulator.add_tree(f64::from(right) - f64::from(left), |node| {
                parents.get(node).copied().and_then(node_index)
            });
            num_trees += 1;
        }
        debug!(trees = num_trees, sets = sample_sets.len(), "branch diversity accumulated");
        Ok(accumulator.finish())
    }

    fn root_counts(&self) -> Result<Vec<usize>, ReportError> {
        let mut trees = self
            .ts
            .tree_iterator(tskit::TreeFlags::default())
            .map_err(tree_error)?;
        let mut counts = Vec::new();
        while let Some(tree) = trees.next() {
            counts.push(tree.roots().count());
        }
        Ok(counts)
    }
}

/// Loads input files with `tskit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TskitLoader;

impl SourceLoader for TskitLoader {
    type Source = TskitSource;

    fn load(&self, path: &Path) -> Result<Self::Source, ReportError> {
        TskitSource::load(path)
    }
}
