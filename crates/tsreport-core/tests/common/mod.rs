#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;

use tsreport_core::{ErrorInfo, NodeIndex, ReportError, SourceLoader, TreeSequenceSource};

/// In-memory stand-in for a loaded tree sequence.
#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    pub provenance: Vec<String>,
    pub samples: Vec<NodeIndex>,
    pub flags: Vec<u32>,
    pub diversity: f64,
    pub roots: Vec<usize>,
}

impl FakeSource {
    pub fn with_record(record: &str) -> Self {
        Self {
            provenance: vec![record.to_string()],
            samples: vec![0, 1, 2],
            flags: vec![1, 1, 1],
            diversity: 1.5,
            roots: vec![1],
        }
    }
}

impl TreeSequenceSource for FakeSource {
    fn provenance_record(&self, index: usize) -> Option<String> {
        self.provenance.get(index).cloned()
    }

    fn samples(&self) -> Vec<NodeIndex> {
        self.samples.clone()
    }

    fn node_flags(&self) -> Vec<u32> {
        self.flags.clone()
    }

    fn diversity(&self, sample_sets: &[Vec<NodeIndex>]) -> Result<Vec<f64>, ReportError> {
        Ok(vec![self.diversity; sample_sets.len()])
    }

    fn root_counts(&self) -> Result<Vec<usize>, ReportError> {
        Ok(self.roots.clone())
    }
}

/// Serves [`FakeSource`]s keyed by file name; unknown names fail to load.
#[derive(Debug, Default)]
pub struct FakeLoader {
    pub sources: BTreeMap<String, FakeSource>,
}

impl FakeLoader {
    pub fn with(mut self, name: &str, source: FakeSource) -> Self {
        self.sources.insert(name.to_string(), source);
        self
    }
}

impl SourceLoader for FakeLoader {
    type Source = FakeSource;

    fn load(&self, path: &Path) -> Result<Self::Source, ReportError> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        self.sources.get(name).cloned().ok_or_else(|| {
            ReportError::Load(ErrorInfo::new("LOAD001", "not a tree sequence").with_path(path))
        })
    }
}
