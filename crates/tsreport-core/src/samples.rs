use serde::{Deserialize, Serialize};

use crate::source::{NodeIndex, TreeSequenceSource};

/// Node flag value marking the designated subset (e.g. individuals alive at
/// the end of a simulation).
pub const DEFAULT_SENTINEL: u32 = 1;

fn default_sentinel() -> u32 {
    DEFAULT_SENTINEL
}

/// Policy deciding which nodes the diversity statistic is computed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum SamplePolicy {
    /// Every node the source lists as a sample, in the source's order.
    #[default]
    All,
    /// Every node whose flag word equals `sentinel`, in node order, whether
    /// or not the source lists it as a sample.
    Flagged {
        #[serde(default = "default_sentinel")]
        sentinel: u32,
    },
}

impl SamplePolicy {
    /// Flagged-subset policy with the default sentinel.
    pub fn flagged() -> Self {
        SamplePolicy::Flagged {
            sentinel: DEFAULT_SENTINEL,
        }
    }

    /// Selects the sample set from `source` without modifying it.
    pub fn select<S: TreeSequenceSource + ?Sized>(&self, source: &S) -> Vec<NodeIndex> {
        match self {
            SamplePolicy::All => source.samples(),
            SamplePolicy::Flagged { sentinel } => source
                .node_flags()
                .iter()
                .enumerate()
                .filter(|(_, flags)| **flags == *sentinel)
                .map(|(node, _)| node)
                .collect(),
        }
    }
}
