//! Branch-mode diversity and root-count reductions.

use crate::errors::{ErrorInfo, ReportError};
use crate::source::{NodeIndex, TreeSequenceSource};

/// Accumulates branch-mode diversity over a sequence of local trees.
///
/// Every branch `u -> parent(u)` of a tree spanning `span` units of genome
/// contributes `span * (t_parent - t_u) * 2 x (n - x) / (n (n - 1))`, where
/// `x` counts the set members at or below `u` and `n` is the set size. The
/// result is normalised by the total span added, giving the mean pairwise
/// branch distance over the sequence.
#[derive(Debug)]
pub struct BranchDiversity<'a> {
    times: &'a [f64],
    sets: Vec<Vec<NodeIndex>>,
    sums: Vec<f64>,
    span: f64,
    below: Vec<u64>,
    touched: Vec<NodeIndex>,
}

impl<'a> BranchDiversity<'a> {
    /// Prepares an accumulator for `sample_sets` over nodes with the given
    /// birth times.
    pub fn new(times: &'a [f64], sample_sets: &[Vec<NodeIndex>]) -> Result<Self, ReportError> {
        for (set_index, set) in sample_sets.iter().enumerate() {
            let mut seen = vec![false; times.len()];
            for &node in set {
                let Some(slot) = seen.get_mut(node) else {
                    return Err(ReportError::Statistic(
                        ErrorInfo::new("STAT001", "sample node out of range")
                            .with_context("node", node.to_string())
                            .with_context("num_nodes", times.len().to_string())
                            .with_context("sample_set", set_index.to_string()),
                    ));
                };
                if *slot {
                    return Err(ReportError::Statistic(
                        ErrorInfo::new("STAT002", "duplicate node in sample set")
                            .with_context("node", node.to_string())
                            .with_context("sample_set", set_index.to_string()),
                    ));
                }
                *slot = true;
            }
        }
        Ok(Self {
            times,
            sets: sample_sets.to_vec(),
            sums: vec![0.0; sample_sets.len()],
            span: 0.0,
            below: vec![0; times.len()],
            touched: Vec::new(),
        })
    }

    /// Adds one local tree covering `span` units, described by its parent
    /// lookup (`None` for roots and nodes outside the tree).
    pub fn add_tree<F>(&mut self, span: f64, parent: F)
    where
        F: Fn(NodeIndex) -> Option<NodeIndex>,
    {
        self.span += span;
        for (set, sum) in self.sets.iter().zip(self.sums.iter_mut()) {
            let n = set.len() as u64;
            if n < 2 {
                continue;
            }
            for &sample in set {
                let mut node = sample;
                // Bounded walk: a path can never be longer than the node table.
                for _ in 0..self.times.len() {
                    if self.below[node] == 0 {
                        self.touched.push(node);
                    }
                    self.below[node] += 1;
                    match parent(node) {
                        Some(next) if next < self.times.len() => node = next,
                        _ => break,
                    }
                }
            }

            let mut total = 0.0;
            for &node in &self.touched {
                if let Some(up) = parent(node).filter(|up| *up < self.times.len()) {
                    let x = self.below[node];
                    let branch = self.times[up] - self.times[node];
                    total += branch * (x * (n - x)) as f64;
                }
            }
            for &node in &self.touched {
                self.below[node] = 0;
            }
            self.touched.clear();

            *sum += span * 2.0 * total / (n * (n - 1)) as f64;
        }
    }

    /// Returns one span-normalised value per sample set.
    ///
    /// Sets with fewer than two members, or an accumulator that saw no
    /// genome span, yield `NaN`.
    pub fn finish(self) -> Vec<f64> {
        self.sets
            .iter()
            .zip(self.sums)
            .map(|(set, sum)| {
                if set.len() < 2 || self.span <= 0.0 {
                    f64::NAN
                } else {
                    sum / self.span
                }
            })
            .collect()
    }
}

/// Computes diversity over a single sample group.
pub fn compute_diversity<S: TreeSequenceSource + ?Sized>(
    source: &S,
    samples: &[NodeIndex],
) -> Result<f64, ReportError> {
    if samples.is_empty() {
        return Err(ReportError::EmptySampleSet(
            ErrorInfo::new("SAMP001", "selected sample set is empty")
                .with_hint("check the variant's sample policy against the node flags"),
        ));
    }
    let values = source.diversity(&[samples.to_vec()])?;
    match values.as_slice() {
        [value] => Ok(*value),
        other => Err(ReportError::Statistic(
            ErrorInfo::new("STAT003", "diversity returned an unexpected number of values")
                .with_context("expected", "1")
                .with_context("actual", other.len().to_string()),
        )),
    }
}

/// Largest root count over all local trees, `None` for an empty sequence.
pub fn max_roots(counts: &[usize]) -> Option<usize> {
    running_max(counts).last().copied()
}

/// Prefix maxima of the root counts.
pub fn running_max(counts: &[usize]) -> Vec<usize> {
    counts
        .iter()
        .scan(0usize, |best, &count| {
            *best = (*best).max(count);
            Some(*best)
        })
        .collect()
}
