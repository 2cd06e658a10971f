mod common;

use common::FakeSource;
use proptest::prelude::*;
use tsreport_core::SamplePolicy;

#[test]
fn all_policy_keeps_source_order() {
    let source = FakeSource {
        samples: vec![4, 0, 2],
        flags: vec![1, 0, 1, 0, 1],
        ..FakeSource::default()
    };
    assert_eq!(SamplePolicy::All.select(&source), vec![4, 0, 2]);
}

#[test]
fn flagged_policy_ignores_the_sample_list() {
    let source = FakeSource {
        samples: vec![0, 1],
        flags: vec![1, 0, 1, 3, 1],
        ..FakeSource::default()
    };
    assert_eq!(SamplePolicy::flagged().select(&source), vec![0, 2, 4]);
    assert_eq!(SamplePolicy::Flagged { sentinel: 3 }.select(&source), vec![3]);
}

#[test]
fn flag_must_equal_sentinel_exactly() {
    // 3 has the sample bit set but is not equal to the sentinel.
    let source = FakeSource {
        flags: vec![3, 1, 0],
        ..FakeSource::default()
    };
    assert_eq!(SamplePolicy::flagged().select(&source), vec![1]);
}

#[test]
fn selection_does_not_modify_source() {
    let source = FakeSource::with_record("{}");
    let before = (source.samples.clone(), source.flags.clone());
    let _ = SamplePolicy::flagged().select(&source);
    let _ = SamplePolicy::All.select(&source);
    assert_eq!(before, (source.samples.clone(), source.flags.clone()));
}

proptest! {
    #[test]
    fn policies_agree_when_only_samples_carry_the_sentinel(
        is_sample in proptest::collection::vec(any::<bool>(), 1..64),
    ) {
        let flags: Vec<u32> = is_sample.iter().map(|s| u32::from(*s)).collect();
        let samples: Vec<usize> = is_sample
            .iter()
            .enumerate()
            .filter(|(_, s)| **s)
            .map(|(node, _)| node)
            .rev()
            .collect();
        let source = FakeSource { samples, flags, ..FakeSource::default() };

        let mut all = SamplePolicy::All.select(&source);
        let mut flagged = SamplePolicy::flagged().select(&source);
        all.sort_unstable();
        flagged.sort_unstable();
        prop_assert_eq!(all, flagged);
    }
}
