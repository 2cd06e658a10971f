use proptest::prelude::*;
use tsreport_core::{max_roots, running_max};

#[test]
fn max_over_trees() {
    assert_eq!(max_roots(&[1, 3, 2, 1]), Some(3));
    assert_eq!(max_roots(&[]), None);
}

#[test]
fn running_max_tracks_prefixes() {
    assert_eq!(running_max(&[1, 3, 2, 4, 1]), vec![1, 3, 3, 4, 4]);
    assert!(running_max(&[]).is_empty());
}

proptest! {
    #[test]
    fn running_max_is_non_decreasing_and_ends_at_max(
        counts in proptest::collection::vec(1usize..8, 1..50),
    ) {
        let prefix = running_max(&counts);
        prop_assert!(prefix[0] >= 1);
        prop_assert!(prefix.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_eq!(prefix.last().copied(), max_roots(&counts));
    }
}
