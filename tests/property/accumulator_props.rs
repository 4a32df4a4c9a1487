//! The sharded accumulator agrees with a plain ordered map, no matter how
//! the additions are scheduled.

use proptest::prelude::*;
use rayon::prelude::*;
use skald::ConcurrentMap;
use std::collections::BTreeMap;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: parallel accumulation merges to the sequential result.
    #[test]
    fn prop_parallel_accumulation_matches_sequential(
        entries in prop::collection::vec((0i32..50, 1u32..100), 1..100),
        bucket_count in 1usize..20,
    ) {
        // Integral values keep float addition exact, so the comparison is
        // order-independent even though the schedule is not.
        let mut expected: BTreeMap<i32, f64> = BTreeMap::new();
        for &(key, value) in &entries {
            *expected.entry(key).or_insert(0.0) += value as f64;
        }

        let map = ConcurrentMap::new(bucket_count);
        entries.par_iter().for_each(|&(key, value)| {
            *map.slot(key) += value as f64;
        });

        prop_assert_eq!(map.into_ordered(), expected);
    }

    /// Property: removal wins over any earlier accumulation.
    #[test]
    fn prop_removed_keys_stay_removed(
        entries in prop::collection::vec((0i32..20, 1u32..10), 1..50),
        removed in prop::collection::btree_set(0i32..20, 1..5),
    ) {
        let map = ConcurrentMap::new(8);
        entries.par_iter().for_each(|&(key, value)| {
            *map.slot(key) += value as f64;
        });
        for &key in &removed {
            map.remove(key);
        }

        let merged = map.into_ordered();
        for key in removed {
            prop_assert!(!merged.contains_key(&key));
        }
    }
}
