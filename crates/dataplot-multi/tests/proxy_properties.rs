//! Property tests for broadcast semantics

use dataplot_multi::{Cleaner, FnReducer, Multi};
use proptest::prelude::*;

proptest! {
    #[test]
    fn collect_preserves_order_and_length(items in prop::collection::vec(-1000i64..1000, 0..50)) {
        let multi = Multi::new(items.clone());
        let out = multi.call(|i, x, _| (i, *x));
        prop_assert_eq!(out.len(), items.len());
        for (i, (idx, x)) in out.iter().enumerate() {
            prop_assert_eq!(*idx, i);
            prop_assert_eq!(*x, items[i]);
        }
    }

    #[test]
    fn reflex_fold_matches_prefix_sums(items in prop::collection::vec(-1000i64..1000, 1..50)) {
        let multi = Multi::new(items.clone()).with_reflex("acc");
        let out = multi.call(|_, x, prev: Option<&i64>| prev.copied().unwrap_or(0) + x);
        let mut acc = 0;
        for (got, x) in out.iter().zip(&items) {
            acc += x;
            prop_assert_eq!(*got, acc);
        }
    }

    #[test]
    fn reducer_sees_every_result(items in prop::collection::vec(0u32..100, 0..50)) {
        let multi = Multi::new(items.clone())
            .with_reducer(FnReducer::new(|v: Vec<u32>| v.len()));
        prop_assert_eq!(multi.call(|_, x, _| *x), items.len());
    }

    #[test]
    fn cleaner_is_none_iff_all_results_none(flags in prop::collection::vec(any::<bool>(), 0..20)) {
        let multi = Multi::new(flags.clone()).with_reducer(Cleaner);
        let out = multi.call(|_, keep, _| keep.then_some(1u8));
        prop_assert_eq!(out.is_none(), flags.iter().all(|f| !f));
    }

    #[test]
    fn single_is_last(items in prop::collection::vec(any::<i32>(), 0..20)) {
        let multi = Multi::new(items.clone());
        prop_assert_eq!(multi.single(), items.last());
    }
}
