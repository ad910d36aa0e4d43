//! Property tests over every algorithm and direction: termination, result
//! ordering, conservation of values and step-count bounds.

mod common;

use common::{ceil_log2, inversions, run, sorted_copy};
use core_model::{Algorithm, SortDirection};
use core_sort::StepKind;
use proptest::prelude::*;

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

fn direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

// Narrow value range so duplicates are common.
fn values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-20i32..20, 0..=200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    // Final array is the sorted permutation of the input.
    #[test]
    fn run_sorts_and_conserves_values(a in algorithm(), d in direction(), v in values()) {
        let (out, _) = run(a, d, &v);
        prop_assert!(d.is_sorted(&out));
        prop_assert_eq!(out, sorted_copy(&v, d));
    }

    // Highlights stay in bounds, are never empty, and carry at most two marks.
    #[test]
    fn highlights_are_in_bounds(a in algorithm(), d in direction(), v in values()) {
        let (_, reports) = run(a, d, &v);
        for report in &reports {
            prop_assert!(!report.highlights.is_empty());
            prop_assert!(report.highlights.len() <= 2);
            for (index, _) in report.highlights.iter() {
                prop_assert!(index < v.len());
            }
        }
    }

    // Comparison steps belong to selection, write steps to merge.
    #[test]
    fn step_kinds_match_algorithm(a in algorithm(), d in direction(), v in values()) {
        let (_, reports) = run(a, d, &v);
        for report in &reports {
            let allowed = match a {
                Algorithm::Selection => matches!(report.kind, StepKind::Compare | StepKind::Swap),
                Algorithm::Merge => report.kind == StepKind::Write,
                _ => report.kind == StepKind::Swap,
            };
            prop_assert!(allowed, "{} emitted {:?}", a, report.kind);
        }
    }

    // Adjacent-exchange sorts perform exactly one step per inversion.
    #[test]
    fn exchange_sorts_step_once_per_inversion(d in direction(), v in values()) {
        let expected = inversions(&v, d);
        for a in [Algorithm::Bubble, Algorithm::Insertion] {
            let (_, reports) = run(a, d, &v);
            prop_assert_eq!(reports.len(), expected, "{}", a);
        }
    }

    #[test]
    fn selection_step_count_is_fixed(d in direction(), v in values()) {
        let n = v.len();
        let (_, reports) = run(Algorithm::Selection, d, &v);
        let compares = reports.iter().filter(|r| r.kind == StepKind::Compare).count();
        let swaps = reports.iter().filter(|r| r.kind == StepKind::Swap).count();
        prop_assert_eq!(compares, n * n.saturating_sub(1) / 2);
        prop_assert_eq!(swaps, n);
    }

    #[test]
    fn divide_and_conquer_bounds(d in direction(), v in values()) {
        let n = v.len();
        let levels = ceil_log2(n);

        let (_, merge) = run(Algorithm::Merge, d, &v);
        prop_assert!(merge.len() <= n * levels);

        let (_, heap) = run(Algorithm::Heap, d, &v);
        prop_assert!(heap.len() <= n * (levels + 2));

        let (_, quick) = run(Algorithm::Quick, d, &v);
        prop_assert!(quick.len() <= n * n + n);
    }

    // Already ordered input needs no exchanges from the adjacent sorts.
    #[test]
    fn ordered_input_is_left_alone(d in direction(), v in values()) {
        let ordered = sorted_copy(&v, d);
        for a in [Algorithm::Bubble, Algorithm::Insertion] {
            let (out, reports) = run(a, d, &ordered);
            prop_assert!(reports.is_empty(), "{}", a);
            prop_assert_eq!(&out, &ordered);
        }
    }
}
