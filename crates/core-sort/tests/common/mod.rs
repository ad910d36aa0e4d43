#![allow(dead_code)] // Shared across the integration test binaries; each uses a subset.

use core_model::{Algorithm, ArrayModel, SortDirection, Viewport};
use core_sort::{SortRun, Step, StepEmitter, StepReport};

pub fn model(values: &[i32]) -> ArrayModel {
    ArrayModel::new(values.to_vec(), Viewport::new(120, 40))
}

/// Run `algorithm` over `values` to completion.
pub fn run(
    algorithm: Algorithm,
    direction: SortDirection,
    values: &[i32],
) -> (Vec<i32>, Vec<StepReport>) {
    let mut array = model(values);
    let mut sort = SortRun::new(algorithm, direction, &array);
    let mut reports = Vec::new();
    while let Step::Progressed(report) = sort.advance(&mut array) {
        reports.push(report);
        assert!(
            reports.len() <= 10_000_000,
            "{algorithm} did not terminate on {values:?}"
        );
    }
    (array.values().to_vec(), reports)
}

pub fn sorted_copy(values: &[i32], direction: SortDirection) -> Vec<i32> {
    let mut out = values.to_vec();
    match direction {
        SortDirection::Ascending => out.sort_unstable(),
        SortDirection::Descending => out.sort_unstable_by(|a, b| b.cmp(a)),
    }
    out
}

/// Number of pairs out of order for `direction`.
pub fn inversions(values: &[i32], direction: SortDirection) -> usize {
    let mut count = 0;
    for i in 0..values.len() {
        for j in i + 1..values.len() {
            if !direction.in_order(values[i], values[j]) {
                count += 1;
            }
        }
    }
    count
}

pub fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}
