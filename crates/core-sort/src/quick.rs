use crate::{Highlight, HighlightSet, Step, StepEmitter};
use core_model::{ArrayModel, SortDirection};

/// Lomuto partition state for `low..=high`. `store` is the next slot of the
/// "belongs before the pivot" prefix.
#[derive(Debug, Clone, Copy)]
struct Partition {
    low: usize,
    high: usize,
    pivot: i32,
    store: usize,
    j: usize,
}

/// Quick sort with the last element as pivot.
///
/// Steps are emitted for every qualifying exchange during the scan (including
/// exchanges of an element with itself) and once for the final pivot exchange.
/// Non-qualifying scan positions produce no step.
#[derive(Debug, Clone)]
pub struct QuickSort {
    direction: SortDirection,
    ranges: Vec<(usize, usize)>,
    partition: Option<Partition>,
}

impl QuickSort {
    pub fn new(direction: SortDirection, len: usize) -> Self {
        let ranges = if len > 1 { vec![(0, len - 1)] } else { Vec::new() };
        Self {
            direction,
            ranges,
            partition: None,
        }
    }
}

impl StepEmitter for QuickSort {
    fn advance(&mut self, array: &mut ArrayModel) -> Step {
        loop {
            if let Some(p) = self.partition.as_mut() {
                while p.j < p.high {
                    let j = p.j;
                    p.j += 1;
                    if self.direction.in_order(array.get(j), p.pivot) {
                        let i = p.store;
                        p.store += 1;
                        array.swap(i, j);
                        return Step::swap(HighlightSet::pair(
                            (i, Highlight::Settled),
                            (j, Highlight::Active),
                        ));
                    }
                }

                let Partition {
                    low, high, store, ..
                } = *p;
                self.partition = None;
                array.swap(store, high);
                // Right range first so the left one is processed next.
                self.ranges.push((store + 1, high));
                if store > low {
                    self.ranges.push((low, store - 1));
                }
                return Step::swap(HighlightSet::pair(
                    (store, Highlight::Settled),
                    (high, Highlight::Active),
                ));
            }

            match self.ranges.pop() {
                None => return Step::Done,
                Some((low, high)) if low < high => {
                    self.partition = Some(Partition {
                        low,
                        high,
                        pivot: array.get(high),
                        store: low,
                        j: low,
                    });
                }
                Some(_) => {}
            }
        }
    }
}
