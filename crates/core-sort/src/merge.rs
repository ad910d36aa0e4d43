use crate::{Highlight, HighlightSet, Step, StepEmitter};
use core_model::{ArrayModel, SortDirection};

/// Pending work, in place of the recursive call stack. Ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Split { start: usize, end: usize },
    Merge { start: usize, mid: usize, end: usize },
}

/// An in-progress merge of `start..=mid` and `mid+1..=end`.
#[derive(Debug, Clone)]
struct MergePass {
    left: Vec<i32>,
    right: Vec<i32>,
    i: usize,
    j: usize,
    k: usize,
}

impl MergePass {
    fn new(array: &ArrayModel, start: usize, mid: usize, end: usize) -> Self {
        Self {
            left: array.slice_to_vec(start, mid),
            right: array.slice_to_vec(mid + 1, end),
            i: 0,
            j: 0,
            k: start,
        }
    }

    /// Write the next destination slot, returning its index, or `None` once
    /// both buffers are drained.
    fn write_next(&mut self, direction: SortDirection, array: &mut ArrayModel) -> Option<usize> {
        let left = self.left.get(self.i).copied();
        let right = self.right.get(self.j).copied();
        let value = match (left, right) {
            (Some(l), Some(r)) => {
                if direction.in_order(l, r) {
                    self.i += 1;
                    l
                } else {
                    self.j += 1;
                    r
                }
            }
            (Some(l), None) => {
                self.i += 1;
                l
            }
            (None, Some(r)) => {
                self.j += 1;
                r
            }
            (None, None) => return None,
        };
        let k = self.k;
        array.set(k, value);
        self.k += 1;
        Some(k)
    }
}

/// Top-down merge sort: left half, right half, then merge, depth-first.
#[derive(Debug, Clone)]
pub struct MergeSort {
    direction: SortDirection,
    stack: Vec<Task>,
    pass: Option<MergePass>,
}

impl MergeSort {
    pub fn new(direction: SortDirection, len: usize) -> Self {
        let stack = if len > 1 {
            vec![Task::Split {
                start: 0,
                end: len - 1,
            }]
        } else {
            Vec::new()
        };
        Self {
            direction,
            stack,
            pass: None,
        }
    }
}

impl StepEmitter for MergeSort {
    fn advance(&mut self, array: &mut ArrayModel) -> Step {
        loop {
            if let Some(pass) = self.pass.as_mut() {
                if let Some(k) = pass.write_next(self.direction, array) {
                    return Step::write(HighlightSet::single(k, Highlight::Settled));
                }
                self.pass = None;
            }

            match self.stack.pop() {
                None => return Step::Done,
                Some(Task::Split { start, end }) => {
                    if start < end {
                        let mid = start + (end - start) / 2;
                        // LIFO: left split runs first, merge last.
                        self.stack.push(Task::Merge { start, mid, end });
                        self.stack.push(Task::Split {
                            start: mid + 1,
                            end,
                        });
                        self.stack.push(Task::Split { start, end: mid });
                    }
                }
                Some(Task::Merge { start, mid, end }) => {
                    self.pass = Some(MergePass::new(array, start, mid, end));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StepKind;
    use crate::test_support::*;

    #[test]
    fn writes_follow_depth_first_order() {
        let mut array = model(&[4, 3, 2, 1]);
        let mut sort = MergeSort::new(SortDirection::Ascending, array.len());
        let reports = drain(&mut sort, &mut array);
        assert_eq!(array.values(), &[1, 2, 3, 4]);
        assert!(reports.iter().all(|r| r.kind == StepKind::Write));
        let written: Vec<usize> = reports
            .iter()
            .map(|r| r.highlights.iter().next().unwrap().0)
            .collect();
        // merge(0,0,1), merge(2,2,3), merge(0,1,3)
        assert_eq!(written, vec![0, 1, 2, 3, 0, 1, 2, 3]);
    }

    #[test]
    fn odd_length_splits_left_heavy() {
        let mut array = model(&[5, 3, 1, 4, 2]);
        let mut sort = MergeSort::new(SortDirection::Ascending, array.len());
        let reports = drain(&mut sort, &mut array);
        assert_eq!(array.values(), &[1, 2, 3, 4, 5]);
        // [0..=2] splits into [0..=1] and [2]; widths 2 + 3 + 2 + 5
        assert_eq!(reports.len(), 12);
    }

    #[test]
    fn equal_keys_prefer_left_buffer() {
        let mut array = model(&[1, 0, 1]);
        let mut sort = MergeSort::new(SortDirection::Descending, array.len());
        drain(&mut sort, &mut array);
        assert_eq!(array.values(), &[1, 1, 0]);
    }

    #[test]
    fn drains_remaining_right_buffer() {
        let mut pass_array = model(&[1, 2, 3, 4]);
        let mut pass = MergePass::new(&pass_array, 0, 1, 3);
        let mut order = Vec::new();
        while let Some(k) = pass.write_next(SortDirection::Ascending, &mut pass_array) {
            order.push(k);
        }
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(pass_array.values(), &[1, 2, 3, 4]);
    }
}
