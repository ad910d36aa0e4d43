use crate::{Highlight, HighlightSet, Step, StepEmitter};
use core_model::{ArrayModel, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Sift-downs still owed for nodes `0..next`, taken from the top.
    Build { next: usize },
    /// Root exchanges still owed for `1..=end`, taken from the top.
    Extract { end: usize },
    Finished,
}

/// A sift-down in progress: `node` within a heap of `size` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sift {
    size: usize,
    node: usize,
}

/// Heap sort. Ascending builds a max-heap, descending a min-heap; the root is
/// exchanged to the back of the shrinking heap each round.
#[derive(Debug, Clone)]
pub struct HeapSort {
    direction: SortDirection,
    len: usize,
    phase: Phase,
    sift: Option<Sift>,
}

impl HeapSort {
    pub fn new(direction: SortDirection, len: usize) -> Self {
        Self {
            direction,
            len,
            phase: Phase::Build { next: len / 2 },
            sift: None,
        }
    }

    /// Child that must move above `node`, if any. Only a strictly better child
    /// qualifies, and the right child must beat the left one to win.
    fn promoted_child(&self, array: &ArrayModel, sift: Sift) -> Option<usize> {
        let Sift { size, node } = sift;
        let mut best = node;
        for child in [2 * node + 1, 2 * node + 2] {
            if child < size && self.direction.strictly_before(array.get(best), array.get(child)) {
                best = child;
            }
        }
        (best != node).then_some(best)
    }
}

impl StepEmitter for HeapSort {
    fn advance(&mut self, array: &mut ArrayModel) -> Step {
        loop {
            if let Some(sift) = self.sift.take()
                && let Some(child) = self.promoted_child(array, sift)
            {
                array.swap(sift.node, child);
                self.sift = Some(Sift {
                    size: sift.size,
                    node: child,
                });
                return Step::swap(HighlightSet::pair(
                    (sift.node, Highlight::Settled),
                    (child, Highlight::Active),
                ));
            }

            match self.phase {
                Phase::Build { next: 0 } => {
                    self.phase = Phase::Extract {
                        end: self.len.saturating_sub(1),
                    };
                }
                Phase::Build { next } => {
                    let node = next - 1;
                    self.phase = Phase::Build { next: node };
                    self.sift = Some(Sift {
                        size: self.len,
                        node,
                    });
                }
                Phase::Extract { end: 0 } => {
                    self.phase = Phase::Finished;
                }
                Phase::Extract { end } => {
                    array.swap(end, 0);
                    self.phase = Phase::Extract { end: end - 1 };
                    self.sift = Some(Sift { size: end, node: 0 });
                    return Step::swap(HighlightSet::pair(
                        (end, Highlight::Settled),
                        (0, Highlight::Active),
                    ));
                }
                Phase::Finished => return Step::Done,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn build_then_extract_sequence() {
        let mut array = model(&[1, 3, 2]);
        let mut sort = HeapSort::new(SortDirection::Ascending, array.len());
        let reports = drain(&mut sort, &mut array);
        assert_eq!(array.values(), &[1, 2, 3]);
        assert_eq!(
            reports.iter().map(marks).collect::<Vec<_>>(),
            vec![
                // build: 3 rises over 1
                vec![(0, Highlight::Settled), (1, Highlight::Active)],
                // extract 3 to the back: [2,1,3]
                vec![(2, Highlight::Settled), (0, Highlight::Active)],
                // heap of two is already valid; extract 2: [1,2,3]
                vec![(1, Highlight::Settled), (0, Highlight::Active)],
            ]
        );
    }

    #[test]
    fn sift_descends_multiple_levels() {
        let mut array = model(&[0, 5, 4, 3, 2, 1, 1]);
        let mut sort = HeapSort::new(SortDirection::Ascending, array.len());
        let reports = drain(&mut sort, &mut array);
        assert_eq!(array.values(), &[0, 1, 1, 2, 3, 4, 5]);
        // Nodes 2 and 1 are already heaps; sifting the root walks 0 -> 1 -> 3.
        assert_eq!(
            marks(&reports[0]),
            vec![(0, Highlight::Settled), (1, Highlight::Active)]
        );
        assert_eq!(
            marks(&reports[1]),
            vec![(1, Highlight::Settled), (3, Highlight::Active)]
        );
    }

    #[test]
    fn descending_uses_min_heap() {
        let mut array = model(&[4, 8, 1, 8, 3]);
        let mut sort = HeapSort::new(SortDirection::Descending, array.len());
        drain(&mut sort, &mut array);
        assert_eq!(array.values(), &[8, 8, 4, 3, 1]);
    }

    #[test]
    fn equal_children_do_not_move() {
        let mut array = model(&[2, 2, 2]);
        let mut sort = HeapSort::new(SortDirection::Ascending, array.len());
        let reports = drain(&mut sort, &mut array);
        // only the two root exchanges
        assert_eq!(reports.len(), 2);
    }
}
