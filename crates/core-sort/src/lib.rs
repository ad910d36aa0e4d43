//! Step emitters: sorting algorithms restructured as resumable state machines.
//!
//! Each emitter keeps every piece of state its algorithm needs across
//! suspension points (loop counters, boundary markers, explicit work stacks in
//! place of recursion) and exposes a single operation, [`StepEmitter::advance`],
//! which performs one unit of work on the [`ArrayModel`] and returns control to
//! the caller together with the indices to highlight.
//!
//! Step granularity contract:
//! * Bubble, insertion, quick and heap emit a step only when they exchange two
//!   elements (self-exchanges included).
//! * Merge emits one step per positional write during a merge pass.
//! * Selection emits one step per inner comparison, whether or not a new
//!   minimum was found, plus one exchange step per outer position.
//!
//! Recursive algorithms push pending ranges on an explicit stack so that the
//! depth-first, left-before-right order of the recursive formulation (and so
//! the exact step and highlight sequence) is preserved.
//!
//! Calling `advance` after it returned [`Step::Done`] keeps returning `Done`.

use core_model::{Algorithm, ArrayModel, SortDirection};
use smallvec::SmallVec;

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::BubbleSort;
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

/// Color role of a highlighted bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Green: settled / lesser side of the operation.
    Settled,
    /// Red: active / greater side of the operation.
    Active,
}

/// Indices touched by one step. At most two entries in practice, so the marks
/// live inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    marks: SmallVec<[(usize, Highlight); 2]>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `index`. Marking an index twice keeps its first position but the
    /// later color wins.
    pub fn mark(&mut self, index: usize, highlight: Highlight) -> &mut Self {
        if let Some(slot) = self.marks.iter_mut().find(|(i, _)| *i == index) {
            slot.1 = highlight;
        } else {
            self.marks.push((index, highlight));
        }
        self
    }

    /// Two-entry set in mark order.
    pub fn pair(first: (usize, Highlight), second: (usize, Highlight)) -> Self {
        let mut set = Self::new();
        set.mark(first.0, first.1).mark(second.0, second.1);
        set
    }

    pub fn single(index: usize, highlight: Highlight) -> Self {
        let mut set = Self::new();
        set.mark(index, highlight);
        set
    }

    pub fn get(&self, index: usize) -> Option<Highlight> {
        self.marks
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, h)| *h)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Highlight)> + '_ {
        self.marks.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

/// What the step did to the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Comparison only; the array is unchanged (selection sort scan).
    Compare,
    /// Two positions exchanged their values.
    Swap,
    /// One position overwritten from a merge buffer.
    Write,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub kind: StepKind,
    pub highlights: HighlightSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Progressed(StepReport),
    Done,
}

impl Step {
    pub(crate) fn swap(highlights: HighlightSet) -> Self {
        Step::Progressed(StepReport {
            kind: StepKind::Swap,
            highlights,
        })
    }

    pub(crate) fn compare(highlights: HighlightSet) -> Self {
        Step::Progressed(StepReport {
            kind: StepKind::Compare,
            highlights,
        })
    }

    pub(crate) fn write(highlights: HighlightSet) -> Self {
        Step::Progressed(StepReport {
            kind: StepKind::Write,
            highlights,
        })
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done)
    }
}

/// One algorithm's progress through a single sort run.
pub trait StepEmitter {
    /// Perform one unit of work on `array` and report it, or `Done`.
    fn advance(&mut self, array: &mut ArrayModel) -> Step;
}

#[derive(Debug, Clone)]
enum Emitter {
    Bubble(BubbleSort),
    Insertion(InsertionSort),
    Selection(SelectionSort),
    Merge(MergeSort),
    Quick(QuickSort),
    Heap(HeapSort),
}

/// The emitter for the algorithm chosen when the run started.
#[derive(Debug, Clone)]
pub struct SortRun {
    algorithm: Algorithm,
    direction: SortDirection,
    len: usize,
    emitter: Emitter,
}

impl SortRun {
    pub fn new(algorithm: Algorithm, direction: SortDirection, array: &ArrayModel) -> Self {
        let len = array.len();
        let emitter = match algorithm {
            Algorithm::Bubble => Emitter::Bubble(BubbleSort::new(direction, len)),
            Algorithm::Insertion => Emitter::Insertion(InsertionSort::new(direction, len)),
            Algorithm::Selection => Emitter::Selection(SelectionSort::new(direction, len)),
            Algorithm::Merge => Emitter::Merge(MergeSort::new(direction, len)),
            Algorithm::Quick => Emitter::Quick(QuickSort::new(direction, len)),
            Algorithm::Heap => Emitter::Heap(HeapSort::new(direction, len)),
        };
        tracing::debug!(
            target: "sort",
            algorithm = algorithm.as_str(),
            direction = direction.label(),
            len,
            "emitter_created"
        );
        Self {
            algorithm,
            direction,
            len,
            emitter,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl StepEmitter for SortRun {
    fn advance(&mut self, array: &mut ArrayModel) -> Step {
        debug_assert_eq!(
            array.len(),
            self.len,
            "array replaced underneath an active sort run"
        );
        match &mut self.emitter {
            Emitter::Bubble(e) => e.advance(array),
            Emitter::Insertion(e) => e.advance(array),
            Emitter::Selection(e) => e.advance(array),
            Emitter::Merge(e) => e.advance(array),
            Emitter::Quick(e) => e.advance(array),
            Emitter::Heap(e) => e.advance(array),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn remark_keeps_position_and_takes_last_color() {
        let set = HighlightSet::pair((3, Highlight::Settled), (3, Highlight::Active));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(3), Some(Highlight::Active));

        let set = HighlightSet::pair((1, Highlight::Active), (4, Highlight::Settled));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![(1, Highlight::Active), (4, Highlight::Settled)]
        );
        assert_eq!(set.get(2), None);
    }

    #[test]
    fn done_is_sticky_for_every_algorithm() {
        for algorithm in Algorithm::ALL {
            let mut array = model(&[4, 1, 3]);
            let mut run = SortRun::new(algorithm, SortDirection::Ascending, &array);
            drain(&mut run, &mut array);
            assert!(run.advance(&mut array).is_done(), "{algorithm}");
            assert!(run.advance(&mut array).is_done(), "{algorithm}");
            assert_eq!(array.values(), &[1, 3, 4], "{algorithm}");
        }
    }

    #[test]
    fn run_remembers_configuration() {
        let array = model(&[2, 1]);
        let run = SortRun::new(Algorithm::Heap, SortDirection::Descending, &array);
        assert_eq!(run.algorithm(), Algorithm::Heap);
        assert_eq!(run.direction(), SortDirection::Descending);
    }

    #[test]
    fn degenerate_inputs_finish_without_mutation_steps() {
        for algorithm in Algorithm::ALL {
            for values in [&[][..], &[9][..]] {
                let mut array = model(values);
                let mut run = SortRun::new(algorithm, SortDirection::Ascending, &array);
                let reports = drain(&mut run, &mut array);
                // Selection still reports its self-exchange for each position.
                let expected = if algorithm == Algorithm::Selection {
                    values.len()
                } else {
                    0
                };
                assert_eq!(reports.len(), expected, "{algorithm} on {values:?}");
                assert_eq!(array.values(), values);
            }
        }
    }
}
