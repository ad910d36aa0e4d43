use crate::{Highlight, HighlightSet, Step, StepEmitter};
use core_model::{ArrayModel, SortDirection};

/// Selection sort with per-comparison granularity: every inner comparison is
/// its own step, then one exchange step places the selected element.
///
/// For length `n` the run emits `n(n-1)/2` comparison steps and `n` exchange
/// steps (the exchange is reported even when the element is already in place).
#[derive(Debug, Clone)]
pub struct SelectionSort {
    direction: SortDirection,
    len: usize,
    i: usize,
    j: usize,
    min_index: usize,
}

impl SelectionSort {
    pub fn new(direction: SortDirection, len: usize) -> Self {
        Self {
            direction,
            len,
            i: 0,
            j: 1,
            min_index: 0,
        }
    }
}

impl StepEmitter for SelectionSort {
    fn advance(&mut self, array: &mut ArrayModel) -> Step {
        if self.i >= self.len {
            return Step::Done;
        }

        if self.j < self.len {
            let j = self.j;
            if self
                .direction
                .strictly_before(array.get(j), array.get(self.min_index))
            {
                self.min_index = j;
            }
            self.j += 1;
            return Step::compare(HighlightSet::pair(
                (j, Highlight::Active),
                (self.min_index, Highlight::Settled),
            ));
        }

        let (i, min_index) = (self.i, self.min_index);
        array.swap(i, min_index);
        self.i += 1;
        self.j = self.i + 1;
        self.min_index = self.i;
        Step::swap(HighlightSet::pair(
            (i, Highlight::Settled),
            (min_index, Highlight::Active),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StepKind;
    use crate::test_support::*;

    #[test]
    fn every_comparison_is_a_step() {
        let mut array = model(&[1, 2, 3, 4]);
        let mut sort = SelectionSort::new(SortDirection::Ascending, array.len());
        let reports = drain(&mut sort, &mut array);
        let compares = reports
            .iter()
            .filter(|r| r.kind == StepKind::Compare)
            .count();
        let swaps = reports.iter().filter(|r| r.kind == StepKind::Swap).count();
        assert_eq!(compares, 6);
        assert_eq!(swaps, 4);
        assert_eq!(array.values(), &[1, 2, 3, 4]);
    }

    #[test]
    fn step_sequence_for_three_elements() {
        let mut array = model(&[3, 1, 2]);
        let mut sort = SelectionSort::new(SortDirection::Ascending, array.len());
        let reports = drain(&mut sort, &mut array);
        assert_eq!(array.values(), &[1, 2, 3]);
        assert_eq!(
            reports.iter().map(marks).collect::<Vec<_>>(),
            vec![
                // scan from i=0: j=1 becomes the minimum, so it is both red and green
                vec![(1, Highlight::Settled)],
                vec![(2, Highlight::Active), (1, Highlight::Settled)],
                vec![(0, Highlight::Settled), (1, Highlight::Active)],
                // i=1 over [1,3,2]: j=2 holds the new minimum
                vec![(2, Highlight::Settled)],
                vec![(1, Highlight::Settled), (2, Highlight::Active)],
                // i=2: nothing left to scan, self exchange
                vec![(2, Highlight::Active)],
            ]
        );
    }

    #[test]
    fn descending_selects_maximum() {
        let mut array = model(&[2, 9, 4, 9]);
        let mut sort = SelectionSort::new(SortDirection::Descending, array.len());
        drain(&mut sort, &mut array);
        assert_eq!(array.values(), &[9, 9, 4, 2]);
    }
}
