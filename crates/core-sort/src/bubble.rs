use crate::{Highlight, HighlightSet, Step, StepEmitter};
use core_model::{ArrayModel, SortDirection};

/// Adjacent-exchange sort. Passes shrink by one from the right; a step fires
/// only for an exchange of `j` and `j + 1`.
#[derive(Debug, Clone)]
pub struct BubbleSort {
    direction: SortDirection,
    len: usize,
    pass: usize,
    j: usize,
}

impl BubbleSort {
    pub fn new(direction: SortDirection, len: usize) -> Self {
        Self {
            direction,
            len,
            pass: 0,
            j: 0,
        }
    }
}

impl StepEmitter for BubbleSort {
    fn advance(&mut self, array: &mut ArrayModel) -> Step {
        while self.pass + 1 < self.len {
            let limit = self.len - 1 - self.pass;
            while self.j < limit {
                let j = self.j;
                self.j += 1;
                if !self.direction.in_order(array.get(j), array.get(j + 1)) {
                    array.swap(j, j + 1);
                    return Step::swap(HighlightSet::pair(
                        (j, Highlight::Settled),
                        (j + 1, Highlight::Active),
                    ));
                }
            }
            self.pass += 1;
            self.j = 0;
        }
        Step::Done
    }
}
