use crate::{Highlight, HighlightSet, Step, StepEmitter};
use core_model::{ArrayModel, SortDirection};

/// Element currently being walked left into the sorted prefix.
#[derive(Debug, Clone, Copy)]
struct Carry {
    pos: usize,
    value: i32,
}

/// Insertion sort; each shift-left of the carried element is one step.
#[derive(Debug, Clone)]
pub struct InsertionSort {
    direction: SortDirection,
    len: usize,
    next: usize,
    carry: Option<Carry>,
}

impl InsertionSort {
    pub fn new(direction: SortDirection, len: usize) -> Self {
        Self {
            direction,
            len,
            next: 1,
            carry: None,
        }
    }
}

impl StepEmitter for InsertionSort {
    fn advance(&mut self, array: &mut ArrayModel) -> Step {
        loop {
            if let Some(carry) = self.carry.as_mut() {
                let k = carry.pos;
                if k > 0 && !self.direction.in_order(array.get(k - 1), carry.value) {
                    let displaced = array.get(k - 1);
                    array.set(k, displaced);
                    array.set(k - 1, carry.value);
                    carry.pos = k - 1;

                    let landed = k - 1;
                    let mut highlights = HighlightSet::new();
                    if landed > 0 {
                        highlights.mark(landed - 1, Highlight::Settled);
                    }
                    highlights.mark(landed, Highlight::Active);
                    return Step::swap(highlights);
                }
                self.carry = None;
                self.next += 1;
            }

            if self.next >= self.len {
                return Step::Done;
            }
            self.carry = Some(Carry {
                pos: self.next,
                value: array.get(self.next),
            });
        }
    }
}
