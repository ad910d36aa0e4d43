//! Array model and sort selectors shared by the driver, the step emitters and
//! the renderer.
//!
//! `ArrayModel` owns the values being sorted together with the metrics derived
//! from them (cached min/max and the bar layout for the current viewport). It
//! is replaced wholesale on reset via [`ArrayModel::load`] and mutated one
//! element at a time by the active step emitter.
//!
//! Invariants (must hold after every public call):
//! * `min`/`max` describe the values passed to the last `load`. Emitters only
//!   permute or rewrite values taken from the array itself, so the cached range
//!   stays valid for the lifetime of one sort run.
//! * `layout` always reflects the current values length and viewport.
//! * Index arguments are trusted: out-of-range indices are a programming error
//!   in the calling algorithm and panic through slice indexing.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

mod generate;
mod layout;
pub use generate::{ListGenerator, ListSpec};
pub use layout::{BarLayout, HEADER_ROWS, LayoutRegion, SIDE_PAD, Viewport};

/// Target ordering for one sort run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Whether `a` may stay in front of `b`. Equal values are always in order,
    /// so no algorithm ever swaps equal elements.
    #[inline]
    pub fn in_order(self, a: i32, b: i32) -> bool {
        match self {
            SortDirection::Ascending => a <= b,
            SortDirection::Descending => a >= b,
        }
    }

    /// Strict variant: `a` must come before `b` and they differ.
    #[inline]
    pub fn strictly_before(self, a: i32, b: i32) -> bool {
        match self {
            SortDirection::Ascending => a < b,
            SortDirection::Descending => a > b,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }

    /// Check a whole slice against this direction.
    pub fn is_sorted(self, values: &[i32]) -> bool {
        values.windows(2).all(|w| self.in_order(w[0], w[1]))
    }
}

/// Closed set of animated algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    /// Display name used in the title line.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Heap => "Heap Sort",
        }
    }

    /// Stable lowercase identifier (config files, CLI, log fields).
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Selection => "selection",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm `{0}` (expected one of bubble, insertion, selection, merge, quick, heap)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// The array being visualized plus its derived display metrics.
#[derive(Debug, Clone)]
pub struct ArrayModel {
    values: Vec<i32>,
    min: i32,
    max: i32,
    viewport: Viewport,
    layout: BarLayout,
}

impl ArrayModel {
    pub fn new(values: Vec<i32>, viewport: Viewport) -> Self {
        let mut model = Self {
            values: Vec::new(),
            min: 0,
            max: 0,
            viewport,
            layout: BarLayout::default(),
        };
        model.load(values);
        model
    }

    /// Replace the array and recompute the cached range and layout.
    pub fn load(&mut self, values: Vec<i32>) {
        self.min = values.iter().copied().min().unwrap_or(0);
        self.max = values.iter().copied().max().unwrap_or(0);
        self.values = values;
        self.relayout();
        tracing::debug!(
            target: "model",
            len = self.values.len(),
            min = self.min,
            max = self.max,
            "array_loaded"
        );
    }

    /// Update the viewport after a terminal resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.relayout();
        }
    }

    fn relayout(&mut self) {
        self.layout = BarLayout::compute(self.viewport, self.values.len(), self.min, self.max);
    }

    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        self.values[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: i32) {
        self.values[index] = value;
    }

    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Copy of an inclusive index range (used by the merge phase buffers).
    pub fn slice_to_vec(&self, start: usize, end_inclusive: usize) -> Vec<i32> {
        self.values[start..=end_inclusive].to_vec()
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(values: Vec<i32>) -> ArrayModel {
        ArrayModel::new(values, Viewport::new(80, 30))
    }

    #[test]
    fn load_caches_range() {
        let mut m = model(vec![5, 3, 9, 1]);
        assert_eq!((m.min(), m.max()), (1, 9));
        m.load(vec![-4, 2]);
        assert_eq!((m.min(), m.max()), (-4, 2));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn empty_load_is_allowed() {
        let m = model(Vec::new());
        assert!(m.is_empty());
        assert_eq!((m.min(), m.max()), (0, 0));
    }

    #[test]
    fn set_and_swap_mutate_in_place() {
        let mut m = model(vec![1, 2, 3]);
        m.swap(0, 2);
        assert_eq!(m.values(), &[3, 2, 1]);
        m.set(1, 7);
        assert_eq!(m.get(1), 7);
        assert_eq!(m.slice_to_vec(1, 2), vec![7, 1]);
    }

    #[test]
    fn viewport_change_recomputes_layout() {
        let mut m = model(vec![1, 2, 3, 4]);
        let before = *m.layout();
        m.set_viewport(Viewport::new(40, 30));
        assert_ne!(before.bar_width, m.layout().bar_width);
    }

    #[test]
    fn direction_predicates() {
        assert!(SortDirection::Ascending.in_order(1, 1));
        assert!(SortDirection::Ascending.in_order(1, 2));
        assert!(!SortDirection::Ascending.in_order(2, 1));
        assert!(SortDirection::Descending.in_order(2, 1));
        assert!(SortDirection::Descending.in_order(2, 2));
        assert!(!SortDirection::Descending.strictly_before(2, 2));
        assert!(SortDirection::Descending.is_sorted(&[5, 5, 3, 1]));
        assert!(!SortDirection::Ascending.is_sorted(&[5, 5, 3, 1]));
    }

    #[test]
    fn algorithm_parse_round_trip_names() {
        for a in Algorithm::ALL {
            assert_eq!(a.as_str().parse::<Algorithm>().unwrap(), a);
        }
        assert_eq!(" Quick ".parse::<Algorithm>().unwrap(), Algorithm::Quick);
        let err = "bogo".parse::<Algorithm>().unwrap_err();
        assert!(err.to_string().contains("bogo"));
    }
}
