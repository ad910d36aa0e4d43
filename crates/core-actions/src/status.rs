use core_model::{Algorithm, SortDirection};
use std::fmt;

/// What the status line reports about the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Sorting,
    /// Idle after a run completed; cleared by reset or a configuration change.
    Sorted,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Sorting => "sorting",
            RunPhase::Sorted => "sorted",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy of the driver fields shown in the header lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub phase: RunPhase,
    pub algorithm: Algorithm,
    pub direction: SortDirection,
    pub steps: u64,
    pub len: usize,
}

impl StatusSnapshot {
    /// `"Bubble Sort - Ascending"`
    pub fn title(&self) -> String {
        format!("{} - {}", self.algorithm.name(), self.direction.label())
    }

    pub fn status_line(&self) -> String {
        format!("{} | steps: {} | n = {}", self.phase, self.steps, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_text() {
        let s = StatusSnapshot {
            phase: RunPhase::Sorting,
            algorithm: Algorithm::Quick,
            direction: SortDirection::Descending,
            steps: 42,
            len: 50,
        };
        assert_eq!(s.title(), "Quick Sort - Descending");
        assert_eq!(s.status_line(), "sorting | steps: 42 | n = 50");
    }
}
