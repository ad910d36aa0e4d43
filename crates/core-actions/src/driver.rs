use crate::{DispatchResult, RunPhase, StatusSnapshot};
use core_events::CommandEvent;
use core_model::{Algorithm, ArrayModel, ListGenerator, SortDirection, Viewport};
use core_sort::{HighlightSet, SortRun, Step, StepEmitter, StepKind};
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Sorting,
}

impl DriverState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverState::Idle => "idle",
            DriverState::Sorting => "sorting",
        }
    }
}

/// What one frame tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No run active; nothing changed.
    Idle,
    /// The emitter advanced once.
    Stepped(StepKind),
    /// The emitter reported `Done`; the driver is back in Idle.
    Finished { steps: u64 },
}

impl TickOutcome {
    pub fn is_dirty(&self) -> bool {
        !matches!(self, TickOutcome::Idle)
    }
}

/// Owns the array, the list generator, the selected algorithm/direction and
/// (while Sorting) the active run.
///
/// Invariants:
/// * `run.is_some()` exactly when the state is `Sorting`.
/// * Algorithm and direction only change while Idle.
/// * The array is only replaced after the run has been dropped.
/// * `highlights` is empty while Idle.
#[derive(Debug)]
pub struct AnimationDriver {
    array: ArrayModel,
    generator: ListGenerator,
    algorithm: Algorithm,
    direction: SortDirection,
    run: Option<SortRun>,
    steps: u64,
    highlights: HighlightSet,
    completed: bool,
}

impl AnimationDriver {
    /// Generate the first array and start Idle with the default selection.
    pub fn new(mut generator: ListGenerator, viewport: Viewport) -> Self {
        let array = ArrayModel::new(generator.generate(), viewport);
        Self {
            array,
            generator,
            algorithm: Algorithm::default(),
            direction: SortDirection::default(),
            run: None,
            steps: 0,
            highlights: HighlightSet::new(),
            completed: false,
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn state(&self) -> DriverState {
        if self.run.is_some() {
            DriverState::Sorting
        } else {
            DriverState::Idle
        }
    }

    pub fn is_sorting(&self) -> bool {
        self.run.is_some()
    }

    pub fn array(&self) -> &ArrayModel {
        &self.array
    }

    /// Highlights of the most recent step (empty while Idle).
    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Steps taken by the current (or last completed) run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn status(&self) -> StatusSnapshot {
        let phase = match (self.is_sorting(), self.completed) {
            (true, _) => RunPhase::Sorting,
            (false, true) => RunPhase::Sorted,
            (false, false) => RunPhase::Idle,
        };
        StatusSnapshot {
            phase,
            algorithm: self.algorithm,
            direction: self.direction,
            steps: self.steps,
            len: self.array.len(),
        }
    }

    /// Terminal resized; only layout changes.
    pub fn resize(&mut self, viewport: Viewport) {
        self.array.set_viewport(viewport);
    }

    pub fn dispatch(&mut self, command: CommandEvent) -> DispatchResult {
        match command {
            CommandEvent::Quit => {
                info!(target: "driver", state = self.state().as_str(), "quit_requested");
                DispatchResult::quit()
            }
            CommandEvent::Reset => self.reset(),
            CommandEvent::Start => self.start(),
            CommandEvent::SetDirection(direction) => {
                if self.ignore_while_sorting(command) {
                    return DispatchResult::clean();
                }
                if self.direction == direction {
                    return DispatchResult::clean();
                }
                self.direction = direction;
                self.completed = false;
                debug!(target: "driver", direction = direction.label(), "direction_set");
                DispatchResult::dirty()
            }
            CommandEvent::SelectAlgorithm(algorithm) => {
                if self.ignore_while_sorting(command) {
                    return DispatchResult::clean();
                }
                if self.algorithm == algorithm {
                    return DispatchResult::clean();
                }
                self.algorithm = algorithm;
                self.completed = false;
                debug!(target: "driver", algorithm = algorithm.as_str(), "algorithm_selected");
                DispatchResult::dirty()
            }
        }
    }

    fn ignore_while_sorting(&self, command: CommandEvent) -> bool {
        if self.is_sorting() {
            debug!(
                target: "driver",
                command = command.as_str(),
                "command_ignored_while_sorting"
            );
            true
        } else {
            false
        }
    }

    fn reset(&mut self) -> DispatchResult {
        let cancelled = self.run.take().is_some();
        self.array.load(self.generator.generate());
        self.steps = 0;
        self.highlights = HighlightSet::new();
        self.completed = false;
        info!(
            target: "driver",
            len = self.array.len(),
            cancelled,
            "reset"
        );
        DispatchResult::array_replaced()
    }

    fn start(&mut self) -> DispatchResult {
        if self.ignore_while_sorting(CommandEvent::Start) {
            return DispatchResult::clean();
        }
        self.run = Some(SortRun::new(self.algorithm, self.direction, &self.array));
        self.steps = 0;
        self.completed = false;
        info!(
            target: "driver",
            algorithm = self.algorithm.as_str(),
            direction = self.direction.label(),
            len = self.array.len(),
            "sort_started"
        );
        DispatchResult::dirty()
    }

    /// Advance the active run by one step. No-op while Idle.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(run) = self.run.as_mut() else {
            return TickOutcome::Idle;
        };
        match run.advance(&mut self.array) {
            Step::Progressed(report) => {
                self.steps += 1;
                trace!(
                    target: "driver",
                    step = self.steps,
                    kind = ?report.kind,
                    marks = report.highlights.len(),
                    "step"
                );
                self.highlights = report.highlights;
                TickOutcome::Stepped(report.kind)
            }
            Step::Done => {
                self.run = None;
                self.highlights = HighlightSet::new();
                self.completed = true;
                info!(
                    target: "driver",
                    algorithm = self.algorithm.as_str(),
                    steps = self.steps,
                    "sort_finished"
                );
                TickOutcome::Finished { steps: self.steps }
            }
        }
    }
}
