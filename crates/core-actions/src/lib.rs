//! Animation driver: the Idle/Sorting state machine between input commands,
//! the array model and the active step emitter.
//!
//! The driver is purely synchronous. The runtime feeds it `CommandEvent`s as
//! they arrive and calls [`AnimationDriver::tick`] once per frame; each call
//! returns enough information for the caller to decide whether to repaint or
//! exit.

mod driver;
mod status;

pub use driver::{AnimationDriver, DriverState, TickOutcome};
pub use status::{RunPhase, StatusSnapshot};

/// Result of dispatching a single `CommandEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// The array was replaced wholesale (reset). Cached frame rows no longer
    /// describe it and the next render should be a full frame.
    pub array_replaced: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            array_replaced: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            array_replaced: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: false,
            quit: true,
            array_replaced: false,
        }
    }
    pub fn array_replaced() -> Self {
        Self {
            dirty: true,
            quit: false,
            array_replaced: true,
        }
    }
}
