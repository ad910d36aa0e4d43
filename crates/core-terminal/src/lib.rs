//! Full-screen terminal session for the visualizer.
//!
//! While bars are on screen the terminal is in raw mode on the alternate
//! screen with the cursor hidden. `TerminalGuard` hands the shell back on
//! drop; `TerminalGuard::restore` does the same but reports failures.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;
use tracing::{debug, warn};

pub mod capabilities;
pub use capabilities::{ColorDepth, TerminalCapabilities};

/// Window title shown while the visualizer runs.
pub const WINDOW_TITLE: &str = "Sorting Algorithm Visualizer!";

pub trait TerminalBackend {
    /// Switch to the visualizer screen. Idempotent.
    fn enter(&mut self) -> Result<()>;
    /// Give the screen back to the shell. Idempotent.
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current size as (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;
}

/// Who currently owns the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Shell,
    Visualizer,
}

#[derive(Debug)]
pub struct CrosstermBackend {
    screen: Screen,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            screen: Screen::Shell,
        }
    }

    /// Take over the screen for the lifetime of the returned guard.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: Some(self),
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if self.screen == Screen::Visualizer {
            return Ok(());
        }
        enable_raw_mode()?;
        // Raw mode without the alternate screen would leave the shell unusable.
        if let Err(err) = execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        self.screen = Screen::Visualizer;
        debug!(target: "runtime", "terminal_entered");
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.screen == Screen::Shell {
            return Ok(());
        }
        // Mark first: a half-restored terminal is not retried from Drop.
        self.screen = Screen::Shell;
        let screen = execute!(stdout(), LeaveAlternateScreen, Show);
        let raw = disable_raw_mode();
        debug!(target: "runtime", "terminal_left");
        screen?;
        raw?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(crossterm::terminal::size()?)
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Scoped ownership of the visualizer screen.
pub struct TerminalGuard<'a> {
    backend: Option<&'a mut CrosstermBackend>,
}

impl TerminalGuard<'_> {
    pub fn size(&self) -> Result<(u16, u16)> {
        match &self.backend {
            Some(backend) => backend.size(),
            None => Ok(crossterm::terminal::size()?),
        }
    }

    /// Hand the screen back now, surfacing any error instead of swallowing it.
    pub fn restore(mut self) -> Result<()> {
        match self.backend.take() {
            Some(backend) => backend.leave(),
            None => Ok(()),
        }
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if let Some(backend) = self.backend.take()
            && let Err(err) = backend.leave()
        {
            warn!(target: "runtime", error = %err, "terminal_restore_failed");
        }
    }
}
