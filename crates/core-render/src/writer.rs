//! Batched terminal command queue.
//!
//! Rows are emitted cell by cell; consecutive cells sharing colors are merged
//! into one `Print` so a solid bar segment costs a single command. Color
//! changes and cursor moves close the current batch.
//!
//! Metrics:
//! * `print_commands`: `Print` commands issued after batching.
//! * `cells_printed`: cells written. Always `>= print_commands`.

use crate::Rgb;
use crate::palette::Palette;
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    Colors { fg: Rgb, bg: Rgb },
    Print(String),
}

#[derive(Debug, Default)]
pub struct BatchWriter {
    cmds: Vec<Command>,
    pending: String,
    colors: Option<(Rgb, Rgb)>,
    pub print_commands: u64,
    pub cells_printed: u64,
}

impl BatchWriter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let s = std::mem::take(&mut self.pending);
        self.cmds.push(Command::Print(s));
        self.print_commands += 1;
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.flush_pending();
        self.cmds.push(Command::MoveTo(x, y));
    }

    /// Queue one cell. A color change closes the running batch.
    pub fn cell(&mut self, ch: char, fg: Rgb, bg: Rgb) {
        if self.colors != Some((fg, bg)) {
            self.flush_pending();
            self.cmds.push(Command::Colors { fg, bg });
            self.colors = Some((fg, bg));
        }
        self.pending.push(ch);
        self.cells_printed += 1;
    }

    /// Commands queued so far (pending batch excluded).
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Emit everything to `out`, mapping colors through `palette`.
    pub fn flush_to<W: Write>(mut self, out: &mut W, palette: &Palette) -> Result<(u64, u64)> {
        self.flush_pending();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::Colors { fg, bg } => {
                    queue!(
                        out,
                        SetForegroundColor(palette.terminal_color(fg)),
                        SetBackgroundColor(palette.terminal_color(bg))
                    )?;
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
            }
        }
        queue!(out, ResetColor)?;
        out.flush()?;
        Ok((self.print_commands, self.cells_printed))
    }
}
