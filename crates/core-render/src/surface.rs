//! Drawing surface abstraction.
//!
//! Board composition only needs four primitives plus `present`. `Frame`
//! implements the trait directly (present is a no-op) so composition can be
//! tested without a terminal; `TerminalSurface` owns a frame and pushes it
//! through the diff engine to any `io::Write`.

use crate::palette::Palette;
use crate::render_engine::{PresentReport, RenderEngine};
use crate::{Frame, Rgb};
use anyhow::Result;
use core_model::LayoutRegion;
use std::io::{Stdout, Write, stdout};
use tracing::debug;

pub trait Surface {
    /// Current size as (columns, rows).
    fn size(&self) -> (u16, u16);
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, rect: LayoutRegion, color: Rgb);
    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Rgb);
    /// Make everything drawn since the last present visible.
    fn present(&mut self) -> Result<()>;
}

impl Surface for Frame {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) {
        Frame::clear(self, color);
    }

    fn fill_rect(&mut self, rect: LayoutRegion, color: Rgb) {
        Frame::fill_rect(self, rect, color);
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Rgb) {
        Frame::draw_text(self, x, y, text, color);
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct TerminalSurface<W: Write> {
    frame: Frame,
    engine: RenderEngine,
    palette: Palette,
    out: W,
    last_report: PresentReport,
}

impl TerminalSurface<Stdout> {
    pub fn stdout(palette: Palette, columns: u16, rows: u16) -> Self {
        Self::new(stdout(), palette, columns, rows)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, palette: Palette, columns: u16, rows: u16) -> Self {
        Self {
            frame: Frame::new(columns, rows),
            engine: RenderEngine::new(),
            palette,
            out,
            last_report: PresentReport::default(),
        }
    }

    /// Reallocate the frame for a new terminal size and drop the row cache.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        if (columns, rows) == (self.frame.width, self.frame.height) {
            return;
        }
        self.frame = Frame::new(columns, rows);
        self.engine.invalidate();
        debug!(target: "render", columns, rows, "surface_resized");
    }

    /// Repaint every row on the next present.
    pub fn force_full(&mut self) {
        self.engine.force_full();
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    pub fn last_report(&self) -> PresentReport {
        self.last_report
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> (u16, u16) {
        (self.frame.width, self.frame.height)
    }

    fn clear(&mut self, color: Rgb) {
        self.frame.clear(color);
    }

    fn fill_rect(&mut self, rect: LayoutRegion, color: Rgb) {
        self.frame.fill_rect(rect, color);
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Rgb) {
        self.frame.draw_text(x, y, text, color);
    }

    fn present(&mut self) -> Result<()> {
        self.last_report = self
            .engine
            .present(&self.frame, &self.palette, &mut self.out)?;
        Ok(())
    }
}
