//! Board rendering: frame grid, palette, composition and diff presentation.
//!
//! A frame is composed in full every time something changes (title, help,
//! status, bars) into a `Frame` of colored cells. Presentation compares each
//! row's hash against the previously emitted frame and writes only rows that
//! differ, so a single swap step usually touches the handful of rows spanned
//! by the two bars involved.
//!
//! Invariants:
//! - `Frame` dimensions always equal the terminal size last reported to the
//!   surface; drawing outside the grid is clipped, never a panic.
//! - The row cache is cleared whenever the frame is resized, forcing the next
//!   present to repaint every row.
//! - Colors are stored as `Rgb` and only mapped to the terminal's color depth
//!   at emission time.
//!
//! Exposed Components:
//! - `Cell` / `Frame`: logical grid backing composition.
//! - `surface`: the `Surface` trait and its crossterm-backed implementation.
//! - `palette`: board colors plus truecolor / 256-color mapping.
//! - `board`: paints title, help, status line and bars from the driver.
//! - `render_engine`: row-hash diff presentation with metrics.
//! - `writer`: batched terminal command queue over any `io::Write`.

use core_model::LayoutRegion;

pub mod board;
pub mod metrics;
pub mod palette;
pub mod render_engine;
pub mod row_cache;
pub mod surface;
pub mod writer;

pub use board::{BoardView, HELP_ALGORITHMS, HELP_CONTROLS, compose};
pub use palette::Palette;
pub use render_engine::RenderEngine;
pub use surface::{Surface, TerminalSurface};

/// 24-bit color. Mapped down to the terminal's depth when emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    pub const fn blank(bg: Rgb) -> Self {
        Self {
            ch: ' ',
            fg: Rgb::BLACK,
            bg,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Rgb::WHITE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Cells of row `y` (empty slice when out of range).
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Row text without colors; handy for assertions and logging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }

    pub fn clear(&mut self, bg: Rgb) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Paint `rect` with `color`, clipped to the grid.
    pub fn fill_rect(&mut self, rect: LayoutRegion, color: Rgb) {
        let x_end = rect.x.saturating_add(rect.width).min(self.width);
        let y_end = rect.y.saturating_add(rect.height).min(self.height);
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.set(x, y, Cell::blank(color));
            }
        }
    }

    /// Write `text` starting at (x, y) over the existing background. Characters
    /// past the right edge are dropped.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb) {
        for (col, ch) in (x..self.width).zip(text.chars()) {
            if let Some(i) = self.index(col, y) {
                let bg = self.cells[i].bg;
                self.cells[i] = Cell { ch, fg, bg };
            }
        }
    }
}
