//! Board composition: header text and bars drawn onto a `Surface`.
//!
//! Row 0 holds the centered title, rows 1-2 the help lines, row 3 the status
//! line; row 4 is a gap above the plot area. Bars come from the array's
//! `BarLayout`, so the surface must match the viewport the array was laid
//! out for.

use crate::palette::Palette;
use crate::surface::Surface;
use core_actions::{AnimationDriver, StatusSnapshot};
use core_model::ArrayModel;
use core_sort::HighlightSet;

pub const HELP_CONTROLS: &str = "R - Reset | SPACE - Start Sorting | A - Ascending | D - Descending";
pub const HELP_ALGORITHMS: &str =
    "I - Insertion | S - Selection | B - Bubble | M - Merge | Q - Quick | H - Heap";

pub const TITLE_ROW: u16 = 0;
pub const HELP_ROW: u16 = 1;
pub const STATUS_ROW: u16 = 3;

/// Borrowed snapshot of everything a frame shows.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub array: &'a ArrayModel,
    pub highlights: &'a HighlightSet,
    pub status: StatusSnapshot,
}

impl<'a> BoardView<'a> {
    pub fn from_driver(driver: &'a AnimationDriver) -> Self {
        Self {
            array: driver.array(),
            highlights: driver.highlights(),
            status: driver.status(),
        }
    }
}

/// Column at which `text` starts when centered in `columns` (0 if it does not fit).
pub fn centered_x(columns: u16, text: &str) -> u16 {
    let len = text.chars().count().min(u16::MAX as usize) as u16;
    columns.saturating_sub(len) / 2
}

/// Paint the whole board. Does not present.
pub fn compose<S: Surface + ?Sized>(surface: &mut S, view: &BoardView<'_>, palette: &Palette) {
    let (columns, _) = surface.size();
    surface.clear(palette.background);

    let title = view.status.title();
    surface.draw_text(centered_x(columns, &title), TITLE_ROW, &title, palette.title);
    for (offset, line) in [HELP_CONTROLS, HELP_ALGORITHMS].into_iter().enumerate() {
        surface.draw_text(
            centered_x(columns, line),
            HELP_ROW + offset as u16,
            line,
            palette.text,
        );
    }
    let status = view.status.status_line();
    surface.draw_text(centered_x(columns, &status), STATUS_ROW, &status, palette.text);

    let layout = view.array.layout();
    for (index, &value) in view.array.values().iter().enumerate() {
        let rect = layout.bar_rect(index, value);
        if rect.is_empty() {
            continue;
        }
        let color = palette.bar_color(index, view.highlights.get(index));
        surface.fill_rect(rect, color);
    }
}
