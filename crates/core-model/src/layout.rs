//! Bar layout metrics.
//!
//! Geometry is expressed in terminal cells (`u16`). The top `HEADER_ROWS` rows
//! hold the title, help and status lines; bars grow upward from the bottom row
//! of the viewport. `SIDE_PAD` columns are split evenly left/right.
//!
//! Invariants:
//! * `bar_width >= 1` whenever the array is non-empty (bars past the right edge
//!   are clipped by the surface, never squeezed to zero width).
//! * A bar is at least one row tall when any plot rows exist, so the minimum
//!   value stays visible.
//! * `max == min` is treated as a span of one; no division by zero.

/// Columns reserved around the bar area (half on each side).
pub const SIDE_PAD: u16 = 4;
/// Rows reserved above the bar area for title, help and status lines.
pub const HEADER_ROWS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub columns: u16,
    pub rows: u16,
}

impl Viewport {
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }
}

/// Axis-aligned rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarLayout {
    pub bar_width: u16,
    pub origin_x: u16,
    /// First row of the plot area.
    pub top: u16,
    /// One past the last row of the plot area (the viewport height).
    pub bottom: u16,
    /// Rows per unit of value above `min`.
    pub scale: f32,
    min: i32,
}

impl BarLayout {
    pub fn compute(viewport: Viewport, len: usize, min: i32, max: i32) -> Self {
        let usable_cols = viewport.columns.saturating_sub(SIDE_PAD) as usize;
        let bar_width = if len == 0 {
            0
        } else {
            (usable_cols / len).clamp(1, u16::MAX as usize) as u16
        };
        let top = HEADER_ROWS.min(viewport.rows);
        let bottom = viewport.rows;
        let plot_rows = bottom - top;
        let span = (i64::from(max) - i64::from(min)).max(1);
        let scale = plot_rows as f32 / span as f32;
        Self {
            bar_width,
            origin_x: SIDE_PAD / 2,
            top,
            bottom,
            scale,
            min,
        }
    }

    pub fn plot_rows(&self) -> u16 {
        self.bottom - self.top
    }

    /// Height in rows of a bar for `value`.
    pub fn bar_height(&self, value: i32) -> u16 {
        let plot = self.plot_rows();
        if plot == 0 {
            return 0;
        }
        let above_min = (i64::from(value) - i64::from(self.min)).max(0) as f32;
        let rows = (above_min * self.scale).round() as u16;
        rows.clamp(1, plot)
    }

    /// Rectangle covered by the bar at `index`.
    pub fn bar_rect(&self, index: usize, value: i32) -> LayoutRegion {
        let offset = (index as u32).saturating_mul(u32::from(self.bar_width));
        let x = u32::from(self.origin_x)
            .saturating_add(offset)
            .min(u32::from(u16::MAX)) as u16;
        let height = self.bar_height(value);
        LayoutRegion::new(x, self.bottom - height, self.bar_width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_bars_fit_in_wide_terminal() {
        let l = BarLayout::compute(Viewport::new(104, 40), 50, 0, 100);
        assert_eq!(l.bar_width, 2);
        assert_eq!(l.origin_x, 2);
        assert_eq!(l.top, HEADER_ROWS);
        assert_eq!(l.plot_rows(), 35);
        let last = l.bar_rect(49, 100);
        assert_eq!(last.x + last.width, 102);
        assert_eq!(last.height, 35);
        assert_eq!(last.y, HEADER_ROWS);
    }

    #[test]
    fn narrow_terminal_keeps_one_column_bars() {
        let l = BarLayout::compute(Viewport::new(20, 10), 50, 0, 100);
        assert_eq!(l.bar_width, 1);
    }

    #[test]
    fn minimum_value_is_visible() {
        let l = BarLayout::compute(Viewport::new(80, 25), 10, 0, 100);
        assert_eq!(l.bar_height(0), 1);
        assert_eq!(l.bar_rect(3, 0).y, 24);
    }

    #[test]
    fn flat_range_does_not_divide_by_zero() {
        let l = BarLayout::compute(Viewport::new(80, 25), 3, 7, 7);
        assert!(l.scale.is_finite());
        assert_eq!(l.bar_height(7), 1);
    }

    #[test]
    fn tiny_viewport_has_no_plot_rows() {
        let l = BarLayout::compute(Viewport::new(10, 3), 4, 0, 10);
        assert_eq!(l.plot_rows(), 0);
        assert!(l.bar_rect(0, 10).is_empty());
    }
}
