//! Row-diff presentation of composed frames.
//!
//! Every present hashes each frame row and compares it with the cached hash of
//! the row last emitted at that position. Changed rows are repainted in full
//! (one `MoveTo` plus color-batched prints); unchanged rows are skipped.
//!
//! Escalation to a full frame:
//! - cold cache (first present, after `invalidate`, or after a failed flush),
//! - frame geometry differs from the cached one (resize),
//! - an explicit `force_full` request (array replaced).

use crate::metrics::{RenderPathMetrics, RenderPathMetricsSnapshot};
use crate::palette::Palette;
use crate::row_cache::{RowCache, RowHash};
use crate::writer::BatchWriter;
use crate::Frame;
use anyhow::Result;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, trace};

/// What a single present emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentReport {
    pub full: bool,
    pub rows_repainted: u16,
    pub rows_skipped: u16,
}

#[derive(Debug, Default)]
pub struct RenderEngine {
    cache: RowCache,
    metrics: RenderPathMetrics,
    force_full: bool,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all cached rows; the next present repaints everything.
    pub fn invalidate(&mut self) {
        self.cache.clear();
        RenderPathMetrics::add(&self.metrics.resize_invalidations, 1);
        trace!(target: "render.engine", "cache_invalidated");
    }

    /// Repaint every row on the next present without dropping the cache.
    pub fn force_full(&mut self) {
        self.force_full = true;
    }

    pub fn metrics_snapshot(&self) -> RenderPathMetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn present<W: Write>(
        &mut self,
        frame: &Frame,
        palette: &Palette,
        out: &mut W,
    ) -> Result<PresentReport> {
        let started = Instant::now();
        let full = std::mem::take(&mut self.force_full) || self.cache.is_cold();
        self.cache.prepare(frame.width, frame.height);

        let mut writer = BatchWriter::new();
        let mut report = PresentReport {
            full,
            ..PresentReport::default()
        };
        for y in 0..frame.height {
            let row = frame.row(y);
            let changed = self.cache.update(y, RowHash::compute(row));
            if !(full || changed) {
                report.rows_skipped += 1;
                continue;
            }
            writer.move_to(0, y);
            for cell in row {
                writer.cell(cell.ch, cell.fg, cell.bg);
            }
            report.rows_repainted += 1;
        }

        let (print_commands, cells_printed) = match writer.flush_to(out, palette) {
            Ok(counts) => counts,
            Err(err) => {
                // Hashes above describe rows the terminal may never have received.
                self.cache.clear();
                debug!(target: "render.engine", error = %err, "flush_failed_cache_dropped");
                return Err(err);
            }
        };
        let m = &self.metrics;
        if full {
            RenderPathMetrics::add(&m.full_frames, 1);
        } else {
            RenderPathMetrics::add(&m.partial_frames, 1);
        }
        RenderPathMetrics::add(&m.rows_repainted, u64::from(report.rows_repainted));
        RenderPathMetrics::add(&m.rows_skipped, u64::from(report.rows_skipped));
        RenderPathMetrics::add(&m.print_commands, print_commands);
        RenderPathMetrics::add(&m.cells_printed, cells_printed);
        let ns = started.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
        m.last_render_ns
            .store(ns, std::sync::atomic::Ordering::Relaxed);
        trace!(
            target: "render.engine",
            full,
            repainted = report.rows_repainted,
            skipped = report.rows_skipped,
            print_commands,
            "frame_presented"
        );
        Ok(report)
    }
}
