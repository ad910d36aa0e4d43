//! Presentation counters.
//!
//! Records what the engine actually emitted, independent of how many frames
//! the runtime asked for. Relaxed atomics: values are diagnostics only.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RenderPathMetrics {
    /// Frames where every row was repainted (cold cache, resize, forced).
    pub full_frames: AtomicU64,
    /// Frames where unchanged rows were skipped.
    pub partial_frames: AtomicU64,
    pub rows_repainted: AtomicU64,
    pub rows_skipped: AtomicU64,
    /// Cache invalidations caused by resize or array replacement.
    pub resize_invalidations: AtomicU64,
    pub print_commands: AtomicU64,
    pub cells_printed: AtomicU64,
    /// Duration (ns) of the most recent present.
    pub last_render_ns: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderPathMetricsSnapshot {
    pub full_frames: u64,
    pub partial_frames: u64,
    pub rows_repainted: u64,
    pub rows_skipped: u64,
    pub resize_invalidations: u64,
    pub print_commands: u64,
    pub cells_printed: u64,
    pub last_render_ns: u64,
}

impl RenderPathMetrics {
    pub fn snapshot(&self) -> RenderPathMetricsSnapshot {
        RenderPathMetricsSnapshot {
            full_frames: self.full_frames.load(Ordering::Relaxed),
            partial_frames: self.partial_frames.load(Ordering::Relaxed),
            rows_repainted: self.rows_repainted.load(Ordering::Relaxed),
            rows_skipped: self.rows_skipped.load(Ordering::Relaxed),
            resize_invalidations: self.resize_invalidations.load(Ordering::Relaxed),
            print_commands: self.print_commands.load(Ordering::Relaxed),
            cells_printed: self.cells_printed.load(Ordering::Relaxed),
            last_render_ns: self.last_render_ns.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }
}
