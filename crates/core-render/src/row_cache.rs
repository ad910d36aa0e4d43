//! Per-row hashes of the last presented frame.
//!
//! Hashing strategy: ahash64 over every cell of the row (character plus both
//! colors), paired with the row width so a width change never compares equal.
//! The cache is cold (empty) after construction or `clear`; a cold or
//! mismatched-width cache makes every row count as changed.

use crate::Cell;
use ahash::AHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHash {
    pub hash: u64,
    pub width: u16,
}

impl RowHash {
    pub fn compute(row: &[Cell]) -> Self {
        let mut hasher = AHasher::default();
        row.hash(&mut hasher);
        Self {
            hash: hasher.finish(),
            width: row.len() as u16,
        }
    }
}

#[derive(Debug, Default)]
pub struct RowCache {
    width: u16,
    rows: Vec<Option<RowHash>>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.width = 0;
        self.rows.clear();
    }

    pub fn is_cold(&self) -> bool {
        self.rows.is_empty()
    }

    /// Size the cache for a frame, dropping every entry if the geometry changed.
    pub fn prepare(&mut self, width: u16, height: u16) {
        if self.width != width || self.rows.len() != height as usize {
            self.width = width;
            self.rows = vec![None; height as usize];
        }
    }

    /// Whether `row` needs repainting; records the new hash either way.
    pub fn update(&mut self, y: u16, hash: RowHash) -> bool {
        match self.rows.get_mut(y as usize) {
            Some(slot) => {
                let changed = *slot != Some(hash);
                *slot = Some(hash);
                changed
            }
            None => true,
        }
    }

    pub fn get(&self, y: u16) -> Option<RowHash> {
        self.rows.get(y as usize).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;

    #[test]
    fn unchanged_row_is_skipped_after_first_update() {
        let row = vec![Cell::blank(Rgb::WHITE); 8];
        let h = RowHash::compute(&row);
        let mut c = RowCache::new();
        assert!(c.is_cold());
        c.prepare(8, 2);
        assert!(c.update(0, h));
        assert!(!c.update(0, h));
    }

    #[test]
    fn color_change_alters_hash() {
        let a = vec![Cell::blank(Rgb::WHITE); 4];
        let mut b = a.clone();
        b[2].bg = Rgb(255, 0, 0);
        assert_ne!(RowHash::compute(&a), RowHash::compute(&b));
    }

    #[test]
    fn geometry_change_resets_entries() {
        let row = vec![Cell::blank(Rgb::WHITE); 4];
        let h = RowHash::compute(&row);
        let mut c = RowCache::new();
        c.prepare(4, 1);
        c.update(0, h);
        c.prepare(4, 2);
        assert_eq!(c.get(0), None);
        c.clear();
        assert!(c.is_cold());
    }
}
