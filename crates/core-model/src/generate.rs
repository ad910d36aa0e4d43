//! Random starting lists.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of a generated list: `len` values drawn uniformly from `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSpec {
    pub len: usize,
    pub min: i32,
    pub max: i32,
}

impl Default for ListSpec {
    fn default() -> Self {
        Self {
            len: 50,
            min: 0,
            max: 100,
        }
    }
}

/// Owns the RNG used for the initial list and every reset.
#[derive(Debug, Clone)]
pub struct ListGenerator {
    spec: ListSpec,
    rng: StdRng,
}

impl ListGenerator {
    /// Seed from the OS; every run differs.
    pub fn from_os(spec: ListSpec) -> Self {
        Self {
            spec,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence of lists for a given seed.
    pub fn seeded(spec: ListSpec, seed: u64) -> Self {
        Self {
            spec,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn spec(&self) -> ListSpec {
        self.spec
    }

    pub fn generate(&mut self) -> Vec<i32> {
        let ListSpec { len, min, max } = self.spec;
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        (0..len).map(|_| self.rng.random_range(lo..=hi)).collect()
    }
}
