#![allow(dead_code)] // Shared across the integration test binaries; each uses a subset.

use core_actions::{AnimationDriver, TickOutcome};
use core_model::{ListGenerator, ListSpec, Viewport};

pub fn seeded_driver(len: usize, seed: u64) -> AnimationDriver {
    let spec = ListSpec {
        len,
        min: 0,
        max: 100,
    };
    AnimationDriver::new(ListGenerator::seeded(spec, seed), Viewport::new(104, 40))
}

/// Tick until the run finishes, returning every outcome observed.
pub fn tick_to_completion(driver: &mut AnimationDriver) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    loop {
        let outcome = driver.tick();
        outcomes.push(outcome);
        match outcome {
            TickOutcome::Finished { .. } | TickOutcome::Idle => return outcomes,
            TickOutcome::Stepped(_) => {}
        }
        assert!(outcomes.len() < 1_000_000, "driver never finished");
    }
}
