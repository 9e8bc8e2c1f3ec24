//! Injectable randomness for fallback selection and reply delays.
//!
//! DESIGN
//! ======
//! The matcher and scheduler only ever need "pick an index below n", so the
//! seam is that single operation. Implementations take `&self` so a source
//! can be shared behind an `Arc` between the matcher and the scheduler task.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..upper`. Callers never pass `upper == 0`.
    fn below(&self, upper: usize) -> usize;
}

/// Thread-local OS-seeded generator. The default source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: usize) -> usize {
        rand::rng().random_range(0..upper.max(1))
    }
}

/// Deterministic generator for reproducible sessions.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..upper.max(1))
    }
}

#[cfg(test)]
#[path = "random_test.rs"]
mod tests;
