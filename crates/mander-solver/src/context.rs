//! Run-level solve context.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Top-level state for one solving run.
///
/// Owns the single random source shared by the partitioner and simulated
/// annealing. It is seeded exactly once, here, and never re-seeded mid-run;
/// ChaCha keeps the stream identical across platforms and releases, which
/// seeded-determinism tests rely on.
#[derive(Debug, Clone)]
pub struct SolveContext {
    rng: ChaCha8Rng,
    start_time: Option<Instant>,
    total_step_count: u64,
}

impl SolveContext {
    /// Context with an OS-entropy seed.
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_os_rng())
    }

    /// Context with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Context seeded from config: fixed when a seed is given, OS entropy
    /// otherwise.
    pub fn from_config_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        SolveContext {
            rng,
            start_time: None,
            total_step_count: 0,
        }
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }
}

impl Default for SolveContext {
    fn default() -> Self {
        Self::new()
    }
}
