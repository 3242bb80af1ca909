//! Local-search optimizers built entirely on the exchange engine.

mod annealing;
mod gradient;

pub use annealing::SimulatedAnnealing;
pub use gradient::GradientDescent;

use mander_core::{Communities, Graph, Result};
use mander_scoring::Fitness;

use crate::context::SolveContext;

/// Counters reported by one optimizer run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptimizeStats {
    /// Exchanges committed to the partition.
    pub steps: u64,
    /// Candidate evaluations (tentative applies).
    pub evaluated: u64,
    /// Evaluated candidates that were accepted.
    pub accepted: u64,
    /// Evaluated candidates that were reverted.
    pub rejected: u64,
    pub initial_fitness: f64,
    pub final_fitness: f64,
}

/// A local-search pass over an existing partition.
///
/// Implementations mutate the partition exclusively through
/// [`ExchangeEngine`](crate::exchange::ExchangeEngine) and score it through
/// the caller-supplied [`Fitness`]; they never reach into graph or
/// community internals.
pub trait Optimizer {
    fn optimize<F: Fitness>(
        &mut self,
        graph: &mut Graph,
        communities: &mut Communities,
        fitness: &F,
        ctx: &mut SolveContext,
    ) -> Result<OptimizeStats>;
}
