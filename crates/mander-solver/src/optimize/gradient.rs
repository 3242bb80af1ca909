//! Greedy best-improvement local search.

use mander_core::{Communities, Graph, Result};
use mander_scoring::Fitness;
use tracing::{debug, info, trace, warn};

use crate::context::SolveContext;
use crate::exchange::{Exchange, ExchangeEngine};
use crate::optimize::{OptimizeStats, Optimizer};

/// Gradient descent over the exchange neighborhood.
///
/// Each step tentatively applies every legal exchange, reverts it, and
/// commits the single candidate with the largest strict fitness improvement.
/// Stops at a local optimum (no candidate improves) or at `step_limit`,
/// which guards against a fitness function that never stops improving.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    step_limit: u64,
}

impl GradientDescent {
    pub const DEFAULT_STEP_LIMIT: u64 = 10_000;

    pub fn new() -> Self {
        Self::with_step_limit(Self::DEFAULT_STEP_LIMIT)
    }

    pub fn with_step_limit(step_limit: u64) -> Self {
        GradientDescent { step_limit }
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for GradientDescent {
    fn optimize<F: Fitness>(
        &mut self,
        graph: &mut Graph,
        communities: &mut Communities,
        fitness: &F,
        ctx: &mut SolveContext,
    ) -> Result<OptimizeStats> {
        let mut current = fitness.score(graph, communities)?;
        let mut stats = OptimizeStats {
            initial_fitness: current,
            final_fitness: current,
            ..OptimizeStats::default()
        };
        info!(
            event = "gradient_start",
            fitness = current,
            communities = communities.len(),
        );

        loop {
            if stats.steps >= self.step_limit {
                warn!(
                    steps = stats.steps,
                    "step limit reached before a local optimum"
                );
                break;
            }

            let mut best: Option<(Exchange, f64)> = None;
            for candidate in ExchangeEngine::legal_exchanges(graph, communities) {
                if ExchangeEngine::check(graph, communities, candidate).is_err() {
                    continue;
                }
                ExchangeEngine::apply_unchecked(graph, communities, candidate);
                let score = fitness.score(graph, communities)?;
                ExchangeEngine::undo(graph, communities, candidate);
                stats.evaluated += 1;
                trace!(
                    node = candidate.node,
                    to = candidate.to,
                    score,
                    "evaluated candidate"
                );
                if score > current && best.map_or(true, |(_, b)| score > b) {
                    best = Some((candidate, score));
                }
            }

            let Some((chosen, score)) = best else {
                // local optimum
                break;
            };
            ExchangeEngine::apply_unchecked(graph, communities, chosen);
            current = score;
            stats.steps += 1;
            stats.accepted += 1;
            ctx.increment_step_count();
            debug!(
                step = stats.steps,
                node = chosen.node,
                from = chosen.from,
                to = chosen.to,
                fitness = current,
                "committed exchange"
            );
        }

        stats.final_fitness = current;
        info!(event = "gradient_end", steps = stats.steps, fitness = current);
        Ok(stats)
    }
}
