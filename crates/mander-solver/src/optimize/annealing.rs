//! Simulated annealing over the exchange neighborhood.

use mander_core::{Communities, Graph, Result};
use mander_scoring::Fitness;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::context::SolveContext;
use crate::exchange::{Exchange, ExchangeEngine};
use crate::optimize::{OptimizeStats, Optimizer};

/// Stochastic local search with a geometric cooling schedule.
///
/// Each epoch applies one random legal exchange and keeps it if the fitness
/// improves; a worsening exchange is kept with probability
/// `current_temperature / starting_temperature`, otherwise reverted. The
/// acceptance ratio deliberately ignores the magnitude of the fitness loss;
/// it is not the classical Metropolis criterion, and replacing it changes
/// convergence behavior materially.
///
/// The temperature decays geometrically toward `ending_temperature` after
/// every epoch, accepted or not.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedAnnealing {
    starting_temperature: f64,
    ending_temperature: f64,
    cooling_factor: f64,
    epochs: u64,
}

impl SimulatedAnnealing {
    pub const DEFAULT_STARTING_TEMPERATURE: f64 = 30.0;
    pub const DEFAULT_ENDING_TEMPERATURE: f64 = 1.0;
    pub const DEFAULT_COOLING_FACTOR: f64 = 0.99976;
    pub const DEFAULT_EPOCHS: u64 = 40_000;

    pub fn new() -> Self {
        Self::with_schedule(
            Self::DEFAULT_STARTING_TEMPERATURE,
            Self::DEFAULT_ENDING_TEMPERATURE,
            Self::DEFAULT_COOLING_FACTOR,
            Self::DEFAULT_EPOCHS,
        )
    }

    pub fn with_schedule(
        starting_temperature: f64,
        ending_temperature: f64,
        cooling_factor: f64,
        epochs: u64,
    ) -> Self {
        SimulatedAnnealing {
            starting_temperature,
            ending_temperature,
            cooling_factor,
            epochs,
        }
    }

    /// Probability of keeping a worsening exchange at `temperature`.
    pub fn acceptance_probability(&self, temperature: f64) -> f64 {
        (temperature / self.starting_temperature).clamp(0.0, 1.0)
    }

    /// One cooling step: geometric decay toward the ending temperature.
    pub fn cooled(&self, temperature: f64) -> f64 {
        self.ending_temperature + (temperature - self.ending_temperature) * self.cooling_factor
    }

    /// The acceptance rule: improvements always pass; a worsening candidate
    /// passes when the uniform `draw` falls under the temperature ratio.
    pub fn accepts(&self, current: f64, candidate: f64, temperature: f64, draw: f64) -> bool {
        candidate > current || draw < self.acceptance_probability(temperature)
    }
}

impl Default for SimulatedAnnealing {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for SimulatedAnnealing {
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
        let mut temperature = self.starting_temperature;
        info!(
            event = "annealing_start",
            fitness = current,
            temperature,
            epochs = self.epochs,
        );

        for epoch in 0..self.epochs {
            let candidates = ExchangeEngine::legal_exchanges(graph, communities);
            if candidates.is_empty() {
                debug!(epoch, "no boundary candidates; partition is frozen");
                break;
            }

            // resample on precondition failure, bounded by the candidate
            // count so a fully-rejected neighborhood cannot stall the run
            let mut applied: Option<Exchange> = None;
            for _ in 0..candidates.len() {
                let pick = candidates[ctx.rng().random_range(0..candidates.len())];
                if ExchangeEngine::try_exchange(graph, communities, pick) {
                    applied = Some(pick);
                    break;
                }
            }
            let Some(exchange) = applied else {
                trace!(epoch, "every sampled exchange was rejected");
                temperature = self.cooled(temperature);
                continue;
            };

            let candidate_fitness = fitness.score(graph, communities)?;
            stats.evaluated += 1;
            let draw = ctx.rng().random::<f64>();
            if self.accepts(current, candidate_fitness, temperature, draw) {
                current = candidate_fitness;
                stats.steps += 1;
                stats.accepted += 1;
                ctx.increment_step_count();
                debug!(
                    epoch,
                    node = exchange.node,
                    from = exchange.from,
                    to = exchange.to,
                    fitness = current,
                    temperature,
                    "accepted exchange"
                );
            } else {
                ExchangeEngine::undo(graph, communities, exchange);
                stats.rejected += 1;
                trace!(epoch, temperature, "reverted exchange");
            }
            temperature = self.cooled(temperature);
        }

        stats.final_fitness = current;
        info!(
            event = "annealing_end",
            accepted = stats.accepted,
            rejected = stats.rejected,
            fitness = current,
        );
        Ok(stats)
    }
}
