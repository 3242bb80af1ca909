//! Config-driven solver assembly.

use std::time::Duration;

use mander_config::{EngineConfig, PhaseConfig};
use mander_core::{Communities, Graph, Result};
use mander_scoring::Fitness;
use tracing::info;

use crate::context::SolveContext;
use crate::optimize::{GradientDescent, OptimizeStats, Optimizer, SimulatedAnnealing};
use crate::partition::ContractionPartitioner;

/// What a solving run produced.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub communities: Communities,
    pub fitness: f64,
    pub phase_stats: Vec<OptimizeStats>,
    pub total_steps: u64,
    pub elapsed: Duration,
}

/// Runs the full pipeline from one [`EngineConfig`]: seed the context,
/// build the initial partition, then run each configured optimizer phase
/// in order.
#[derive(Debug, Clone)]
pub struct Solver {
    config: EngineConfig,
}

impl Solver {
    pub fn new(config: EngineConfig) -> Self {
        Solver { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn solve<F: Fitness>(&self, graph: &mut Graph, fitness: &F) -> Result<SolveOutcome> {
        let mut ctx = SolveContext::from_config_seed(self.config.random_seed);
        ctx.start_solving();
        info!(
            event = "solve_start",
            nodes = graph.len(),
            target = self.config.partition.communities,
            phases = self.config.phases.len(),
        );

        let partitioner = ContractionPartitioner::with_sample_cap(
            self.config.partition.communities,
            self.config.partition.sample_cap,
        );
        let mut communities = partitioner.partition(graph, &mut ctx)?;

        let mut phase_stats = Vec::with_capacity(self.config.phases.len());
        for phase in &self.config.phases {
            let stats = match *phase {
                PhaseConfig::GradientDescent { step_limit } => {
                    GradientDescent::with_step_limit(step_limit)
                        .optimize(graph, &mut communities, fitness, &mut ctx)?
                }
                PhaseConfig::SimulatedAnnealing {
                    starting_temperature,
                    ending_temperature,
                    cooling_factor,
                    epochs,
                } => SimulatedAnnealing::with_schedule(
                    starting_temperature,
                    ending_temperature,
                    cooling_factor,
                    epochs,
                )
                .optimize(graph, &mut communities, fitness, &mut ctx)?,
            };
            phase_stats.push(stats);
        }

        let fitness_value = fitness.score(graph, &communities)?;
        let elapsed = ctx.elapsed().unwrap_or_default();
        info!(
            event = "solve_end",
            fitness = fitness_value,
            steps = ctx.total_step_count(),
            elapsed_ms = elapsed.as_millis() as u64,
        );
        Ok(SolveOutcome {
            communities,
            fitness: fitness_value,
            phase_stats,
            total_steps: ctx.total_step_count(),
            elapsed,
        })
    }
}
