//! One-call solver entry point.

use mander_config::EngineConfig;
use mander_core::{GeometryKernel, Graph, PrecinctStore, Result};
use mander_scoring::{
    Compactness, Fitness, PartisanshipStdev, PopulationBalance, Quantifier, WeightedSum,
};
use mander_solver::{SolveOutcome, Solver};
use tracing::info;

/// Partitions and optimizes `graph` with the standard fitness blend:
/// population balance (at the configured tolerance), compactness, and
/// partisan cohesion, equally weighted.
///
/// The returned communities come pre-quantified, ready for
/// [`mander_io::write_quantification`].
pub fn run_solver<K: GeometryKernel>(
    kernel: &K,
    store: &PrecinctStore,
    graph: &mut Graph,
    config: EngineConfig,
) -> Result<SolveOutcome> {
    let balance = PopulationBalance::with_tolerance(store, config.balance_tolerance);
    let compactness = Compactness::new(kernel, store);
    let partisanship = PartisanshipStdev::new(store);
    let mut fitness = WeightedSum::new();
    fitness
        .push(1.0, &balance)
        .push(1.0, &compactness)
        .push(1.0, &partisanship);

    let solver = Solver::new(config);
    let mut outcome = solver.solve(graph, &fitness)?;
    Quantifier::new(kernel, store).quantify(graph, &mut outcome.communities)?;

    info!(
        event = "run_complete",
        communities = outcome.communities.len(),
        fitness = outcome.fitness,
    );
    Ok(outcome)
}

/// The same pipeline with a caller-supplied fitness function.
pub fn run_solver_with_fitness<K: GeometryKernel, F: Fitness>(
    kernel: &K,
    store: &PrecinctStore,
    graph: &mut Graph,
    config: EngineConfig,
    fitness: &F,
) -> Result<SolveOutcome> {
    let solver = Solver::new(config);
    let mut outcome = solver.solve(graph, fitness)?;
    Quantifier::new(kernel, store).quantify(graph, &mut outcome.communities)?;
    Ok(outcome)
}
