//! Mander Solver - partitioning and exchange optimization
//!
//! This crate turns a precinct adjacency graph into an optimized community
//! partition:
//! - [`ContractionPartitioner`] - randomized edge contraction to an initial
//!   partition
//! - [`ExchangeEngine`] - the single-node move primitive, the only legal
//!   partition mutation
//! - [`GradientDescent`] / [`SimulatedAnnealing`] - local search over the
//!   exchange neighborhood
//! - [`Solver`] - config-driven assembly of the above
//!
//! Logging levels follow one scheme throughout:
//! - **INFO**: solve/phase start and end, problem scale
//! - **DEBUG**: committed steps and contractions
//! - **TRACE**: per-candidate evaluation and rejection detail

pub mod context;
pub mod exchange;
pub mod optimize;
pub mod partition;
pub mod solver;

pub use context::SolveContext;
pub use exchange::{Exchange, ExchangeEngine, Rejection};
pub use optimize::{GradientDescent, OptimizeStats, Optimizer, SimulatedAnnealing};
pub use partition::ContractionPartitioner;
pub use solver::{SolveOutcome, Solver};
