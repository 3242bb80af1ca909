//! Mander - precinct community partitioning and optimization
//!
//! Builds contiguous "communities" of voting precincts over an adjacency
//! graph and optimizes them against political and geometric fitness
//! metrics, for simulating redistricting and quantifying gerrymandering.
//!
//! # Example
//!
//! ```
//! use mander::prelude::*;
//! use mander_test::{precinct_grid, NaiveKernel};
//!
//! let (store, mut graph) = precinct_grid(4, 4);
//! let config = EngineConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [partition]
//!     communities = 4
//!
//!     [[phases]]
//!     type = "gradient_descent"
//!     step_limit = 50
//! "#).unwrap();
//!
//! let outcome = run_solver(&NaiveKernel::new(), &store, &mut graph, config).unwrap();
//! assert_eq!(outcome.communities.len(), 4);
//!
//! let text = write_communities(&store, &graph, &outcome.communities).unwrap();
//! let table = write_quantification(&outcome.communities).unwrap();
//! assert!(text.starts_with("[["));
//! assert_eq!(table.lines().count(), 3);
//! ```

// Domain types
pub use mander_core::{
    Circle, Communities, Community, GeometryKernel, Graph, ManderError, Node, Point, Polygon,
    Precinct, PrecinctStore, Quantification, Result, Ring, VoteGroup, VoteTally,
};

// Fitness metrics
pub use mander_scoring::{
    apportion, Compactness, Fitness, MaskTally, PartisanshipStdev, PopulationBalance, Quantifier,
    RadiusMode, WeightedSum,
};

// Engine
pub use mander_solver::{
    ContractionPartitioner, Exchange, ExchangeEngine, GradientDescent, OptimizeStats, Optimizer,
    Rejection, SimulatedAnnealing, SolveContext, SolveOutcome, Solver,
};

// Configuration
pub use mander_config::{ConfigError, EngineConfig, PartitionConfig, PhaseConfig};

// Persistence
pub use mander_io::{
    read_communities, write_communities, write_quantification, LoadReport, PersistError,
};

mod solver;
pub use solver::{run_solver, run_solver_with_fitness};

/// Everything most callers need.
pub mod prelude {
    pub use crate::{
        run_solver, run_solver_with_fitness, Communities, Community, EngineConfig, Fitness,
        GeometryKernel, Graph, Precinct, PrecinctStore, SolveOutcome, VoteGroup,
        write_communities, write_quantification,
    };
}
