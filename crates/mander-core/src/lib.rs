//! Mander Core - domain substrate for community partitioning
//!
//! This crate provides the fundamental types for the mander engine:
//! - Precinct records and the owning precinct arena
//! - Plain polygon data and the geometry-collaborator contract
//! - The precinct adjacency graph
//! - Community / partition state with cached quantification values

pub mod community;
pub mod error;
pub mod geom;
pub mod graph;
pub mod precinct;

pub use community::{Communities, Community, Quantification};
pub use error::{ManderError, Result};
pub use geom::{Circle, GeometryKernel, Point, Polygon, Ring};
pub use graph::{Graph, Node};
pub use precinct::{Precinct, PrecinctStore, VoteGroup, VoteTally};
