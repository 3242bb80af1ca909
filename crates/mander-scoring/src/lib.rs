//! Mander Scoring - fitness metrics over community partitions
//!
//! This crate turns a partition into scalar fitness values:
//! - [`Fitness`] - the metric-agnostic trait optimizers consume
//! - [`PopulationBalance`] - closeness to the ideal population share
//! - [`PartisanshipStdev`] - internal political cohesion
//! - [`Compactness`] - geometric area / bounding-circle ratio
//! - [`apportion`] - mask-based areal interpolation against external polygons
//! - [`Quantifier`] - fills community shape / quantification caches

pub mod apportion;
pub mod balance;
pub mod compactness;
pub mod fitness;
pub mod partisanship;
pub mod quantify;

pub use apportion::{apportion, MaskTally};
pub use balance::PopulationBalance;
pub use compactness::{Compactness, RadiusMode};
pub use fitness::{Fitness, WeightedSum};
pub use partisanship::PartisanshipStdev;
pub use quantify::Quantifier;
