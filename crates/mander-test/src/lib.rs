//! Shared test fixtures for mander crates.
//!
//! This crate provides data builders and a naive geometry kernel for
//! testing. It does NOT depend on `mander-scoring` or `mander-solver`, so
//! both can consume it as a dev-dependency without cycles.
//!
//! - [`kernel`] - [`NaiveKernel`], a deliberately simple planar kernel
//! - [`fixtures`] - synthetic precinct maps and graphs
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! mander-test = { workspace = true }
//! ```

pub mod fixtures;
pub mod kernel;

pub use fixtures::{precinct_grid, rect, square_precinct, two_triangles_with_bridge};
pub use kernel::NaiveKernel;
