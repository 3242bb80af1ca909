//! Configuration system for the mander engine.
//!
//! Load engine configuration from TOML files to control the partition
//! target, optimizer phases, and metric tolerances without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use mander_config::{EngineConfig, PhaseConfig};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [partition]
//!     communities = 12
//!
//!     [[phases]]
//!     type = "gradient_descent"
//!     step_limit = 500
//!
//!     [[phases]]
//!     type = "simulated_annealing"
//!     epochs = 20000
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.partition.communities, 12);
//! assert_eq!(config.phases.len(), 2);
//! ```
//!
//! Use default config when the file is missing:
//!
//! ```
//! use mander_config::EngineConfig;
//!
//! let config = EngineConfig::load("engine.toml").unwrap_or_default();
//! // Proceeds with defaults if the file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Random seed for reproducible runs. `None` seeds from the OS.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Initial partition configuration.
    #[serde(default)]
    pub partition: PartitionConfig,

    /// Optimizer phases, run in order after partitioning.
    #[serde(default = "default_phases")]
    pub phases: Vec<PhaseConfig>,

    /// Relative population deviation treated as perfectly balanced.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            random_seed: None,
            partition: PartitionConfig::default(),
            phases: default_phases(),
            balance_tolerance: default_balance_tolerance(),
        }
    }
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.partition.communities == 0 {
            return Err(ConfigError::Invalid(
                "partition.communities must be at least 1".into(),
            ));
        }
        if self.partition.sample_cap == 0 {
            return Err(ConfigError::Invalid(
                "partition.sample_cap must be at least 1".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.balance_tolerance) {
            return Err(ConfigError::Invalid(format!(
                "balance_tolerance {} must be in [0, 1)",
                self.balance_tolerance
            )));
        }
        for phase in &self.phases {
            phase.validate()?;
        }
        Ok(())
    }
}

/// Initial-partition parameters.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PartitionConfig {
    /// Target community count.
    #[serde(default = "default_communities")]
    pub communities: usize,

    /// Contraction-pair samples drawn per step.
    #[serde(default = "default_sample_cap")]
    pub sample_cap: usize,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        PartitionConfig {
            communities: default_communities(),
            sample_cap: default_sample_cap(),
        }
    }
}

/// One optimizer phase.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Greedy best-improvement local search.
    GradientDescent {
        /// Defensive cap on committed steps.
        #[serde(default = "default_step_limit")]
        step_limit: u64,
    },
    /// Stochastic local search with a cooling schedule.
    SimulatedAnnealing {
        #[serde(default = "default_starting_temperature")]
        starting_temperature: f64,
        /// Asymptotic temperature floor.
        #[serde(default = "default_ending_temperature")]
        ending_temperature: f64,
        /// Geometric cooling factor applied every epoch.
        #[serde(default = "default_cooling_factor")]
        cooling_factor: f64,
        #[serde(default = "default_epochs")]
        epochs: u64,
    },
}

impl PhaseConfig {
    pub fn gradient_descent() -> Self {
        PhaseConfig::GradientDescent {
            step_limit: default_step_limit(),
        }
    }

    pub fn simulated_annealing() -> Self {
        PhaseConfig::SimulatedAnnealing {
            starting_temperature: default_starting_temperature(),
            ending_temperature: default_ending_temperature(),
            cooling_factor: default_cooling_factor(),
            epochs: default_epochs(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            PhaseConfig::GradientDescent { step_limit } => {
                if step_limit == 0 {
                    return Err(ConfigError::Invalid("step_limit must be at least 1".into()));
                }
            }
            PhaseConfig::SimulatedAnnealing {
                starting_temperature,
                ending_temperature,
                cooling_factor,
                epochs,
            } => {
                if starting_temperature <= 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "starting_temperature {starting_temperature} must be positive"
                    )));
                }
                if ending_temperature < 0.0 || ending_temperature > starting_temperature {
                    return Err(ConfigError::Invalid(format!(
                        "ending_temperature {ending_temperature} must be in [0, starting_temperature]"
                    )));
                }
                if !(0.0..1.0).contains(&cooling_factor) {
                    return Err(ConfigError::Invalid(format!(
                        "cooling_factor {cooling_factor} must be in [0, 1)"
                    )));
                }
                if epochs == 0 {
                    return Err(ConfigError::Invalid("epochs must be at least 1".into()));
                }
            }
        }
        Ok(())
    }
}

fn default_phases() -> Vec<PhaseConfig> {
    vec![PhaseConfig::simulated_annealing()]
}

fn default_balance_tolerance() -> f64 {
    0.05
}

fn default_communities() -> usize {
    10
}

fn default_sample_cap() -> usize {
    100
}

fn default_step_limit() -> u64 {
    10_000
}

fn default_starting_temperature() -> f64 {
    30.0
}

fn default_ending_temperature() -> f64 {
    1.0
}

fn default_cooling_factor() -> f64 {
    0.99976
}

fn default_epochs() -> u64 {
    40_000
}

#[cfg(test)]
mod tests;
