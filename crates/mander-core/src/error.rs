//! Error types for mander

use thiserror::Error;

/// Main error type for mander operations
#[derive(Debug, Error)]
pub enum ManderError {
    /// A graph operation referenced an id that is not in the graph
    #[error("node {0} not found in graph")]
    NodeNotFound(usize),

    /// A precinct with the same id was already registered
    #[error("duplicate precinct id: {0}")]
    DuplicatePrecinct(String),

    /// Malformed geometric input (unclosed ring, degenerate polygon, empty set)
    #[error("geometry error: {0}")]
    Geometry(String),

    /// The partitioner cannot produce the requested partition
    #[error("partition error: {0}")]
    Partition(String),

    /// Invalid operation for the current state
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for mander operations
pub type Result<T> = std::result::Result<T, ManderError>;
