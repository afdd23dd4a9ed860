//! Engine error types

use ecotrack_core::SpeciesId;
use thiserror::Error;

/// Errors raised by tracking engine operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The operation referenced a species that was never inserted
    #[error("Species not found: {species}")]
    NotFound { species: SpeciesId },
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
