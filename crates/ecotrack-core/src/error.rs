//! Error types for EcoTrack core

use thiserror::Error;

/// Errors related to species identity
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Species name is empty")]
    Empty,

    #[error("Species name too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },
}

/// Result type for identity parsing
pub type IdentityResult<T> = Result<T, IdentityError>;
