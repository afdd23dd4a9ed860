//! Error types for scenario loading

use std::io;
use std::path::PathBuf;

use ecotrack_core::IdentityError;
use thiserror::Error;

/// Errors raised while loading or validating a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Step {step}: invalid species name: {source}")]
    InvalidName {
        step: usize,
        #[source]
        source: IdentityError,
    },

    #[error("Step {step}: risk level {risk_level} is outside 1..=5")]
    InvalidRiskLevel { step: usize, risk_level: u8 },

    #[error("Scenario has no steps")]
    Empty,
}

/// Result type for scenario operations
pub type ScenarioResult<T> = Result<T, ScenarioError>;
