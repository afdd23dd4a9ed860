//! # EcoTrack Scenario
//!
//! Scripted runs against the tracking engine.
//!
//! A [`Scenario`] is loaded from TOML (or taken from [`Scenario::demo`]),
//! executed step by step by [`ScenarioRunner`], and rendered either as the
//! console text operators are used to ([`render`]) or as JSON.

pub mod error;
pub mod render;
pub mod runner;
pub mod scenario;

// Re-export main types
pub use error::{ScenarioError, ScenarioResult};
pub use runner::{RunReport, ScenarioRunner, StepOutcome};
pub use scenario::{Scenario, Step};
