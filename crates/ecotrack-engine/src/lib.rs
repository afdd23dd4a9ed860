//! # EcoTrack Engine
//!
//! In-memory tracking engine for endangered species.
//!
//! The engine keeps a canonical record per species and three derived
//! structures that must agree with it after every call:
//!
//! - [`SpeciesRegistry`]: Canonical records plus the initial population table
//! - [`RiskTree`]: Binary search tree keyed by risk level for ranked reports
//! - [`DependencyGraph`]: Predator -> prey edges with a population snapshot,
//!   used to propagate the impact of losing a species
//! - [`RelocationQueue`]: High-risk species waiting for relocation
//!
//! [`Tracker`] owns all four and is the entry point for callers.
//! [`SharedTracker`] puts one behind a single lock for multi-threaded use.
//!
//! ## Relocation
//!
//! A species inserted at risk level 2 or lower is queued once. It leaves the
//! queue the first time a recovery brings its population to 50 or more.
//! Both thresholds come from [`TrackerConfig`].
//!
//! ## Example
//!
//! ```rust
//! use ecotrack_engine::{Tracker, TrackerConfig};
//!
//! let mut tracker = Tracker::new(TrackerConfig::default());
//! tracker.upsert_species("Tiger", 1, 10, true, 0.0);
//! tracker.upsert_species("Deer", 3, 5, true, 0.0);
//! tracker.add_dependency("Tiger", "Deer");
//!
//! let outcome = tracker.simulate_impact("Tiger");
//! assert_eq!(outcome.affected()[0].dependency_factor, 2.0);
//! ```

pub mod config;
pub mod dependency;
pub mod error;
pub mod registry;
pub mod relocation;
pub mod risk_tree;
pub mod shared;
pub mod tracker;

// Re-export main types
pub use config::TrackerConfig;
pub use dependency::DependencyGraph;
pub use error::{EngineError, EngineResult};
pub use registry::{InitialPopulations, PopulationChange, SpeciesRegistry, Upsert};
pub use relocation::RelocationQueue;
pub use risk_tree::{InOrder, RiskNode, RiskTree};
pub use shared::SharedTracker;
pub use tracker::{PopulationUpdate, Tracker};

// Re-export core types for convenience
pub use ecotrack_core::{
    Alert, AlertThresholds, ImpactOutcome, ImpactReportEntry, ImpactedSpecies, Measure,
    RankedEntry, SpeciesId, SpeciesRecord,
};
