//! # EcoTrack Core
//!
//! Core types and errors shared by the EcoTrack tracking engine and its callers.
//!
//! ## Key Types
//!
//! - [`SpeciesId`]: Species identifier with case-folded identity
//! - [`SpeciesRecord`]: Canonical attributes of one tracked species
//! - [`Measure`]: Population (fauna) or biomass (flora)
//! - [`Alert`]: Population/risk classification raised after a change
//! - [`RankedEntry`], [`ImpactReportEntry`], [`ImpactOutcome`]: Report rows
//!   returned by the engine

pub mod alert;
pub mod error;
pub mod identity;
pub mod report;
pub mod species;

// Re-export main types
pub use alert::*;
pub use error::*;
pub use identity::*;
pub use report::*;
pub use species::*;
