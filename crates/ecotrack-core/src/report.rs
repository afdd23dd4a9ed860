//! Report rows produced by the tracking engine

use serde::{Deserialize, Serialize};

use crate::identity::SpeciesId;
use crate::species::Measure;

/// One row of the risk-ordered species report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub species: SpeciesId,
    pub risk_level: u8,
    pub population: u64,
    /// Population change since the species was first inserted
    pub delta: i64,
}

/// One row of the full impact report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReportEntry {
    pub species: SpeciesId,
    pub risk_level: u8,
    pub measure: Measure,
    pub is_critical: bool,
}

/// A species affected by the loss of another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactedSpecies {
    pub species: SpeciesId,
    /// Population of the lost species divided by this species' population
    pub dependency_factor: f64,
}

/// Result of an impact simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImpactOutcome {
    /// The species has recorded prey; these species would be affected
    Impacted {
        origin: SpeciesId,
        affected: Vec<ImpactedSpecies>,
    },
    /// No dependency is recorded for the species
    NoDependency { species: SpeciesId },
}

impl ImpactOutcome {
    /// Affected species, empty when no dependency was found
    pub fn affected(&self) -> &[ImpactedSpecies] {
        match self {
            ImpactOutcome::Impacted { affected, .. } => affected,
            ImpactOutcome::NoDependency { .. } => &[],
        }
    }

    /// Whether the simulation found no dependency
    pub fn is_no_dependency(&self) -> bool {
        matches!(self, ImpactOutcome::NoDependency { .. })
    }
}
