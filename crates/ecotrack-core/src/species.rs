//! Species records

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alert::{Alert, AlertThresholds};
use crate::identity::SpeciesId;

/// The quantity tracked for a species
///
/// Fauna are counted as individuals, flora are weighed in tons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Measure {
    Population(u64),
    Biomass(f64),
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Population(count) => write!(f, "Population: {}", count),
            Measure::Biomass(tons) => write!(f, "Biomass: {}", tons),
        }
    }
}

/// Canonical attributes of one tracked species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// Species identifier
    pub id: SpeciesId,
    /// Severity rank, 1 = most endangered
    pub risk_level: u8,
    /// Individuals alive (fauna only)
    pub population: u64,
    /// Mass in tons (flora only)
    pub biomass: f64,
    /// Whether the species is counted by individuals
    pub is_fauna: bool,
}

impl SpeciesRecord {
    /// Create a new record
    pub fn new(
        id: impl Into<SpeciesId>,
        risk_level: u8,
        population: u64,
        is_fauna: bool,
        biomass: f64,
    ) -> Self {
        Self {
            id: id.into(),
            risk_level,
            population,
            biomass,
            is_fauna,
        }
    }

    /// The quantity that is meaningful for this species
    pub fn measure(&self) -> Measure {
        if self.is_fauna {
            Measure::Population(self.population)
        } else {
            Measure::Biomass(self.biomass)
        }
    }

    /// Fauna below the critical population
    pub fn is_critical(&self, thresholds: &AlertThresholds) -> bool {
        self.is_fauna && self.population < thresholds.critical_population
    }

    /// Alert for the current population and risk level
    pub fn alert(&self, thresholds: &AlertThresholds) -> Alert {
        Alert::classify(self.population, self.risk_level, thresholds)
    }
}
