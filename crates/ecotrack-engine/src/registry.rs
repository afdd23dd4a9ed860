//! Species registry
//!
//! The [`SpeciesRegistry`] owns the canonical [`SpeciesRecord`] of every
//! tracked species. The risk tree and dependency graph hold copies of the
//! fields they need; the [`Tracker`](crate::Tracker) keeps them in step
//! with the registry.
//!
//! The registry also keeps the [`InitialPopulations`] table, written once
//! per fauna species on first insertion and used for population deltas.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use ecotrack_core::{SpeciesId, SpeciesRecord};

use crate::error::{EngineError, EngineResult};

/// Population of each fauna species at first insertion
#[derive(Debug, Clone, Default)]
pub struct InitialPopulations {
    populations: HashMap<SpeciesId, u64>,
}

impl InitialPopulations {
    /// Record the initial population unless one is already known
    ///
    /// Returns `true` if the value was recorded.
    pub fn record_once(&mut self, species: &SpeciesId, population: u64) -> bool {
        if self.populations.contains_key(species) {
            return false;
        }
        self.populations.insert(species.clone(), population);
        true
    }

    /// Initial population of a species, if recorded
    pub fn get(&self, species: &SpeciesId) -> Option<u64> {
        self.populations.get(species).copied()
    }

    /// Change from the initial population, saturating at the `i64` bounds
    ///
    /// Species without a recorded initial population report no change.
    pub fn delta(&self, species: &SpeciesId, current: u64) -> i64 {
        let initial = self.get(species).unwrap_or(current);
        let delta = i128::from(current) - i128::from(initial);
        i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
    }

    /// Number of recorded species
    pub fn len(&self) -> usize {
        self.populations.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.populations.is_empty()
    }
}

/// Direction and size of a population change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationChange {
    /// Individuals lost; the population stops at zero
    Deaths(u64),
    /// Individuals gained; the population stops at `u64::MAX`
    Recovery(u64),
}

impl PopulationChange {
    /// Population after applying this change to `population`
    pub fn apply(self, population: u64) -> u64 {
        match self {
            PopulationChange::Deaths(count) => population.saturating_sub(count),
            PopulationChange::Recovery(count) => population.saturating_add(count),
        }
    }

    /// Whether the population can only grow
    pub fn is_recovery(self) -> bool {
        matches!(self, PopulationChange::Recovery(count) if count > 0)
    }
}

/// Whether an upsert created a new species or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

/// Canonical store of species records, in registration order
#[derive(Debug, Clone, Default)]
pub struct SpeciesRegistry {
    records: HashMap<SpeciesId, SpeciesRecord>,
    order: Vec<SpeciesId>,
    initial_populations: InitialPopulations,
}

impl SpeciesRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record or replace the attributes of an existing one
    ///
    /// An existing record keeps its identifier spelling and its initial
    /// population; everything else is overwritten. Returns the stored record.
    pub fn upsert(&mut self, record: SpeciesRecord) -> (Upsert, &SpeciesRecord) {
        match self.records.entry(record.id.clone()) {
            Entry::Occupied(slot) => {
                let existing = slot.into_mut();
                existing.risk_level = record.risk_level;
                existing.population = record.population;
                existing.is_fauna = record.is_fauna;
                existing.biomass = record.biomass;
                (Upsert::Updated, existing)
            }
            Entry::Vacant(slot) => {
                if record.is_fauna {
                    self.initial_populations
                        .record_once(&record.id, record.population);
                }
                self.order.push(record.id.clone());
                (Upsert::Created, slot.insert(record))
            }
        }
    }

    /// Apply a population change, clamping at zero and at `u64::MAX`
    pub fn adjust_population(
        &mut self,
        species: &SpeciesId,
        change: PopulationChange,
    ) -> EngineResult<&SpeciesRecord> {
        let record = self
            .records
            .get_mut(species)
            .ok_or_else(|| EngineError::NotFound {
                species: species.clone(),
            })?;
        record.population = change.apply(record.population);
        Ok(record)
    }

    /// Get a record by identifier
    pub fn get(&self, species: &SpeciesId) -> Option<&SpeciesRecord> {
        self.records.get(species)
    }

    /// Check whether a species is registered
    pub fn contains(&self, species: &SpeciesId) -> bool {
        self.records.contains_key(species)
    }

    /// Iterate records in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Initial population table
    pub fn initial_populations(&self) -> &InitialPopulations {
        &self.initial_populations
    }

    /// Number of registered species
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
