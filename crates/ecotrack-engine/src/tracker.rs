//! The tracking engine facade
//!
//! A [`Tracker`] owns the registry, risk tree, dependency graph and
//! relocation queue, and is the only way to mutate them. Every mutating
//! call updates all four before it returns, so the tree and the graph's
//! population snapshot never lag behind the registry.

use ecotrack_core::{
    Alert, ImpactOutcome, ImpactReportEntry, RankedEntry, SpeciesId, SpeciesRecord,
};
use tracing::{debug, info, instrument, warn};

use crate::config::TrackerConfig;
use crate::dependency::DependencyGraph;
use crate::error::EngineResult;
use crate::registry::{PopulationChange, SpeciesRegistry, Upsert};
use crate::relocation::RelocationQueue;
use crate::risk_tree::RiskTree;

/// Outcome of a population change
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationUpdate {
    /// The record after the change
    pub record: SpeciesRecord,
    /// Alert for the new population
    pub alert: Alert,
    /// Whether the change released the species from the relocation queue
    pub removed_from_queue: bool,
}

/// Species tracker
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    config: TrackerConfig,
    registry: SpeciesRegistry,
    tree: RiskTree,
    graph: DependencyGraph,
    queue: RelocationQueue,
}

impl Tracker {
    /// Create a tracker with the given configuration
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Insert a species, or replace the attributes of a known one
    ///
    /// A new species gets a tree node, a population snapshot and, at a high
    /// enough risk level, a relocation queue entry. A known species is
    /// updated in place: it is never queued again and keeps its initial
    /// population.
    #[instrument(level = "debug", skip(self, name), fields(species))]
    pub fn upsert_species(
        &mut self,
        name: impl Into<SpeciesId>,
        risk_level: u8,
        population: u64,
        is_fauna: bool,
        biomass: f64,
    ) -> SpeciesRecord {
        let id = name.into();
        tracing::Span::current().record("species", tracing::field::display(&id));

        let record = SpeciesRecord::new(id.clone(), risk_level, population, is_fauna, biomass);
        let (outcome, stored) = self.registry.upsert(record);
        let record = stored.clone();
        match outcome {
            Upsert::Created => {
                self.tree.insert(id.clone(), risk_level, population);
                self.graph.set_population(id.clone(), population);
                if self.config.needs_relocation(risk_level) {
                    self.queue.push(id.clone());
                    info!(species = %id, risk_level, "Species queued for relocation");
                }
                info!(species = %id, risk_level, population, is_fauna, "Species added");
            }
            Upsert::Updated => {
                self.tree.update_by_identifier(&id, risk_level, population);
                self.graph.set_population(id.clone(), population);
                debug!(species = %id, risk_level, population, "Species updated");
            }
        }

        Self::log_alert(&record, record.alert(&self.config.thresholds()));
        record
    }

    /// Record deaths; the population never drops below zero
    #[instrument(level = "debug", skip(self, name), fields(species))]
    pub fn record_death(
        &mut self,
        name: impl Into<SpeciesId>,
        deaths: u64,
    ) -> EngineResult<(SpeciesRecord, Alert)> {
        let id = name.into();
        tracing::Span::current().record("species", tracing::field::display(&id));

        let update = self.adjust_population(&id, PopulationChange::Deaths(deaths))?;
        Ok((update.record, update.alert))
    }

    /// Record recovered individuals
    ///
    /// Returns `true` alongside the record if the species left the
    /// relocation queue because of this recovery.
    #[instrument(level = "debug", skip(self, name), fields(species))]
    pub fn record_recovery(
        &mut self,
        name: impl Into<SpeciesId>,
        amount: u64,
    ) -> EngineResult<(SpeciesRecord, bool)> {
        let id = name.into();
        tracing::Span::current().record("species", tracing::field::display(&id));

        let update = self.adjust_population(&id, PopulationChange::Recovery(amount))?;
        Ok((update.record, update.removed_from_queue))
    }

    /// Apply a population change and propagate it
    ///
    /// Only a recovery can release the species from the relocation queue.
    pub fn adjust_population(
        &mut self,
        id: &SpeciesId,
        change: PopulationChange,
    ) -> EngineResult<PopulationUpdate> {
        let record = self.registry.adjust_population(id, change)?.clone();

        self.tree
            .update_population_everywhere(&record.id, record.population);
        self.graph
            .set_population(record.id.clone(), record.population);

        let removed_from_queue = change.is_recovery()
            && record.population >= self.config.critical_population
            && self.queue.remove_first_matching(&record.id);
        if removed_from_queue {
            info!(species = %record.id, population = record.population, "Species released from relocation queue");
        }

        let alert = record.alert(&self.config.thresholds());
        debug!(species = %record.id, change = ?change, population = record.population, "Population adjusted");
        Self::log_alert(&record, alert);

        Ok(PopulationUpdate {
            record,
            alert,
            removed_from_queue,
        })
    }

    /// Record that `predator` preys upon `prey`
    pub fn add_dependency(&mut self, predator: impl Into<SpeciesId>, prey: impl Into<SpeciesId>) {
        let predator = predator.into();
        let prey = prey.into();
        debug!(predator = %predator, prey = %prey, "Dependency added");
        self.graph.add_edge(predator, prey);
    }

    /// Species in risk order, most endangered first
    pub fn ranked_species_report(&self) -> Vec<RankedEntry> {
        self.tree
            .ranked(self.registry.initial_populations())
            .collect()
    }

    /// Relocation queue in enqueue order
    pub fn relocation_queue_snapshot(&self) -> Vec<SpeciesId> {
        self.queue.snapshot()
    }

    /// Every species with its current measure, in registration order
    pub fn full_impact_report(&self) -> Vec<ImpactReportEntry> {
        let thresholds = self.config.thresholds();
        self.registry
            .iter()
            .map(|record| ImpactReportEntry {
                species: record.id.clone(),
                risk_level: record.risk_level,
                measure: record.measure(),
                is_critical: record.is_critical(&thresholds),
            })
            .collect()
    }

    /// Simulate the loss of a species
    #[instrument(level = "debug", skip(self, name), fields(species))]
    pub fn simulate_impact(&self, name: impl Into<SpeciesId>) -> ImpactOutcome {
        let id = name.into();
        tracing::Span::current().record("species", tracing::field::display(&id));

        match self.graph.impact_of(&id) {
            Some(affected) => {
                info!(species = %id, affected = affected.len(), "Impact simulated");
                ImpactOutcome::Impacted {
                    origin: id,
                    affected,
                }
            }
            None => {
                debug!(species = %id, "No dependency recorded");
                ImpactOutcome::NoDependency { species: id }
            }
        }
    }

    /// Look up a species record
    pub fn species(&self, name: impl Into<SpeciesId>) -> Option<&SpeciesRecord> {
        self.registry.get(&name.into())
    }

    /// The active configuration
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Read access to the risk tree
    pub fn risk_tree(&self) -> &RiskTree {
        &self.tree
    }

    /// Read access to the dependency graph
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Read access to the relocation queue
    pub fn relocation_queue(&self) -> &RelocationQueue {
        &self.queue
    }

    /// Number of recorded dependencies, duplicates included
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of tracked species
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Check if no species is tracked
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    fn log_alert(record: &SpeciesRecord, alert: Alert) {
        if alert.is_raised() {
            warn!(species = %record.id, population = record.population, risk_level = record.risk_level, alert = ?alert, "ALERT: {} {}", record.id, alert);
        }
    }
}
