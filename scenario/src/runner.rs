//! Scenario execution
//!
//! [`ScenarioRunner`] applies each [`Step`] to a [`Tracker`] and records a
//! [`StepOutcome`]. A step that names an unknown species produces
//! [`StepOutcome::Failed`] and the run carries on with the next step.

use ecotrack_core::{
    Alert, ImpactOutcome, ImpactReportEntry, RankedEntry, SpeciesId, SpeciesRecord,
};
use ecotrack_engine::Tracker;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::scenario::{Scenario, Step};

/// Result of one scenario step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    SpeciesAdded {
        record: SpeciesRecord,
        alert: Alert,
        in_relocation_queue: bool,
    },
    DeathRecorded {
        record: SpeciesRecord,
        deaths: u64,
        alert: Alert,
    },
    RecoveryRecorded {
        record: SpeciesRecord,
        amount: u64,
        alert: Alert,
        released_from_queue: bool,
    },
    DependencyAdded {
        predator: SpeciesId,
        prey: SpeciesId,
    },
    RankedReport {
        entries: Vec<RankedEntry>,
    },
    RelocationQueue {
        species: Vec<SpeciesId>,
    },
    ImpactReport {
        entries: Vec<ImpactReportEntry>,
    },
    Impact {
        impact: ImpactOutcome,
    },
    Failed {
        step: usize,
        action: String,
        error: String,
    },
}

impl StepOutcome {
    /// Whether the step failed
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

/// Outcomes of a whole scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub scenario: Option<String>,
    pub outcomes: Vec<StepOutcome>,
    pub failures: usize,
}

impl RunReport {
    /// Whether every step succeeded
    pub fn succeeded(&self) -> bool {
        self.failures == 0
    }
}

/// Drives a tracker through scenario steps
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Run every step in order
    #[instrument(skip_all, fields(scenario = scenario.name.as_deref().unwrap_or("unnamed"), steps = scenario.steps.len()))]
    pub fn run(tracker: &mut Tracker, scenario: &Scenario) -> Vec<StepOutcome> {
        let outcomes: Vec<_> = scenario
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| Self::run_step(tracker, index + 1, step))
            .collect();

        let failures = outcomes.iter().filter(|o| o.is_failure()).count();
        info!(steps = outcomes.len(), failures, "Scenario finished");
        outcomes
    }

    /// Run a scenario against a fresh tracker built from its config
    pub fn run_fresh(scenario: &Scenario) -> RunReport {
        let mut tracker = Tracker::new(scenario.tracker);
        let outcomes = Self::run(&mut tracker, scenario);
        let failures = outcomes.iter().filter(|o| o.is_failure()).count();
        RunReport {
            scenario: scenario.name.clone(),
            outcomes,
            failures,
        }
    }

    /// Apply a single step; `number` is its 1-based position
    pub fn run_step(tracker: &mut Tracker, number: usize, step: &Step) -> StepOutcome {
        let thresholds = tracker.config().thresholds();
        let result = match step {
            Step::AddSpecies {
                name,
                risk_level,
                is_fauna,
                population,
                biomass,
            } => {
                let record =
                    tracker.upsert_species(name.as_str(), *risk_level, *population, *is_fauna, *biomass);
                let alert = record.alert(&thresholds);
                let in_relocation_queue = tracker.relocation_queue().contains(&record.id);
                Ok(StepOutcome::SpeciesAdded {
                    record,
                    alert,
                    in_relocation_queue,
                })
            }
            Step::RecordDeath { name, deaths } => tracker
                .record_death(name.as_str(), *deaths)
                .map(|(record, alert)| StepOutcome::DeathRecorded {
                    record,
                    deaths: *deaths,
                    alert,
                }),
            Step::RecordRecovery { name, amount } => tracker
                .record_recovery(name.as_str(), *amount)
                .map(|(record, released_from_queue)| StepOutcome::RecoveryRecorded {
                    alert: record.alert(&thresholds),
                    record,
                    amount: *amount,
                    released_from_queue,
                }),
            Step::AddDependency { predator, prey } => {
                let predator = SpeciesId::new(predator.as_str());
                let prey = SpeciesId::new(prey.as_str());
                tracker.add_dependency(predator.clone(), prey.clone());
                Ok(StepOutcome::DependencyAdded { predator, prey })
            }
            Step::RankedReport => Ok(StepOutcome::RankedReport {
                entries: tracker.ranked_species_report(),
            }),
            Step::RelocationQueue => Ok(StepOutcome::RelocationQueue {
                species: tracker.relocation_queue_snapshot(),
            }),
            Step::ImpactReport => Ok(StepOutcome::ImpactReport {
                entries: tracker.full_impact_report(),
            }),
            Step::SimulateImpact { name } => Ok(StepOutcome::Impact {
                impact: tracker.simulate_impact(name.as_str()),
            }),
        };

        result.unwrap_or_else(|e| {
            warn!(step = number, action = step.action(), error = %e, "Step failed");
            StepOutcome::Failed {
                step: number,
                action: step.action().to_string(),
                error: e.to_string(),
            }
        })
    }
}
