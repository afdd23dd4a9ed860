//! Scenario definitions
//!
//! A scenario is a TOML document with optional `[tracker]` and `[logging]`
//! tables followed by an ordered list of `[[step]]` entries:
//!
//! ```toml
//! name = "Savanna"
//!
//! [tracker]
//! critical_population = 50
//!
//! [[step]]
//! action = "add_species"
//! name = "Tiger"
//! risk_level = 1
//! population = 10
//!
//! [[step]]
//! action = "simulate_impact"
//! name = "Tiger"
//! ```

use std::fs;
use std::path::Path;

use ecotrack_core::SpeciesId;
use ecotrack_engine::TrackerConfig;
use ecotrack_logging::LogConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ScenarioError, ScenarioResult};

/// Highest (least endangered) risk level accepted in a scenario
pub const LOWEST_RISK: u8 = 5;

fn default_fauna() -> bool {
    true
}

/// One action against the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Insert or replace a species
    AddSpecies {
        name: String,
        risk_level: u8,
        #[serde(default = "default_fauna")]
        is_fauna: bool,
        #[serde(default)]
        population: u64,
        #[serde(default)]
        biomass: f64,
    },
    /// Record deaths for a species
    RecordDeath { name: String, deaths: u64 },
    /// Record recovered individuals for a species
    RecordRecovery { name: String, amount: u64 },
    /// Record that `predator` preys upon `prey`
    AddDependency { predator: String, prey: String },
    /// Species in risk order
    RankedReport,
    /// Relocation queue contents
    RelocationQueue,
    /// Every species with its current measure
    ImpactReport,
    /// Loss of a species and everything it touches
    SimulateImpact { name: String },
}

impl Step {
    /// Species names this step refers to
    pub fn names(&self) -> Vec<&str> {
        match self {
            Step::AddSpecies { name, .. }
            | Step::RecordDeath { name, .. }
            | Step::RecordRecovery { name, .. }
            | Step::SimulateImpact { name } => vec![name.as_str()],
            Step::AddDependency { predator, prey } => vec![predator.as_str(), prey.as_str()],
            Step::RankedReport | Step::RelocationQueue | Step::ImpactReport => Vec::new(),
        }
    }

    /// Short label used in logs
    pub fn action(&self) -> &'static str {
        match self {
            Step::AddSpecies { .. } => "add_species",
            Step::RecordDeath { .. } => "record_death",
            Step::RecordRecovery { .. } => "record_recovery",
            Step::AddDependency { .. } => "add_dependency",
            Step::RankedReport => "ranked_report",
            Step::RelocationQueue => "relocation_queue",
            Step::ImpactReport => "impact_report",
            Step::SimulateImpact { .. } => "simulate_impact",
        }
    }
}

/// A scripted run against a fresh tracker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Tracker thresholds
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Logging configuration, used by the command line runner
    #[serde(default)]
    pub logging: Option<LogConfig>,

    /// Steps in execution order
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse and validate a scenario from TOML
    pub fn from_toml_str(content: &str) -> ScenarioResult<Self> {
        let scenario: Self = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file
    pub fn load<P: AsRef<Path>>(path: P) -> ScenarioResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check names and risk levels before anything runs
    pub fn validate(&self) -> ScenarioResult<()> {
        if self.steps.is_empty() {
            return Err(ScenarioError::Empty);
        }
        for (index, step) in self.steps.iter().enumerate() {
            let step_number = index + 1;
            for name in step.names() {
                SpeciesId::parse(name).map_err(|source| ScenarioError::InvalidName {
                    step: step_number,
                    source,
                })?;
            }
            if let Step::AddSpecies { risk_level, .. } = step {
                if !(1..=LOWEST_RISK).contains(risk_level) {
                    return Err(ScenarioError::InvalidRiskLevel {
                        step: step_number,
                        risk_level: *risk_level,
                    });
                }
            }
        }
        Ok(())
    }

    /// Set the scenario name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a step
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Built-in food chain: Tiger -> Deer -> Grass and Eagle -> Snake -> Frog
    pub fn demo() -> Self {
        let fauna = |name: &str, risk_level: u8, population: u64| Step::AddSpecies {
            name: name.to_string(),
            risk_level,
            is_fauna: true,
            population,
            biomass: 0.0,
        };
        let dependency = |predator: &str, prey: &str| Step::AddDependency {
            predator: predator.to_string(),
            prey: prey.to_string(),
        };
        let impact = |name: &str| Step::SimulateImpact {
            name: name.to_string(),
        };

        Self::default()
            .with_name("Demo food chain")
            .with_step(fauna("Tiger", 1, 10))
            .with_step(fauna("Deer", 3, 120))
            .with_step(Step::AddSpecies {
                name: "Grass".to_string(),
                risk_level: 5,
                is_fauna: false,
                population: 0,
                biomass: 300.0,
            })
            .with_step(fauna("Eagle", 2, 40))
            .with_step(fauna("Snake", 4, 80))
            .with_step(fauna("Frog", 3, 200))
            .with_step(dependency("Tiger", "Deer"))
            .with_step(dependency("Deer", "Grass"))
            .with_step(dependency("Eagle", "Snake"))
            .with_step(dependency("Snake", "Frog"))
            .with_step(Step::RankedReport)
            .with_step(Step::RelocationQueue)
            .with_step(Step::RecordDeath {
                name: "Deer".to_string(),
                deaths: 100,
            })
            .with_step(Step::RecordRecovery {
                name: "Eagle".to_string(),
                amount: 15,
            })
            .with_step(Step::ImpactReport)
            .with_step(impact("Tiger"))
            .with_step(impact("Snake"))
            .with_step(impact("Grass"))
            .with_step(Step::RelocationQueue)
    }
}
