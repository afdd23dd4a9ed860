//! Tracker configuration

use ecotrack_core::AlertThresholds;
use serde::{Deserialize, Serialize};

/// Thresholds that drive alerts and relocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Fauna below this population are critically low; recovering to it
    /// releases a species from the relocation queue
    pub critical_population: u64,
    /// Species inserted at or below this risk level are queued for relocation
    pub relocation_risk_ceiling: u8,
    /// Risk level reported as highly endangered
    pub highly_endangered_risk: u8,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            critical_population: 50,
            relocation_risk_ceiling: 2,
            highly_endangered_risk: 1,
        }
    }
}

impl TrackerConfig {
    /// Set the critical population
    pub fn with_critical_population(mut self, population: u64) -> Self {
        self.critical_population = population;
        self
    }

    /// Set the relocation risk ceiling
    pub fn with_relocation_risk_ceiling(mut self, risk_level: u8) -> Self {
        self.relocation_risk_ceiling = risk_level;
        self
    }

    /// Alert thresholds derived from this config
    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            critical_population: self.critical_population,
            highly_endangered_risk: self.highly_endangered_risk,
        }
    }

    /// Whether a new species at this risk level is queued for relocation
    pub fn needs_relocation(&self, risk_level: u8) -> bool {
        risk_level <= self.relocation_risk_ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.critical_population, 50);
        assert!(config.needs_relocation(1));
        assert!(config.needs_relocation(2));
        assert!(!config.needs_relocation(3));
    }

    #[test]
    fn test_builders() {
        let config = TrackerConfig::default()
            .with_critical_population(10)
            .with_relocation_risk_ceiling(3);
        assert_eq!(config.thresholds().critical_population, 10);
        assert!(config.needs_relocation(3));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"critical_population": 20}"#).unwrap();
        assert_eq!(config.critical_population, 20);
        assert_eq!(config.relocation_risk_ceiling, 2);
    }
}
