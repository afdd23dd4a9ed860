//! Population and risk alerts
//!
//! After every population change the engine classifies the species into
//! one [`Alert`]. The precedence is fixed: extinction beats low
//! population, which beats a top risk level.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Thresholds used when classifying alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Populations strictly below this are critically low
    pub critical_population: u64,
    /// Risk level treated as highly endangered
    pub highly_endangered_risk: u8,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_population: 50,
            highly_endangered_risk: 1,
        }
    }
}

/// Alert classification for a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    /// Nothing to report
    #[default]
    None,
    /// Risk level 1 with a healthy population
    HighlyEndangered,
    /// Alive but below the critical population
    CriticallyLow,
    /// Population reached zero
    Extinct,
}

impl Alert {
    /// Classify a population and risk level
    pub fn classify(population: u64, risk_level: u8, thresholds: &AlertThresholds) -> Self {
        if population == 0 {
            Alert::Extinct
        } else if population < thresholds.critical_population {
            Alert::CriticallyLow
        } else if risk_level == thresholds.highly_endangered_risk {
            Alert::HighlyEndangered
        } else {
            Alert::None
        }
    }

    /// Whether this alert should be surfaced to the operator
    pub fn is_raised(&self) -> bool {
        !matches!(self, Alert::None)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::None => write!(f, "none"),
            Alert::HighlyEndangered => write!(f, "is highly endangered"),
            Alert::CriticallyLow => write!(f, "population is critically low"),
            Alert::Extinct => write!(f, "has gone extinct"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(population: u64, risk_level: u8) -> Alert {
        Alert::classify(population, risk_level, &AlertThresholds::default())
    }

    #[test]
    fn test_extinction_beats_everything() {
        assert_eq!(classify(0, 1), Alert::Extinct);
        assert_eq!(classify(0, 5), Alert::Extinct);
    }

    #[test]
    fn test_low_population_beats_risk_level() {
        assert_eq!(classify(1, 1), Alert::CriticallyLow);
        assert_eq!(classify(49, 3), Alert::CriticallyLow);
    }

    #[test]
    fn test_highly_endangered_needs_healthy_population() {
        assert_eq!(classify(50, 1), Alert::HighlyEndangered);
        assert_eq!(classify(50, 2), Alert::None);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = AlertThresholds {
            critical_population: 10,
            highly_endangered_risk: 2,
        };
        assert_eq!(Alert::classify(20, 2, &thresholds), Alert::HighlyEndangered);
        assert_eq!(Alert::classify(9, 2, &thresholds), Alert::CriticallyLow);
    }

    #[test]
    fn test_is_raised() {
        assert!(!Alert::None.is_raised());
        assert!(Alert::Extinct.is_raised());
    }
}
