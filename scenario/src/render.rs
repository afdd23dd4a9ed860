//! Plain-text rendering of step outcomes

use std::fmt::Write as _;

use ecotrack_core::{Alert, ImpactOutcome, Measure, SpeciesRecord};

use crate::runner::{RunReport, StepOutcome};

fn alert_line(out: &mut String, record: &SpeciesRecord, alert: Alert) {
    if alert.is_raised() {
        let _ = writeln!(out, "⚠ ALERT: {} {}!", record.id, alert);
    }
}

/// The bare measured value: head count for fauna, biomass for flora
fn measured_value(record: &SpeciesRecord) -> String {
    match record.measure() {
        Measure::Population(count) => count.to_string(),
        Measure::Biomass(tons) => tons.to_string(),
    }
}

/// Render one outcome as console text
pub fn text(outcome: &StepOutcome) -> String {
    let mut out = String::new();
    match outcome {
        StepOutcome::SpeciesAdded {
            record,
            alert,
            in_relocation_queue,
        } => {
            let _ = writeln!(
                out,
                "Added {} | Risk Level: {} | {}",
                record.id,
                record.risk_level,
                record.measure()
            );
            if *in_relocation_queue {
                let _ = writeln!(out, "{} is in the relocation priority queue", record.id);
            }
            alert_line(&mut out, record, *alert);
        }
        StepOutcome::DeathRecorded { record, alert, .. } => {
            if record.population > 0 {
                let _ = writeln!(
                    out,
                    "Updated population of {}: {}",
                    record.id,
                    measured_value(record)
                );
            }
            alert_line(&mut out, record, *alert);
        }
        StepOutcome::RecoveryRecorded {
            record,
            amount,
            alert,
            released_from_queue,
        } => {
            let _ = writeln!(
                out,
                "✅ {} recovered by {} individuals. New population: {}",
                record.id, amount, record.population
            );
            if *released_from_queue {
                let _ = writeln!(
                    out,
                    "🎉 {} has been removed from the relocation priority queue!",
                    record.id
                );
            }
            alert_line(&mut out, record, *alert);
        }
        StepOutcome::DependencyAdded { predator, prey } => {
            let _ = writeln!(out, "Food chain: {} preys upon {}", predator, prey);
        }
        StepOutcome::RankedReport { entries } => {
            let _ = writeln!(out, "--- Species by Risk Level (In-Order Traversal) ---");
            for entry in entries {
                let _ = writeln!(
                    out,
                    "Species: {} | Risk Level: {} | Population: {} | Change Since Start: {}",
                    entry.species, entry.risk_level, entry.population, entry.delta
                );
            }
        }
        StepOutcome::RelocationQueue { species } => {
            let _ = writeln!(out, "--- Relocation Priority Queue ---");
            for id in species {
                let _ = writeln!(out, "{}", id);
            }
        }
        StepOutcome::ImpactReport { entries } => {
            let _ = writeln!(out, "--- Current Species Impact Report ---");
            for entry in entries {
                let _ = write!(
                    out,
                    "Species: {} | Risk Level: {} | {}",
                    entry.species, entry.risk_level, entry.measure
                );
                if entry.is_critical {
                    out.push_str(" ⚠ CRITICAL");
                }
                out.push('\n');
            }
        }
        StepOutcome::Impact { impact } => match impact {
            ImpactOutcome::Impacted { origin, affected } => {
                let _ = writeln!(out, "If {} goes extinct, it will impact:", origin);
                for species in affected {
                    let _ = writeln!(
                        out,
                        "- {} (Dependency Factor: {:.2})",
                        species.species, species.dependency_factor
                    );
                }
            }
            ImpactOutcome::NoDependency { species } => {
                let _ = writeln!(out, "No direct dependency found for {}", species);
            }
        },
        StepOutcome::Failed {
            step,
            action,
            error,
        } => {
            let _ = writeln!(out, "Step {} ({}) failed: {}", step, action, error);
        }
    }
    out
}

/// Render a whole run, one blank line between steps
pub fn report(report: &RunReport) -> String {
    let mut out = String::new();
    if let Some(name) = &report.scenario {
        let _ = writeln!(out, "========== {} ==========", name);
    }
    for outcome in &report.outcomes {
        out.push('\n');
        out.push_str(&text(outcome));
    }
    if !report.succeeded() {
        let _ = writeln!(out, "\n{} step(s) failed", report.failures);
    }
    out
}
