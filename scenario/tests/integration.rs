//! Integration tests for ecotrack-scenario
//!
//! Load scenario files from disk, run them, and drive the `ecotrack` binary.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use ecotrack_scenario::{Scenario, ScenarioError, ScenarioRunner, StepOutcome, render};

fn savanna_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join("savanna.toml")
}

fn ecotrack() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ecotrack"))
}

#[test]
fn test_bundled_savanna_scenario() {
    let scenario = Scenario::load(savanna_path()).unwrap();
    assert_eq!(scenario.name.as_deref(), Some("Savanna"));
    assert!(scenario.logging.as_ref().unwrap().console.pretty);

    let report = ScenarioRunner::run_fresh(&scenario);
    assert!(report.succeeded());

    let queues: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|o| match o {
            StepOutcome::RelocationQueue { species } => {
                Some(species.iter().map(|s| s.to_string()).collect::<Vec<_>>())
            }
            _ => None,
        })
        .collect();
    assert_eq!(queues, vec![vec!["Lion", "Cheetah"], vec!["Cheetah"]]);

    let rendered = render::report(&report);
    assert!(rendered.contains(
        "Species: Cheetah | Risk Level: 1 | Population: 12 | Change Since Start: 0"
    ));
    assert!(rendered.contains("If Cheetah goes extinct, it will impact:"));
    assert!(rendered.contains("- Zebra (Dependency Factor: 0.05)"));
    assert!(rendered.contains("- Savanna Grass (Dependency Factor: 0.00)"));
    assert!(rendered.contains("- Lion (Dependency Factor: 0.22)"));
    assert!(rendered.contains("- Wildebeest (Dependency Factor: 0.01)"));
    assert!(rendered.contains("🎉 Lion has been removed from the relocation priority queue!"));
}

#[test]
fn test_load_from_tempfile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pond.toml");
    fs::write(
        &path,
        r#"
        name = "Pond"

        [[step]]
        action = "add_species"
        name = "Heron"
        risk_level = 2
        population = 9

        [[step]]
        action = "add_species"
        name = "Carp"
        risk_level = 4
        population = 90

        [[step]]
        action = "add_dependency"
        predator = "heron"
        prey = "CARP"

        [[step]]
        action = "simulate_impact"
        name = "Heron"
        "#,
    )
    .unwrap();

    let report = ScenarioRunner::run_fresh(&Scenario::load(&path).unwrap());
    match report.outcomes.last().unwrap() {
        StepOutcome::Impact { impact } => {
            assert_eq!(impact.affected().len(), 1);
            assert_eq!(impact.affected()[0].species.as_str(), "Carp");
            assert!((impact.affected()[0].dependency_factor - 0.1).abs() < 1e-9);
        }
        other => panic!("expected impact, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Scenario::load(dir.path().join("missing.toml"));
    assert!(matches!(result, Err(ScenarioError::Read { .. })));
}

#[test]
fn test_binary_demo_json() {
    let output = ecotrack()
        .args(["--demo", "--json", "--no-logging"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["scenario"], "Demo food chain");
    assert_eq!(json["failures"], 0);
    assert_eq!(
        json["outcomes"].as_array().unwrap().len(),
        Scenario::demo().steps.len()
    );
}

#[test]
fn test_binary_text_output() {
    let output = ecotrack()
        .arg(savanna_path())
        .arg("--no-logging")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("========== Savanna =========="));
    assert!(stdout.contains("--- Current Species Impact Report ---"));
}

#[test]
fn test_binary_fails_on_unknown_species() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(
        &path,
        r#"
        [[step]]
        action = "record_recovery"
        name = "Dodo"
        amount = 4
        "#,
    )
    .unwrap();

    let output = ecotrack().arg(&path).arg("--no-logging").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Step 1 (record_recovery) failed: Species not found: Dodo"));
}

#[test]
fn test_binary_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invalid.toml");
    fs::write(&path, "[[step]]\naction = \"add_species\"\nname = \"\"\nrisk_level = 3\n").unwrap();

    let output = ecotrack().arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to load scenario"));
}
