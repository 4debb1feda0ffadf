//! End-to-end tests for the `shipwright-cli` binary against the fixture
//! catalog.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use tempfile::{tempdir, TempDir};

fn fixture_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/catalog.json")
        .canonicalize()
        .expect("fixture catalog present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("shipwright-cli");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("SHIPWRIGHT_CATALOG")
        .arg("--catalog")
        .arg(fixture_catalog());
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command runs");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

/// Temporary directory holding a freshly created ship snapshot.
fn new_ship(vehicle: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("ship.json");
    cli()
        .args(["new", vehicle, "--output"])
        .arg(&path)
        .assert()
        .success();
    (dir, path)
}

fn summary_json(path: &Path) -> Value {
    stdout_json(cli().args(["--format", "json", "summary"]).arg(path))
}

#[test]
fn lists_vehicles_with_cost_and_budget() {
    cli()
        .arg("vehicles")
        .assert()
        .success()
        .stdout(contains("Available vehicles (3):"))
        .stdout(contains("Light Freighter"))
        .stdout(contains("4,000,000 cr"));
}

#[test]
fn lists_parts_filtered_by_category() {
    cli()
        .args(["parts", "--category", "weapon systems"])
        .assert()
        .success()
        .stdout(contains("Available parts (3):"))
        .stdout(contains("missile_launcher"))
        .stdout(contains("ion_engine_2").not());
}

#[test]
fn lists_parts_as_json() {
    let parts = stdout_json(cli().args(["--format", "json", "parts"]));
    let parts = parts.as_array().expect("array of parts");
    assert_eq!(parts.len(), 17);
    assert_eq!(parts[0]["id"], "laser_cannon");
}

#[test]
fn new_ship_is_saved_and_summarized() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("fighter.json");

    cli()
        .args(["new", "starfighter", "--name", "Red Five", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Red Five (Light Starfighter, Huge)"))
        .stdout(contains("Used 5 of 11 EP (6 remaining)"))
        .stdout(contains("[stock]"));

    let saved: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("snapshot written")).expect("JSON");
    assert_eq!(saved["apiVersion"], "2.0");
    assert_eq!(saved["configuration"]["baseChassis"], "starfighter");
    assert_eq!(saved["manifest"].as_array().map(Vec::len), Some(2));
}

#[test]
fn summary_reports_derived_totals_as_json() {
    let (_dir, path) = new_ship("starfighter");
    let report = summary_json(&path);

    assert_eq!(report["capacity"]["total"], 11);
    assert_eq!(report["capacity"]["remaining"], 6);
    assert_eq!(report["costs"]["total_cost"], 60000.0);
    assert_eq!(report["defenses"]["reflex"], 17.0);
    assert_eq!(report["availability"], "Military");
}

#[test]
fn template_is_applied_to_new_ships() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("gunship.json");
    cli()
        .args(["new", "starfighter", "--template", "military", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Template: Military"));

    let report = summary_json(&path);
    assert_eq!(report["costs"]["hull_cost"], 90000.0);
    assert_eq!(report["capacity"]["total"], 13);
}

#[test]
fn install_updates_the_snapshot_in_place() {
    let (_dir, path) = new_ship("starfighter");

    cli()
        .arg("install")
        .arg(&path)
        .args(["shield_sr15", "--location", "Dorsal"])
        .assert()
        .success()
        .stdout(contains("Installed shield_sr15 as"))
        .stdout(contains("Remaining capacity: 3 EP"));

    let report = summary_json(&path);
    assert_eq!(report["entries"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["costs"]["components_cost"], 10000.0);
    assert_eq!(report["stats"]["sr"], 15.0);
}

#[test]
fn install_reports_evictions_as_json() {
    let (_dir, path) = new_ship("starfighter");

    let result = stdout_json(
        cli()
            .args(["--format", "json", "install"])
            .arg(&path)
            .arg("ion_engine_4"),
    );
    assert_eq!(result["part"], "ion_engine_4");
    assert_eq!(result["evicted"].as_array().map(Vec::len), Some(1));
    assert_eq!(result["size"]["status"], "compatible");
}

#[test]
fn oversized_parts_install_with_a_warning() {
    let (_dir, path) = new_ship("starfighter");

    cli()
        .arg("install")
        .arg(&path)
        .arg("heavy_turbolaser")
        .assert()
        .success()
        .stdout(contains("Warning: chassis too small (min Colossal)"));
}

#[test]
fn unknown_part_is_rejected_without_touching_the_snapshot() {
    let (_dir, path) = new_ship("starfighter");
    let before = fs::read_to_string(&path).expect("snapshot");

    cli()
        .arg("install")
        .arg(&path)
        .arg("warp_core")
        .assert()
        .failure()
        .stderr(contains("unknown part 'warp_core'"));

    assert_eq!(fs::read_to_string(&path).expect("snapshot"), before);
}

#[test]
fn remove_deletes_an_installed_entry() {
    let (_dir, path) = new_ship("light_freighter");
    let installed = stdout_json(
        cli()
            .args(["--format", "json", "install"])
            .arg(&path)
            .arg("cargo_pod"),
    );
    let instance_id = installed["instance_id"].as_str().expect("instance id").to_string();

    cli()
        .arg("remove")
        .arg(&path)
        .arg(&instance_id)
        .assert()
        .success()
        .stdout(contains(format!("Removed {instance_id}")));

    cli()
        .arg("remove")
        .arg(&path)
        .arg(&instance_id)
        .assert()
        .failure()
        .stderr(contains("no installed entry"));
}

#[test]
fn unknown_vehicle_is_rejected() {
    let dir = tempdir().expect("create temp dir");
    cli()
        .args(["new", "battlestar", "--output"])
        .arg(dir.path().join("ship.json"))
        .assert()
        .failure()
        .stderr(contains("unknown vehicle 'battlestar'"));
}

#[test]
fn unsupported_snapshot_version_fails_with_context() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("future.json");
    fs::write(
        &path,
        r#"{ "apiVersion": "3.0", "configuration": { "baseChassis": "starfighter" } }"#,
    )
    .expect("write snapshot");

    cli()
        .arg("summary")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("failed to load snapshot"))
        .stderr(contains("unsupported snapshot version 3.0"));
}

#[test]
fn missing_catalog_fails_with_context() {
    let dir = tempdir().expect("create temp dir");
    let mut cmd = cargo_bin_cmd!("shipwright-cli");
    cmd.env("RUST_LOG", "error")
        .arg("--catalog")
        .arg(dir.path().join("nope.json"))
        .arg("vehicles")
        .assert()
        .failure()
        .stderr(contains("failed to load catalog"));
}

#[test]
fn catalog_can_come_from_the_environment() {
    let mut cmd = cargo_bin_cmd!("shipwright-cli");
    cmd.env("RUST_LOG", "error")
        .env("SHIPWRIGHT_CATALOG", fixture_catalog())
        .arg("vehicles")
        .assert()
        .success()
        .stdout(contains("Escort Frigate"));
}
