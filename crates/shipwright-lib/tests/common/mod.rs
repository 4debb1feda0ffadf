//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use shipwright_lib::{Catalog, Shipyard};

/// Path to the fixtures directory shared with the CLI and benches.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_catalog() -> Catalog {
    Catalog::from_path(&fixtures_dir().join("catalog.json")).expect("load fixture catalog.json")
}

/// New ship on `vehicle_id` with its default parts installed.
#[allow(dead_code)]
pub fn new_ship(vehicle_id: &str) -> Shipyard {
    let mut yard = Shipyard::new(fixture_catalog());
    yard.install_defaults(vehicle_id);
    yard
}

/// Bare chassis without default parts.
#[allow(dead_code)]
pub fn bare_ship(vehicle_id: &str) -> Shipyard {
    let mut yard = Shipyard::new(fixture_catalog());
    yard.select_vehicle(vehicle_id);
    yard
}
