mod common;

use shipwright_lib::catalog::{Catalog, MergedCatalog, PartDefinition, VehicleDefinition};
use shipwright_lib::error::Error;
use shipwright_lib::Library;

fn part(id: &str, cost: f64) -> PartDefinition {
    let mut part = PartDefinition::new(id, id.to_uppercase());
    part.base_cost = cost;
    part
}

fn library(name: &str, parts: Vec<PartDefinition>) -> Library {
    let mut library = Library::new(name);
    library.components = parts;
    library
}

fn base_catalog() -> Catalog {
    let mut catalog = Catalog::default();
    catalog.parts = vec![part("p0", 10.0), part("p1", 100.0), part("p2", 50.0)];
    catalog
}

#[test]
fn later_active_library_wins_value_but_not_position() {
    let catalog = base_catalog();
    let mut inactive = library("Disabled", vec![part("p1", 999.0)]);
    inactive.active = false;
    let libraries = vec![
        library("First", vec![part("p1", 200.0), part("p3", 5.0)]),
        library("Second", vec![part("p1", 300.0)]),
        inactive,
    ];

    let merged = MergedCatalog::merge(&catalog, &libraries);

    assert_eq!(merged.part("p1").expect("p1 present").base_cost, 300.0);
    assert_eq!(merged.part_position("p1"), Some(1));
    assert_eq!(merged.part_position("p3"), Some(3));

    let ids: Vec<&str> = merged.parts().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p0", "p1", "p2", "p3"]);
}

#[test]
fn library_only_entries_keep_first_introduction_position() {
    let catalog = base_catalog();
    let libraries = vec![
        library("First", vec![part("custom", 1.0)]),
        library("Second", vec![part("other", 2.0), part("custom", 3.0)]),
    ];

    let merged = MergedCatalog::merge(&catalog, &libraries);
    assert_eq!(merged.part_position("custom"), Some(3));
    assert_eq!(merged.part_position("other"), Some(4));
    assert_eq!(merged.part("custom").expect("custom present").base_cost, 3.0);
    assert_eq!(merged.part_count(), 5);
}

#[test]
fn library_vehicles_override_base_vehicles() {
    let mut catalog = base_catalog();
    catalog.vehicles.push(VehicleDefinition {
        id: "hull".to_string(),
        cost: 1000.0,
        ..VehicleDefinition::default()
    });
    let mut overlay = Library::new("Ships");
    overlay.ships.push(VehicleDefinition {
        id: "hull".to_string(),
        cost: 2500.0,
        ..VehicleDefinition::default()
    });
    let libraries = vec![overlay];

    let merged = MergedCatalog::merge(&catalog, &libraries);
    assert_eq!(merged.vehicle("hull").expect("hull present").cost, 2500.0);
    assert_eq!(merged.vehicle_count(), 1);
}

#[test]
fn fixture_catalog_loads_and_classifies_parts() {
    let catalog = common::fixture_catalog();
    let merged = MergedCatalog::merge(&catalog, &[]);

    assert!(merged.is_weapon("laser_cannon"));
    assert!(merged.is_weapon("sensor_decoy"));
    assert!(!merged.is_weapon("shield_sr15"));
    assert!(merged.is_engine("ion_engine_2"));
    assert!(!merged.is_engine("hyperdrive_x1"));
    assert_eq!(merged.first_vehicle().map(|v| v.id.as_str()), Some("starfighter"));
    assert!(catalog.source_path().is_some());
}

#[test]
fn rejects_negative_base_cost() {
    let json = r#"{ "parts": [{ "id": "bad", "name": "Bad", "baseCost": -5 }] }"#;
    let err = Catalog::from_json_str(json).expect_err("should reject negative cost");
    match err {
        Error::CatalogValidation { message } => assert!(message.contains("bad")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn rejects_empty_identifiers() {
    let json = r#"{ "vehicles": [{ "id": " ", "name": "Nameless" }] }"#;
    let err = Catalog::from_json_str(json).expect_err("should reject empty id");
    assert!(matches!(err, Error::CatalogValidation { .. }));
}

#[test]
fn accepts_legacy_uppercase_table_keys() {
    let json = r#"{
        "EQUIPMENT": [{ "id": "gun", "name": "Gun", "baseCost": 100 }],
        "STOCK_SHIPS": [{ "id": "hull", "name": "Hull", "size": "Huge" }],
        "SIZE_COST_MULTIPLIERS": { "Huge": 2 },
        "LICENSE_FEES": { "Military": 0.2 }
    }"#;
    let catalog = Catalog::from_json_str(json).expect("legacy keys parse");
    assert_eq!(catalog.parts.len(), 1);
    assert_eq!(catalog.tables.size_multiplier("Huge"), 2.0);
    assert_eq!(catalog.tables.fee_rate("Military"), 0.2);
}
