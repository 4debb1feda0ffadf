//! Shipwright configuration engine.
//!
//! This crate loads a catalog of parts and vehicles, tracks one ship
//! configuration built from it, and derives cost, capacity budget, combat
//! statistics, damage formulas and logistics from the current selection.
//! Front ends (the CLI) should drive everything through [`Shipyard`] and read
//! derived values from its [`Projection`] instead of reimplementing the rules.
//!

#![deny(warnings)]

pub mod availability;
pub mod budget;
pub mod catalog;
pub mod configuration;
pub mod damage;
pub mod error;
pub mod ledger;
pub mod library;
pub mod logistics;
pub mod modifiers;
pub mod options;
pub mod projection;
pub mod report;
pub mod shipyard;
pub mod snapshot;
pub mod stats;

pub use availability::Availability;
pub use budget::CapacityBudget;
pub use catalog::{Catalog, MergedCatalog, PartDefinition, VehicleDefinition};
pub use configuration::{Configuration, CrewQuality, InstalledEntry};
pub use error::{Error, Result};
pub use ledger::CostLedger;
pub use library::{Direction, Library, LibraryData, LibraryPatch};
pub use modifiers::{Enhancement, ModifierChange, Modifiers, Mount};
pub use projection::Projection;
pub use report::ShipReport;
pub use shipyard::{InstallOutcome, Shipyard, SizeCheck};
pub use snapshot::Snapshot;
pub use stats::Defenses;
