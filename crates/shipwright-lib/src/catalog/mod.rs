//! Part and vehicle catalog: bulk loading, base-catalog edits and the merged
//! lookup view.
//!
//! - [`types`] - Part, vehicle and template records
//! - [`tables`] - Size, fee and availability lookup tables
//! - [`ordered`] - Insertion-ordered map used by the merge
//! - [`resolver`] - Base catalog + active libraries merge
//!
//! # Example
//!
//! ```
//! use shipwright_lib::catalog::{Catalog, MergedCatalog};
//!
//! let catalog = Catalog::from_json_str(r#"{
//!     "parts": [{ "id": "laser", "name": "Laser Cannon", "baseCost": 1000, "baseEp": 2 }],
//!     "vehicles": [{ "id": "fighter", "name": "Fighter", "size": "Huge", "cost": 20000, "baseEp": 8 }]
//! }"#).unwrap();
//!
//! let merged = MergedCatalog::merge(&catalog, &[]);
//! assert_eq!(merged.part("laser").unwrap().base_ep, 2);
//! ```

pub mod ordered;
pub mod resolver;
pub mod tables;
pub mod types;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

pub use ordered::OrderedMap;
pub use resolver::MergedCatalog;
pub use tables::{CatalogTables, ILLEGAL_AVAILABILITY, MILITARY_AVAILABILITY};
pub use types::{
    DefaultPart, DefaultPartConfig, Logistics, OptionCost, OptionCostDetail, PartDefinition,
    PayloadKind, PayloadSpec, Stats, TemplateDefinition, UpgradeSpecs, VehicleDefinition,
};

/// Base catalog as supplied by the bulk data load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, alias = "EQUIPMENT")]
    pub parts: Vec<PartDefinition>,
    #[serde(default, alias = "STOCK_SHIPS")]
    pub vehicles: Vec<VehicleDefinition>,
    #[serde(default, alias = "TEMPLATES")]
    pub templates: Vec<TemplateDefinition>,
    #[serde(flatten)]
    pub tables: CatalogTables,
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            parts = catalog.parts.len(),
            vehicles = catalog.vehicles.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Load a catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let catalog: Catalog = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Check every record for an id and sane prices.
    pub fn validate(&self) -> Result<()> {
        for part in &self.parts {
            part.validate()?;
        }
        for vehicle in &self.vehicles {
            vehicle.validate()?;
        }
        Ok(())
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn template(&self, id: &str) -> Option<&TemplateDefinition> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Insert a part, replacing any base part with the same id in place.
    pub fn add_part(&mut self, part: PartDefinition) {
        match self.parts.iter_mut().find(|p| p.id == part.id) {
            Some(existing) => *existing = part,
            None => self.parts.push(part),
        }
    }

    /// Replace an existing base part. Returns false when no part has that id.
    pub fn update_part(&mut self, part: PartDefinition) -> bool {
        match self.parts.iter_mut().find(|p| p.id == part.id) {
            Some(existing) => {
                *existing = part;
                true
            }
            None => false,
        }
    }

    /// Remove a base part. Returns false when no part has that id.
    pub fn remove_part(&mut self, id: &str) -> bool {
        let before = self.parts.len();
        self.parts.retain(|p| p.id != id);
        self.parts.len() != before
    }

    /// Insert a vehicle, replacing any base vehicle with the same id in place.
    pub fn add_vehicle(&mut self, vehicle: VehicleDefinition) {
        match self.vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => *existing = vehicle,
            None => self.vehicles.push(vehicle),
        }
    }

    /// Replace an existing base vehicle. Returns false when no vehicle has that id.
    pub fn update_vehicle(&mut self, vehicle: VehicleDefinition) -> bool {
        match self.vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => {
                *existing = vehicle;
                true
            }
            None => false,
        }
    }

    /// Remove a base vehicle. Returns false when no vehicle has that id.
    pub fn remove_vehicle(&mut self, id: &str) -> bool {
        let before = self.vehicles.len();
        self.vehicles.retain(|v| v.id != id);
        self.vehicles.len() != before
    }

    /// Serialize the catalog back to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
