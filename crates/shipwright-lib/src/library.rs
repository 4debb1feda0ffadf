//! Overlay libraries of additional or overriding catalog entries.

use serde::{Deserialize, Serialize};

use crate::catalog::{PartDefinition, VehicleDefinition};

/// Name given to the library created on demand for custom content.
pub const DEFAULT_LIBRARY_NAME: &str = "User Library";
/// Name given to imported libraries that carry none.
pub const IMPORTED_LIBRARY_NAME: &str = "Imported Library";

/// An ordered, toggle-able overlay of parts and vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "default_true")]
    pub editable: bool,
    #[serde(default)]
    pub components: Vec<PartDefinition>,
    #[serde(default)]
    pub ships: Vec<VehicleDefinition>,
}

fn default_true() -> bool {
    true
}

impl Library {
    /// Empty, active, editable library with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            active: true,
            editable: true,
            components: Vec::new(),
            ships: Vec::new(),
        }
    }

    pub fn part(&self, id: &str) -> Option<&PartDefinition> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn vehicle(&self, id: &str) -> Option<&VehicleDefinition> {
        self.ships.iter().find(|s| s.id == id)
    }
}

/// Portable library content as exchanged between users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub components: Vec<PartDefinition>,
    #[serde(default)]
    pub ships: Vec<VehicleDefinition>,
}

impl LibraryData {
    /// Turn exchanged content into a fresh active, editable library.
    pub fn into_library(self) -> Library {
        Library {
            components: self.components,
            ships: self.ships,
            ..Library::new(self.name.unwrap_or_else(|| IMPORTED_LIBRARY_NAME.to_string()))
        }
    }
}

/// Partial update of a library's metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryPatch {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub editable: Option<bool>,
}

/// Direction for reordering a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Fresh identifier for libraries and installed entries.
pub(crate) fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
