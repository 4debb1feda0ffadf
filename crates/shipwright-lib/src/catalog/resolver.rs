//! Merge of the base catalog with active overlay libraries.

use tracing::trace;

use crate::library::Library;

use super::ordered::OrderedMap;
use super::types::{PartDefinition, VehicleDefinition};
use super::Catalog;

/// Identifier-keyed view over the base catalog plus every active library.
///
/// Base entries come first in declared order; each active library, in list
/// order, then inserts or overwrites entries by id. An overwritten id keeps
/// the position where it was first seen.
#[derive(Debug, Clone, Default)]
pub struct MergedCatalog<'a> {
    parts: OrderedMap<&'a PartDefinition>,
    vehicles: OrderedMap<&'a VehicleDefinition>,
}

impl<'a> MergedCatalog<'a> {
    /// Build the merged view. Inactive libraries contribute nothing and
    /// duplicate ids are not an error: the last write wins.
    pub fn merge(catalog: &'a Catalog, libraries: &'a [Library]) -> Self {
        let mut parts = OrderedMap::new();
        let mut vehicles = OrderedMap::new();

        for part in &catalog.parts {
            parts.upsert(part.id.as_str(), part);
        }
        for vehicle in &catalog.vehicles {
            vehicles.upsert(vehicle.id.as_str(), vehicle);
        }

        for library in libraries.iter().filter(|lib| lib.active) {
            for part in &library.components {
                if parts.upsert(part.id.as_str(), part).is_some() {
                    trace!(part = %part.id, library = %library.name, "library overrides part");
                }
            }
            for vehicle in &library.ships {
                if vehicles.upsert(vehicle.id.as_str(), vehicle).is_some() {
                    trace!(vehicle = %vehicle.id, library = %library.name, "library overrides vehicle");
                }
            }
        }

        Self { parts, vehicles }
    }

    pub fn part(&self, id: &str) -> Option<&'a PartDefinition> {
        self.parts.get(id).copied()
    }

    pub fn vehicle(&self, id: &str) -> Option<&'a VehicleDefinition> {
        self.vehicles.get(id).copied()
    }

    /// Parts in merged order.
    pub fn parts(&self) -> impl Iterator<Item = &'a PartDefinition> + '_ {
        self.parts.values().copied()
    }

    /// Vehicles in merged order.
    pub fn vehicles(&self) -> impl Iterator<Item = &'a VehicleDefinition> + '_ {
        self.vehicles.values().copied()
    }

    pub fn part_position(&self, id: &str) -> Option<usize> {
        self.parts.position(id)
    }

    pub fn vehicle_position(&self, id: &str) -> Option<usize> {
        self.vehicles.position(id)
    }

    pub fn first_vehicle(&self) -> Option<&'a VehicleDefinition> {
        self.vehicles.first().copied()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether `id` resolves to a weapon part.
    pub fn is_weapon(&self, id: &str) -> bool {
        self.part(id).is_some_and(PartDefinition::is_weapon)
    }

    /// Whether `id` resolves to a sublight engine part.
    pub fn is_engine(&self, id: &str) -> bool {
        self.part(id).is_some_and(PartDefinition::is_engine)
    }
}
