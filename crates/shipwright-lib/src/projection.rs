//! Read-only view over the current state from which every derived value is
//! computed.
//!
//! A [`Projection`] borrows the catalog and the configuration, merges the
//! catalog once, and resolves the selected chassis and template. Nothing is
//! cached beyond that: build a new projection after every mutation.

use once_cell::sync::Lazy;

use crate::catalog::{
    Catalog, CatalogTables, MergedCatalog, PartDefinition, TemplateDefinition, VehicleDefinition,
};
use crate::configuration::{Configuration, InstalledEntry};

static FALLBACK_VEHICLE: Lazy<VehicleDefinition> = Lazy::new(VehicleDefinition::fallback);

/// Derived-value view over one catalog and one configuration.
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    pub(crate) catalog: &'a Catalog,
    pub(crate) config: &'a Configuration,
    pub(crate) merged: MergedCatalog<'a>,
    pub(crate) vehicle: &'a VehicleDefinition,
    pub(crate) template: Option<&'a TemplateDefinition>,
}

impl<'a> Projection<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a Configuration) -> Self {
        let merged = MergedCatalog::merge(catalog, &config.libraries);
        // An unknown chassis id falls back to the first vehicle on offer.
        let vehicle = merged
            .vehicle(&config.chassis_id)
            .or_else(|| merged.first_vehicle())
            .unwrap_or_else(|| &*FALLBACK_VEHICLE);
        let template = config
            .template_id
            .as_deref()
            .and_then(|id| catalog.template(id));

        Self {
            catalog,
            config,
            merged,
            vehicle,
            template,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    pub fn merged(&self) -> &MergedCatalog<'a> {
        &self.merged
    }

    pub fn tables(&self) -> &'a CatalogTables {
        &self.catalog.tables
    }

    /// The resolved chassis.
    pub fn vehicle(&self) -> &'a VehicleDefinition {
        self.vehicle
    }

    pub fn template(&self) -> Option<&'a TemplateDefinition> {
        self.template
    }

    /// Part definition behind an installed entry, if it still resolves.
    pub fn part(&self, entry: &InstalledEntry) -> Option<&'a PartDefinition> {
        self.merged.part(&entry.def_id)
    }

    /// Installed entries paired with their resolved parts; unresolved entries
    /// are skipped.
    pub fn resolved_entries(
        &self,
    ) -> impl Iterator<Item = (&'a InstalledEntry, &'a PartDefinition)> + '_ {
        self.config
            .entries
            .iter()
            .filter_map(move |entry| self.part(entry).map(|part| (entry, part)))
    }

    /// Cost multiplier of the chassis size.
    pub fn size_multiplier(&self) -> f64 {
        self.tables().size_multiplier(&self.vehicle.size)
    }
}
