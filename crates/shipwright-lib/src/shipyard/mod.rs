//! Owned state container: the catalog plus the one configuration being
//! edited.
//!
//! Every mutation goes through a [`Shipyard`]; every derived value is read
//! from a fresh [`Projection`]. Persistence is explicit (see
//! [`Shipyard::save_to_path`]), never a side effect of editing.

mod install;
mod libraries;

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::catalog::{Catalog, PartDefinition, VehicleDefinition};
use crate::configuration::{Configuration, CrewQuality};
use crate::error::Result;
use crate::modifiers::ModifierChange;
use crate::projection::Projection;
use crate::snapshot::Snapshot;

pub use install::{InstallOutcome, SizeCheck};

/// Catalog and configuration under a single owner.
#[derive(Debug, Clone, Default)]
pub struct Shipyard {
    catalog: Catalog,
    config: Configuration,
}

impl Shipyard {
    /// Empty configuration on top of `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: Configuration::default(),
        }
    }

    pub fn with_configuration(catalog: Catalog, config: Configuration) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn into_parts(self) -> (Catalog, Configuration) {
        (self.catalog, self.config)
    }

    /// Read-only view for derived values, reflecting the latest mutation.
    pub fn projection(&self) -> Projection<'_> {
        Projection::new(&self.catalog, &self.config)
    }

    /// Switch chassis without touching installed entries.
    pub fn select_vehicle(&mut self, vehicle_id: impl Into<String>) {
        self.config.chassis_id = vehicle_id.into();
    }

    /// Select a template, or clear it with `None`. Unknown ids are kept but
    /// contribute nothing.
    pub fn select_template(&mut self, template_id: Option<&str>) {
        self.config.template_id = template_id.map(str::to_string);
    }

    /// Cargo tons to convert into capacity budget; negative or non-finite
    /// amounts become 0.
    pub fn set_cargo_conversion(&mut self, tons: f64) {
        self.config.cargo_to_ep_amount = if tons.is_finite() { tons.max(0.0) } else { 0.0 };
    }

    /// Escape capacity percentage to give up, clamped to 100.
    pub fn set_escape_reduction(&mut self, pct: u32) {
        self.config.escape_pods_to_ep_pct = pct.min(100);
    }

    pub fn set_crew_quality(&mut self, quality: CrewQuality) {
        self.config.crew_quality = quality;
    }

    pub fn set_engineering(&mut self, enabled: bool) {
        self.config.engineering = enabled;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.config.name = name.into();
    }

    /// Apply one modifier edit to an installed entry. Returns false when no
    /// entry has that instance id.
    pub fn apply_change(&mut self, instance_id: &str, change: ModifierChange) -> bool {
        let capacity_payload = self
            .config
            .entry(instance_id)
            .and_then(|entry| self.projection().part(entry))
            .is_some_and(PartDefinition::has_capacity_payload);

        let Some(entry) = self.config.entry_mut(instance_id) else {
            return false;
        };
        let mods = &mut entry.modifiers;

        match change {
            ModifierChange::PayloadCount(count) => mods.payload_count = count,
            ModifierChange::PayloadOption(enabled) => mods.payload_option = enabled,
            ModifierChange::BatteryCount(count) => mods.battery_count = count.max(1),
            ModifierChange::Quantity(count) => mods.quantity = count.max(1),
            ModifierChange::FireLink(count) => {
                mods.fire_link = count.max(1);
                if count > 1 {
                    mods.battery_count = 1;
                    if capacity_payload {
                        mods.fire_link_option = true;
                    }
                }
            }
            ModifierChange::FireLinkOption(enabled) => mods.fire_link_option = enabled,
            ModifierChange::Mount(mount) => mods.mount = mount,
            ModifierChange::Enhancement(tier) => mods.enhancement = tier,
            ModifierChange::WeaponUser(user) => mods.weapon_user = user,
            ModifierChange::PointBlank(enabled) => mods.point_blank = enabled,
            ModifierChange::Option { key, enabled } => {
                if !mods.set_flag(&key, enabled) {
                    warn!(
                        instance_id,
                        key = %key,
                        "ignoring option flag named after a typed modifier"
                    );
                }
            }
            ModifierChange::Miniaturization(rank) => {
                entry.miniaturization = if rank <= 2 { rank } else { 0 };
            }
            ModifierChange::NonStandard(enabled) => entry.is_non_standard = enabled,
            ModifierChange::Location(location) => entry.location = location,
        }

        debug!(instance_id, "applied modifier change");
        true
    }

    /// Insert a base-catalog part, replacing one with the same id.
    pub fn add_part(&mut self, part: PartDefinition) {
        debug!(part_id = %part.id, "adding base part");
        self.catalog.add_part(part);
    }

    pub fn update_part(&mut self, part: PartDefinition) -> bool {
        self.catalog.update_part(part)
    }

    /// Remove a base-catalog part along with every installed entry that
    /// references it.
    pub fn remove_part(&mut self, part_id: &str) -> bool {
        let removed = self.catalog.remove_part(part_id);
        if removed {
            let purged = self.purge_entries(part_id);
            debug!(part_id, purged, "removed base part");
        }
        removed
    }

    pub fn add_vehicle(&mut self, vehicle: VehicleDefinition) {
        debug!(vehicle_id = %vehicle.id, "adding base vehicle");
        self.catalog.add_vehicle(vehicle);
    }

    pub fn update_vehicle(&mut self, vehicle: VehicleDefinition) -> bool {
        self.catalog.update_vehicle(vehicle)
    }

    pub fn remove_vehicle(&mut self, vehicle_id: &str) -> bool {
        self.catalog.remove_vehicle(vehicle_id)
    }

    /// Drop every installed entry referencing `def_id`; returns how many.
    fn purge_entries(&mut self, def_id: &str) -> usize {
        let before = self.config.entries.len();
        self.config.entries.retain(|entry| entry.def_id != def_id);
        before - self.config.entries.len()
    }

    /// Version-tagged snapshot of the configuration.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::from_configuration(&self.config)
    }

    /// Replace the configuration with an imported snapshot. On error the
    /// current configuration is left untouched.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) -> Result<()> {
        let config = snapshot.into_configuration(&self.catalog)?;
        debug!(
            entries = config.entries.len(),
            libraries = config.libraries.len(),
            "imported snapshot"
        );
        self.config = config;
        Ok(())
    }

    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let snapshot = Snapshot::from_json_str(json)?;
        self.import_snapshot(snapshot)
    }

    pub fn export_json(&self) -> Result<String> {
        self.export_snapshot().to_json_pretty()
    }

    /// Write the snapshot to `path` as pretty JSON.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        fs::write(path, self.export_json()?)?;
        debug!(path = %path.display(), "saved snapshot");
        Ok(())
    }

    /// Replace the configuration with the snapshot stored at `path`.
    pub fn load_from_path(&mut self, path: &Path) -> Result<()> {
        let json = fs::read_to_string(path)?;
        self.import_json(&json)
    }
}
