use serde::Serialize;
use tracing::{debug, warn};

use super::Shipyard;
use crate::catalog::{DefaultPart, PartDefinition};
use crate::configuration::InstalledEntry;
use crate::library::new_id;
use crate::modifiers::{Modifiers, DEFAULT_WEAPON_USER};
use crate::projection::Projection;

/// Whether a part fits the selected chassis. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SizeCheck {
    Compatible,
    /// The chassis is larger than the part's maximum size.
    ChassisTooLarge { max: String },
    /// The chassis is smaller than the part's minimum size.
    ChassisTooSmall { min: String },
}

impl SizeCheck {
    pub fn is_compatible(&self) -> bool {
        matches!(self, SizeCheck::Compatible)
    }
}

/// Result of a successful install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    pub instance_id: String,
    /// Instance ids removed because they shared the part's exclusive group.
    pub evicted: Vec<String>,
    pub size: SizeCheck,
}

impl Projection<'_> {
    /// Compare the chassis size rank with the part's bounds. Sizes missing
    /// from the size order rank below every listed size.
    pub fn size_check(&self, part: &PartDefinition) -> SizeCheck {
        let tables = self.tables();
        let rank = |size: &str| tables.size_rank(size).map_or(-1, |r| r as isize);
        let chassis = rank(&self.vehicle.size);

        if let Some(max) = part.max_size_bound() {
            if chassis > rank(max) {
                return SizeCheck::ChassisTooLarge {
                    max: max.to_string(),
                };
            }
        }
        if let Some(min) = part.min_size_bound() {
            if chassis < rank(min) {
                return SizeCheck::ChassisTooSmall {
                    min: min.to_string(),
                };
            }
        }
        SizeCheck::Compatible
    }

    /// Size check by part id; unknown parts count as compatible.
    pub fn is_size_compatible(&self, part_id: &str) -> bool {
        self.merged
            .part(part_id)
            .map_or(true, |part| self.size_check(part).is_compatible())
    }

    /// Installed entries whose part does not fit the selected chassis.
    pub fn incompatible_entries(&self) -> Vec<&InstalledEntry> {
        self.resolved_entries()
            .filter(|(_, part)| !self.size_check(part).is_compatible())
            .map(|(entry, _)| entry)
            .collect()
    }

    /// Installed entries whose part id no longer resolves.
    pub fn unresolved_entries(&self) -> Vec<&InstalledEntry> {
        self.config
            .entries
            .iter()
            .filter(|entry| self.part(entry).is_none())
            .collect()
    }
}

/// Modifier record a chassis default part starts with.
fn default_modifiers(default: &DefaultPart) -> Modifiers {
    let mut mods = Modifiers::default();
    let DefaultPart::Configured(config) = default else {
        return mods;
    };

    mods.battery_count = default.battery_count();
    mods.quantity = default.quantity();
    if let Some(mount) = config.mount {
        mods.mount = mount;
    }
    if let Some(fire_link) = config.fire_link.filter(|&n| n > 0) {
        mods.fire_link = fire_link;
    }
    if let Some(enhancement) = config.enhancement {
        mods.enhancement = enhancement;
    }
    mods.payload_count = config.payload_count.unwrap_or(0);
    mods.payload_option = config.payload_option;
    mods.fire_link_option = config.fire_link_option;
    mods.point_blank = config.point_blank;
    mods.weapon_user = config.weapon_user.clone().filter(|u| !u.is_empty());
    mods
}

impl Shipyard {
    /// Install a part. Unknown part ids are ignored and yield `None`.
    ///
    /// Any installed entry sharing the part's exclusive group is evicted
    /// first. A size mismatch is reported in the outcome but never blocks.
    pub fn install(
        &mut self,
        part_id: &str,
        location: impl Into<String>,
        non_standard: bool,
    ) -> Option<InstallOutcome> {
        let projection = self.projection();
        let Some(part) = projection.merged().part(part_id) else {
            debug!(part_id, "ignoring install of unknown part");
            return None;
        };

        let evicted: Vec<String> = match part.exclusive_group.as_deref() {
            Some(group) => projection
                .resolved_entries()
                .filter(|(_, other)| other.exclusive_group.as_deref() == Some(group))
                .map(|(entry, _)| entry.instance_id.clone())
                .collect(),
            None => Vec::new(),
        };
        let size = projection.size_check(part);
        let is_weapon = part.is_weapon();
        let def_id = part.id.clone();

        if !evicted.is_empty() {
            debug!(part_id, evicted = ?evicted, "evicting exclusive group occupant");
            self.config
                .entries
                .retain(|entry| !evicted.contains(&entry.instance_id));
        }
        if !size.is_compatible() {
            warn!(part_id, size = ?size, "part does not fit the selected chassis");
        }

        let mut modifiers = Modifiers::default();
        if is_weapon {
            modifiers.weapon_user = Some(DEFAULT_WEAPON_USER.to_string());
        }

        let instance_id = new_id();
        self.config.entries.push(InstalledEntry {
            instance_id: instance_id.clone(),
            def_id,
            location: location.into(),
            miniaturization: 0,
            is_stock: false,
            is_non_standard: non_standard,
            modifiers,
        });
        debug!(part_id, instance_id = %instance_id, "installed part");

        Some(InstallOutcome {
            instance_id,
            evicted,
            size,
        })
    }

    /// Remove an installed entry by instance id. Returns false when absent.
    pub fn remove(&mut self, instance_id: &str) -> bool {
        let before = self.config.entries.len();
        self.config.entries.retain(|entry| entry.instance_id != instance_id);
        let removed = self.config.entries.len() != before;
        if removed {
            debug!(instance_id, "removed entry");
        }
        removed
    }

    /// Start a new ship on `vehicle_id`: reset per-ship choices, select the
    /// chassis and install its default parts as stock entries.
    pub fn install_defaults(&mut self, vehicle_id: &str) {
        self.config.reset();
        self.config.chassis_id = vehicle_id.to_string();

        let projection = self.projection();
        let Some(vehicle) = projection.merged().vehicle(vehicle_id) else {
            debug!(vehicle_id, "selected unknown vehicle; no defaults installed");
            return;
        };

        let entries: Vec<InstalledEntry> = vehicle
            .default_mods
            .iter()
            .filter_map(|default| {
                let part = projection.merged().part(default.part_id())?;
                let mut modifiers = default_modifiers(default);
                if part.is_weapon() && modifiers.weapon_user.is_none() {
                    modifiers.weapon_user = Some(DEFAULT_WEAPON_USER.to_string());
                }
                Some(InstalledEntry {
                    instance_id: new_id(),
                    def_id: part.id.clone(),
                    location: part.location.clone().unwrap_or_default(),
                    miniaturization: 0,
                    is_stock: true,
                    is_non_standard: false,
                    modifiers,
                })
            })
            .collect();

        debug!(vehicle_id, defaults = entries.len(), "installed chassis defaults");
        self.config.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DefaultPartConfig;
    use crate::modifiers::Mount;

    #[test]
    fn configured_defaults_copy_their_values() {
        let default = DefaultPart::Configured(DefaultPartConfig {
            id: "gun".to_string(),
            quantity: Some(0),
            battery_count: Some(3),
            mount: Some(Mount::Twin),
            weapon_user: Some("Copilot".to_string()),
            ..DefaultPartConfig::default()
        });

        let mods = default_modifiers(&default);
        assert_eq!(mods.quantity, 1);
        assert_eq!(mods.battery_count, 3);
        assert_eq!(mods.mount, Mount::Twin);
        assert_eq!(mods.weapon_user.as_deref(), Some("Copilot"));
        assert_eq!(
            default_modifiers(&DefaultPart::Bare("gun".to_string())),
            Modifiers::default()
        );
    }
}
