use tracing::debug;

use super::Shipyard;
use crate::catalog::{DefaultPart, DefaultPartConfig, PartDefinition, VehicleDefinition};
use crate::configuration::InstalledEntry;
use crate::library::{Direction, Library, LibraryData, LibraryPatch, DEFAULT_LIBRARY_NAME};
use crate::modifiers::{Enhancement, Mount, DEFAULT_WEAPON_USER};

/// Simplest default-part form reproducing an installed entry: a bare id
/// when every modifier is at its default.
fn capture_default(entry: &InstalledEntry) -> DefaultPart {
    let mods = &entry.modifiers;
    let config = DefaultPartConfig {
        id: entry.def_id.clone(),
        battery_count: (mods.battery_count > 1).then_some(mods.battery_count),
        quantity: (mods.quantity > 1).then_some(mods.quantity),
        mount: (mods.mount != Mount::Single).then_some(mods.mount),
        fire_link: (mods.fire_link > 1).then_some(mods.fire_link),
        enhancement: (mods.enhancement != Enhancement::Normal).then_some(mods.enhancement),
        payload_count: (mods.payload_count > 0).then_some(mods.payload_count),
        payload_option: mods.payload_option,
        fire_link_option: mods.fire_link_option,
        point_blank: mods.point_blank,
        weapon_user: mods
            .weapon_user
            .clone()
            .filter(|user| user != DEFAULT_WEAPON_USER),
    };

    if config == (DefaultPartConfig {
        id: entry.def_id.clone(),
        ..DefaultPartConfig::default()
    }) {
        DefaultPart::Bare(entry.def_id.clone())
    } else {
        DefaultPart::Configured(config)
    }
}

impl Shipyard {
    pub fn libraries(&self) -> &[Library] {
        &self.config.libraries
    }

    /// Append an empty, active, editable library; returns its id.
    pub fn add_library(&mut self, name: impl Into<String>) -> String {
        let library = Library::new(name);
        let id = library.id.clone();
        debug!(library_id = %id, name = %library.name, "adding library");
        self.config.libraries.push(library);
        id
    }

    pub fn remove_library(&mut self, library_id: &str) -> bool {
        let before = self.config.libraries.len();
        self.config.libraries.retain(|l| l.id != library_id);
        self.config.libraries.len() != before
    }

    /// Flip a library's active flag; returns the new state.
    pub fn toggle_library(&mut self, library_id: &str) -> Option<bool> {
        let library = self.config.library_mut(library_id)?;
        library.active = !library.active;
        debug!(library_id, active = library.active, "toggled library");
        Some(library.active)
    }

    /// Swap a library with its neighbour. Moving past either end is a no-op
    /// and returns false.
    pub fn move_library(&mut self, library_id: &str, direction: Direction) -> bool {
        let libraries = &mut self.config.libraries;
        let Some(idx) = libraries.iter().position(|l| l.id == library_id) else {
            return false;
        };
        let target = match direction {
            Direction::Up if idx > 0 => idx - 1,
            Direction::Down if idx + 1 < libraries.len() => idx + 1,
            _ => return false,
        };
        libraries.swap(idx, target);
        true
    }

    pub fn update_library(&mut self, library_id: &str, patch: LibraryPatch) -> bool {
        let Some(library) = self.config.library_mut(library_id) else {
            return false;
        };
        if let Some(name) = patch.name {
            library.name = name;
        }
        if let Some(active) = patch.active {
            library.active = active;
        }
        if let Some(editable) = patch.editable {
            library.editable = editable;
        }
        true
    }

    /// Append exchanged library content as a new library; returns its id.
    pub fn import_library(&mut self, data: LibraryData) -> String {
        let library = data.into_library();
        let id = library.id.clone();
        debug!(
            library_id = %id,
            components = library.components.len(),
            ships = library.ships.len(),
            "imported library"
        );
        self.config.libraries.push(library);
        id
    }

    /// Library that receives custom content: created as "User Library" when
    /// none exist, otherwise the first editable one, otherwise the first.
    pub fn editable_library_mut(&mut self) -> &mut Library {
        if self.config.libraries.is_empty() {
            self.config.libraries.push(Library::new(DEFAULT_LIBRARY_NAME));
        }
        let idx = self
            .config
            .libraries
            .iter()
            .position(|l| l.editable)
            .unwrap_or(0);
        &mut self.config.libraries[idx]
    }

    fn target_library(&mut self, library_id: Option<&str>) -> Option<&mut Library> {
        match library_id {
            Some(id) => self.config.library_mut(id),
            None => Some(self.editable_library_mut()),
        }
    }

    /// Add a custom part to the named library, or to the editable library.
    /// Returns false when the named library does not exist.
    pub fn add_custom_part(&mut self, part: PartDefinition, library_id: Option<&str>) -> bool {
        let Some(library) = self.target_library(library_id) else {
            return false;
        };
        debug!(part_id = %part.id, library_id = %library.id, "adding custom part");
        library.components.push(part);
        true
    }

    /// Replace a custom part in whichever library holds it, or add it to the
    /// editable library.
    pub fn update_custom_part(&mut self, part: PartDefinition) {
        for library in &mut self.config.libraries {
            if let Some(existing) = library.components.iter_mut().find(|c| c.id == part.id) {
                *existing = part;
                return;
            }
        }
        self.add_custom_part(part, None);
    }

    /// Remove a custom part from the first library holding it, together with
    /// installed entries that reference it.
    pub fn remove_custom_part(&mut self, part_id: &str) -> bool {
        let Some(library) = self
            .config
            .libraries
            .iter_mut()
            .find(|l| l.components.iter().any(|c| c.id == part_id))
        else {
            return false;
        };
        library.components.retain(|c| c.id != part_id);
        let purged = self.purge_entries(part_id);
        debug!(part_id, purged, "removed custom part");
        true
    }

    pub fn add_custom_vehicle(&mut self, vehicle: VehicleDefinition, library_id: Option<&str>) -> bool {
        let Some(library) = self.target_library(library_id) else {
            return false;
        };
        debug!(vehicle_id = %vehicle.id, library_id = %library.id, "adding custom vehicle");
        library.ships.push(vehicle);
        true
    }

    pub fn update_custom_vehicle(&mut self, vehicle: VehicleDefinition) {
        for library in &mut self.config.libraries {
            if let Some(existing) = library.ships.iter_mut().find(|s| s.id == vehicle.id) {
                *existing = vehicle;
                return;
            }
        }
        self.add_custom_vehicle(vehicle, None);
    }

    pub fn remove_custom_vehicle(&mut self, vehicle_id: &str) -> bool {
        let Some(library) = self
            .config
            .libraries
            .iter_mut()
            .find(|l| l.ships.iter().any(|s| s.id == vehicle_id))
        else {
            return false;
        };
        library.ships.retain(|s| s.id != vehicle_id);
        true
    }

    /// Whether any installed entry references `part_id`.
    pub fn is_part_installed(&self, part_id: &str) -> bool {
        self.config.entries.iter().any(|e| e.def_id == part_id)
    }

    /// Store the installed entries as the default parts of library vehicle
    /// `vehicle_id`. Returns false when no library holds that vehicle.
    pub fn capture_default_parts(&mut self, vehicle_id: &str) -> bool {
        let defaults: Vec<DefaultPart> = self.config.entries.iter().map(capture_default).collect();

        let Some(vehicle) = self
            .config
            .libraries
            .iter_mut()
            .flat_map(|l| l.ships.iter_mut())
            .find(|s| s.id == vehicle_id)
        else {
            return false;
        };
        debug!(vehicle_id, defaults = defaults.len(), "captured default parts");
        vehicle.default_mods = defaults;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::Modifiers;

    fn entry(mods: Modifiers) -> InstalledEntry {
        InstalledEntry {
            instance_id: "i".to_string(),
            def_id: "laser".to_string(),
            location: String::new(),
            miniaturization: 0,
            is_stock: true,
            is_non_standard: false,
            modifiers: mods,
        }
    }

    #[test]
    fn untouched_entries_capture_as_bare_ids() {
        let mods = Modifiers {
            weapon_user: Some(DEFAULT_WEAPON_USER.to_string()),
            ..Modifiers::default()
        };
        assert_eq!(
            capture_default(&entry(mods)),
            DefaultPart::Bare("laser".to_string())
        );
    }

    #[test]
    fn modified_entries_keep_only_changed_values() {
        let mods = Modifiers {
            quantity: 2,
            mount: Mount::Quad,
            weapon_user: Some("Gunner".to_string()),
            ..Modifiers::default()
        };
        match capture_default(&entry(mods)) {
            DefaultPart::Configured(config) => {
                assert_eq!(config.quantity, Some(2));
                assert_eq!(config.mount, Some(Mount::Quad));
                assert_eq!(config.battery_count, None);
                assert_eq!(config.weapon_user.as_deref(), Some("Gunner"));
            }
            other => panic!("expected configured default, got {other:?}"),
        }
    }

    #[test]
    fn editable_library_is_created_on_demand() {
        let mut yard = Shipyard::default();
        let id = yard.editable_library_mut().id.clone();
        assert_eq!(yard.libraries().len(), 1);
        assert_eq!(yard.libraries()[0].name, DEFAULT_LIBRARY_NAME);
        assert_eq!(yard.editable_library_mut().id, id);
    }
}
