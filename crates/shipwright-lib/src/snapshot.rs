//! Version-tagged persisted form of a configuration.
//!
//! Export always writes the current layout (`apiVersion` "2.0"). Import also
//! accepts the older layouts: no `apiVersion`, a `templates` array instead of
//! a single `template`, entries without `modifications`, and a top-level
//! `customComponents` list from before libraries existed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Catalog, MergedCatalog, PartDefinition};
use crate::configuration::{Configuration, CrewQuality, InstalledEntry};
use crate::error::{Error, Result};
use crate::library::{Library, DEFAULT_LIBRARY_NAME};
use crate::modifiers::{Modifiers, DEFAULT_WEAPON_USER};

/// Version written on export.
pub const API_VERSION: &str = "2.0";
/// Major versions import understands.
pub const SUPPORTED_MAJOR_VERSIONS: &[&str] = &["1", "2"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub meta: SnapshotMeta,
    pub configuration: SnapshotConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub libraries: Option<Vec<Library>>,
    #[serde(default)]
    pub manifest: Vec<ManifestEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_components: Vec<PartDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotMeta {
    pub name: String,
    /// Chassis id, duplicated for listings.
    pub model: String,
    pub version: String,
    pub notes: String,
}

impl Default for SnapshotMeta {
    fn default() -> Self {
        Self {
            name: String::new(),
            model: String::new(),
            version: "1.0".to_string(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feats {
    #[serde(default)]
    pub starship_designer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotConfiguration {
    pub base_chassis: String,
    #[serde(default)]
    pub template: Option<String>,
    /// Older layout: list of templates, of which only the first applies.
    #[serde(default, skip_serializing)]
    pub templates: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub feats: Feats,
    #[serde(default)]
    pub cargo_to_ep_amount: Option<f64>,
    #[serde(default)]
    pub escape_pods_to_ep_pct: Option<f64>,
    #[serde(default)]
    pub crew_quality: Option<CrewQuality>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub id: String,
    pub def_id: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub miniaturization_rank: Option<u8>,
    #[serde(default)]
    pub is_stock: Option<bool>,
    #[serde(default)]
    pub is_non_standard: Option<bool>,
    #[serde(default)]
    pub modifications: Option<Modifiers>,
}

impl ManifestEntry {
    fn from_entry(entry: &InstalledEntry) -> Self {
        Self {
            id: entry.instance_id.clone(),
            def_id: entry.def_id.clone(),
            location: Some(entry.location.clone()),
            miniaturization_rank: Some(entry.miniaturization),
            is_stock: Some(entry.is_stock),
            is_non_standard: Some(entry.is_non_standard),
            modifications: Some(entry.modifiers.clone()),
        }
    }

    fn into_entry(self) -> InstalledEntry {
        let mut modifiers = self.modifications.unwrap_or_default();
        if modifiers.quantity == 0 {
            modifiers.quantity = 1;
        }
        let miniaturization = self.miniaturization_rank.filter(|&r| r <= 2).unwrap_or(0);

        InstalledEntry {
            instance_id: self.id,
            def_id: self.def_id,
            location: self.location.unwrap_or_default(),
            miniaturization,
            is_stock: self.is_stock.unwrap_or(false),
            is_non_standard: self.is_non_standard.unwrap_or(false),
            modifiers,
        }
    }
}

fn check_version(version: Option<&str>) -> Result<()> {
    let Some(version) = version else {
        return Ok(());
    };
    let major = version.split('.').next().unwrap_or_default().trim();
    if SUPPORTED_MAJOR_VERSIONS.contains(&major) {
        Ok(())
    } else {
        Err(Error::UnsupportedSnapshotVersion {
            version: version.to_string(),
            supported: SUPPORTED_MAJOR_VERSIONS.iter().map(|v| v.to_string()).collect(),
        })
    }
}

impl Snapshot {
    pub fn from_configuration(config: &Configuration) -> Self {
        Self {
            api_version: Some(API_VERSION.to_string()),
            meta: SnapshotMeta {
                name: config.name.clone(),
                model: config.chassis_id.clone(),
                ..SnapshotMeta::default()
            },
            configuration: SnapshotConfiguration {
                base_chassis: config.chassis_id.clone(),
                template: config.template_id.clone(),
                templates: None,
                feats: Feats {
                    starship_designer: config.engineering,
                },
                cargo_to_ep_amount: Some(config.cargo_to_ep_amount),
                escape_pods_to_ep_pct: Some(f64::from(config.escape_pods_to_ep_pct)),
                crew_quality: Some(config.crew_quality),
            },
            libraries: Some(config.libraries.clone()),
            manifest: config.entries.iter().map(ManifestEntry::from_entry).collect(),
            custom_components: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild a configuration against `catalog`.
    ///
    /// Documented defaults fill gaps (quantity, weapon user, missing flags);
    /// an unsupported version, an empty id or a duplicated instance id
    /// rejects the whole snapshot.
    pub fn into_configuration(self, catalog: &Catalog) -> Result<Configuration> {
        check_version(self.api_version.as_deref())?;

        let settings = self.configuration;
        let template_id = match settings.templates {
            Some(templates) => templates.into_iter().next().flatten(),
            None => settings.template,
        };

        let libraries = match self.libraries {
            Some(libraries) => libraries,
            None if !self.custom_components.is_empty() => {
                debug!(
                    components = self.custom_components.len(),
                    "migrating custom components into a library"
                );
                let mut library = Library::new(DEFAULT_LIBRARY_NAME);
                library.components = self.custom_components;
                vec![library]
            }
            None => Vec::new(),
        };

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.manifest.len());
        for item in self.manifest {
            if item.id.trim().is_empty() || item.def_id.trim().is_empty() {
                return Err(Error::InvalidSnapshot {
                    message: "manifest entry with an empty id or defId".to_string(),
                });
            }
            if !seen.insert(item.id.clone()) {
                return Err(Error::InvalidSnapshot {
                    message: format!("duplicate instance id '{}'", item.id),
                });
            }
            entries.push(item.into_entry());
        }

        let merged = MergedCatalog::merge(catalog, &libraries);
        for entry in &mut entries {
            match merged.part(&entry.def_id) {
                Some(part) if part.is_weapon() && entry.modifiers.weapon_user.is_none() => {
                    entry.modifiers.weapon_user = Some(DEFAULT_WEAPON_USER.to_string());
                }
                Some(_) => {}
                None => warn!(def_id = %entry.def_id, "imported entry references an unknown part"),
            }
        }

        let escape_pct = settings.escape_pods_to_ep_pct.unwrap_or(0.0);
        Ok(Configuration {
            name: self.meta.name,
            chassis_id: settings.base_chassis,
            template_id,
            entries,
            engineering: settings.feats.starship_designer,
            cargo_to_ep_amount: settings
                .cargo_to_ep_amount
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
                .max(0.0),
            escape_pods_to_ep_pct: if escape_pct.is_finite() {
                escape_pct.clamp(0.0, 100.0) as u32
            } else {
                0
            },
            crew_quality: settings.crew_quality.unwrap_or_default(),
            libraries,
        })
    }
}
