//! Lookup tables supplied with the bulk catalog load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::OptionCost;

/// Damage threshold offsets used when the catalog does not provide its own.
pub const DEFAULT_DAMAGE_THRESHOLD_SIZE_MODS: &[(&str, f64)] = &[
    ("Fine", -10.0),
    ("Diminutive", -5.0),
    ("Tiny", -2.0),
    ("Small", -1.0),
    ("Medium", 0.0),
    ("Large", 5.0),
    ("Huge", 10.0),
    ("Gargantuan", 20.0),
    ("Colossal", 50.0),
    ("Colossal (Frigate)", 100.0),
    ("Colossal (Cruiser)", 200.0),
    ("Colossal (Station)", 500.0),
];

/// Availability level that escape-capacity conversion requires.
pub const MILITARY_AVAILABILITY: &str = "Military";
/// Availability reported for configurations that break the escape rule.
pub const ILLEGAL_AVAILABILITY: &str = "Illegal";

/// Size, cost, fee and availability tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTables {
    /// Total order over size classes, smallest first.
    #[serde(default, alias = "SIZE_RANK")]
    pub size_rank: Vec<String>,
    #[serde(default, alias = "SIZE_COST_MULTIPLIERS")]
    pub size_cost_multipliers: BTreeMap<String, f64>,
    /// Licensing fee rate per availability level.
    #[serde(default, alias = "LICENSE_FEES")]
    pub license_fees: BTreeMap<String, f64>,
    /// Availability levels, least restricted first.
    #[serde(default, alias = "AVAILABILITY_RANK")]
    pub availability_rank: Vec<String>,
    #[serde(default, alias = "REFLEX_SIZE_MODS")]
    pub reflex_size_mods: BTreeMap<String, f64>,
    #[serde(
        default,
        alias = "DT_SIZE_MODS",
        skip_serializing_if = "Option::is_none"
    )]
    pub damage_threshold_size_mods: Option<BTreeMap<String, f64>>,
    /// Catalog-wide option prices used when a part declares none.
    #[serde(default, alias = "DEFAULT_OPTION_COSTS")]
    pub default_option_costs: BTreeMap<String, OptionCost>,
}

impl CatalogTables {
    /// Position of a size label in the size order.
    pub fn size_rank(&self, size: &str) -> Option<usize> {
        self.size_rank.iter().position(|s| s == size)
    }

    /// Cost multiplier for a vehicle size (1 when the size is not listed).
    pub fn size_multiplier(&self, size: &str) -> f64 {
        self.size_cost_multipliers
            .get(size)
            .copied()
            .filter(|m| *m != 0.0)
            .unwrap_or(1.0)
    }

    /// Licensing fee rate for an availability level (0 when not listed).
    pub fn fee_rate(&self, availability: &str) -> f64 {
        self.license_fees.get(availability).copied().unwrap_or(0.0)
    }

    pub fn availability_rank(&self, availability: &str) -> Option<usize> {
        self.availability_rank.iter().position(|a| a == availability)
    }

    pub fn reflex_size_mod(&self, size: &str) -> f64 {
        self.reflex_size_mods.get(size).copied().unwrap_or(0.0)
    }

    /// Damage threshold offset for a size label.
    ///
    /// Compound labels that start with "Colossal" but are not listed verbatim
    /// fall back to the frigate, cruiser or station row by substring, and to
    /// plain "Colossal" otherwise.
    pub fn damage_threshold_size_mod(&self, size: &str) -> f64 {
        let lookup = |key: &str| -> Option<f64> {
            match &self.damage_threshold_size_mods {
                Some(table) => table.get(key).copied(),
                None => DEFAULT_DAMAGE_THRESHOLD_SIZE_MODS
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| *v),
            }
        };

        // A zero offset counts as "not found" so that compound labels still
        // reach their fallback row.
        if let Some(offset) = lookup(size).filter(|v| *v != 0.0) {
            return offset;
        }

        let key = if size.starts_with("Colossal") {
            if size.contains("Frigate") {
                "Colossal (Frigate)"
            } else if size.contains("Cruiser") {
                "Colossal (Cruiser)"
            } else if size.contains("Station") {
                "Colossal (Station)"
            } else {
                "Colossal"
            }
        } else {
            size
        };
        lookup(key).unwrap_or(0.0)
    }

    pub fn default_option_cost(&self, key: &str) -> Option<&OptionCost> {
        self.default_option_costs.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_threshold_falls_back_for_compound_colossal_labels() {
        let tables = CatalogTables::default();
        assert_eq!(tables.damage_threshold_size_mod("Huge"), 10.0);
        assert_eq!(tables.damage_threshold_size_mod("Colossal (Frigate)"), 100.0);
        assert_eq!(tables.damage_threshold_size_mod("Colossal Heavy Cruiser"), 200.0);
        assert_eq!(tables.damage_threshold_size_mod("Colossal Space Station"), 500.0);
        assert_eq!(tables.damage_threshold_size_mod("Colossal Thing"), 50.0);
        assert_eq!(tables.damage_threshold_size_mod("Unknown"), 0.0);
    }

    #[test]
    fn size_multiplier_defaults_to_one() {
        let mut tables = CatalogTables::default();
        tables
            .size_cost_multipliers
            .insert("Gargantuan".to_string(), 5.0);
        assert_eq!(tables.size_multiplier("Gargantuan"), 5.0);
        assert_eq!(tables.size_multiplier("Huge"), 1.0);
    }
}
