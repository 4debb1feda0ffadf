//! Catalog record types: parts, vehicles, templates and their stat blocks.
//!
//! Wire names follow the camelCase JSON used by catalog files and saved
//! snapshots. Unknown keys are kept in `extra` maps so that library content
//! survives an import/export round trip untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Category label that marks a part as a weapon.
pub const WEAPON_CATEGORY: &str = "Weapon Systems";
/// Parts that are treated as weapons regardless of category.
pub const WEAPON_LIKE_PARTS: &[&str] = &["sensor_decoy"];
/// Group label that marks a part as a sublight engine.
pub const ENGINE_GROUP: &str = "Sublight Drives";

/// Statistic record shared by vehicles (baseline values), templates and parts
/// (deltas). The same record type carries the aggregated result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Shield rating ("set" semantics on parts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sr: Option<f64>,
    /// Speed ("set" semantics on parts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Hyperdrive class; lower is better.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperdrive: Option<f64>,
    #[serde(rename = "str", default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(rename = "dex", default, skip_serializing_if = "Option::is_none")]
    pub dexterity: Option<f64>,
    #[serde(rename = "int", default, skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perception_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_damage_dice: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sr_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dex_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub str_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperdrive_bonus: Option<f64>,
    /// Grants hit points derived from the running strength value.
    #[serde(
        default,
        deserialize_with = "truthy",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub hp_dynamic_str: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp_bonus_pct: Option<f64>,

    /// Capacity draw as a fraction of the vehicle's base budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ep_dynamic_pct: Option<f64>,
    /// Extra monetary cost as a fraction of hull cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_dynamic_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_bonus_size_mult: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Stats {
    /// Merge `other` into `self`: numeric fields present on both sides are
    /// added, fields only present in `other` are set.
    pub fn merge_additive(&mut self, other: &Stats) {
        fn add_or_set(target: &mut Option<f64>, delta: Option<f64>) {
            if let Some(delta) = delta {
                *target = Some(target.map_or(delta, |current| current + delta));
            }
        }

        add_or_set(&mut self.sr, other.sr);
        add_or_set(&mut self.speed, other.speed);
        add_or_set(&mut self.hyperdrive, other.hyperdrive);
        add_or_set(&mut self.strength, other.strength);
        add_or_set(&mut self.dexterity, other.dexterity);
        add_or_set(&mut self.intelligence, other.intelligence);
        add_or_set(&mut self.hp, other.hp);
        add_or_set(&mut self.armor, other.armor);
        add_or_set(&mut self.perception_bonus, other.perception_bonus);
        add_or_set(&mut self.weapon_damage_dice, other.weapon_damage_dice);
        add_or_set(&mut self.sr_bonus, other.sr_bonus);
        add_or_set(&mut self.armor_bonus, other.armor_bonus);
        add_or_set(&mut self.dex_bonus, other.dex_bonus);
        add_or_set(&mut self.int_bonus, other.int_bonus);
        add_or_set(&mut self.str_bonus, other.str_bonus);
        add_or_set(&mut self.speed_factor, other.speed_factor);
        add_or_set(&mut self.hyperdrive_bonus, other.hyperdrive_bonus);
        add_or_set(&mut self.hp_bonus_pct, other.hp_bonus_pct);
        add_or_set(&mut self.ep_dynamic_pct, other.ep_dynamic_pct);
        add_or_set(&mut self.cost_dynamic_pct, other.cost_dynamic_pct);
        add_or_set(&mut self.cargo_factor, other.cargo_factor);
        add_or_set(&mut self.cargo_bonus_size_mult, other.cargo_bonus_size_mult);
        self.hp_dynamic_str |= other.hp_dynamic_str;

        for (key, value) in &other.extra {
            let merged = match (self.extra.get(key).and_then(Value::as_f64), value.as_f64()) {
                (Some(current), Some(delta)) => Value::from(current + delta),
                _ => value.clone(),
            };
            self.extra.insert(key.clone(), merged);
        }
    }
}

/// Accept `true`/`false` or a number (non-zero means set).
fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
        Null(()),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Number(value) => value != 0.0,
        Flag::Null(()) => false,
    })
}

/// How a payload upgrade is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    /// Priced per additional unit as a fraction of base cost.
    Capacity,
    /// A single on/off option with a flat price.
    Toggle,
}

/// Payload ("capacity unit") upgrade description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadSpec {
    #[serde(rename = "type")]
    pub kind: PayloadKind,
    #[serde(default)]
    pub cost_factor: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Detailed option price: a multiplier of base cost, or a flat cost that may
/// scale with vehicle size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCostDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub size_mult: bool,
    /// Availability level the option raises its entry to when enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

/// Price of a boolean option, either as a flat number or a detailed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionCost {
    Flat(f64),
    Detailed(OptionCostDetail),
}

impl OptionCost {
    /// Availability level carried by a detailed option price.
    pub fn availability(&self) -> Option<&str> {
        match self {
            OptionCost::Flat(_) => None,
            OptionCost::Detailed(detail) => detail.availability.as_deref(),
        }
    }
}

/// Modifier knobs a part supports and what they cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<PayloadSpec>,
    /// Per-part option price overrides, keyed by option name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub option_costs: BTreeMap<String, OptionCost>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component_options: Vec<String>,
    /// Legacy per-option objects (e.g. `{ "fireLinkOption": { "cost": 500 } }`)
    /// and capability constraints.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl UpgradeSpecs {
    /// Price declared by a legacy `{ "<option>": { "cost": ... } }` object.
    pub fn legacy_option_cost(&self, key: &str) -> Option<OptionCost> {
        let cost = self.extra.get(key)?.as_object()?.get("cost")?;
        serde_json::from_value(cost.clone()).ok()
    }
}

/// Installable part (catalog entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub base_cost: f64,
    #[serde(default)]
    pub base_ep: i64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub size_mult: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ship_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ship_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_specs: Option<UpgradeSpecs>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PartDefinition {
    /// Minimal part with the given id and name; everything else defaulted.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            group: String::new(),
            base_cost: 0.0,
            base_ep: 0,
            size_mult: false,
            exclusive_group: None,
            min_ship_size: None,
            min_size: None,
            max_ship_size: None,
            max_size: None,
            availability: None,
            location: None,
            stats: None,
            damage: None,
            upgrade_specs: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn is_weapon(&self) -> bool {
        self.category == WEAPON_CATEGORY || WEAPON_LIKE_PARTS.contains(&self.id.as_str())
    }

    pub fn is_engine(&self) -> bool {
        self.group == ENGINE_GROUP && self.stats.as_ref().is_some_and(|s| s.speed.is_some())
    }

    /// Largest vehicle size this part fits; `maxShipSize` wins over `maxSize`.
    pub fn max_size_bound(&self) -> Option<&str> {
        self.max_ship_size
            .as_deref()
            .or(self.max_size.as_deref())
    }

    /// Smallest vehicle size this part fits; `minShipSize` wins over `minSize`.
    pub fn min_size_bound(&self) -> Option<&str> {
        self.min_ship_size
            .as_deref()
            .or(self.min_size.as_deref())
    }

    pub fn payload(&self) -> Option<&PayloadSpec> {
        self.upgrade_specs.as_ref()?.payload.as_ref()
    }

    pub fn has_capacity_payload(&self) -> bool {
        self.payload()
            .is_some_and(|payload| payload.kind == PayloadKind::Capacity)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::CatalogValidation {
                message: format!("part '{}' has an empty id", self.name),
            });
        }
        if !self.base_cost.is_finite() || self.base_cost < 0.0 {
            return Err(Error::CatalogValidation {
                message: format!(
                    "baseCost of part '{}' must be finite and non-negative",
                    self.id
                ),
            });
        }
        Ok(())
    }
}

/// Baseline crew, passenger, cargo and consumables values of a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logistics {
    #[serde(default)]
    pub crew: u32,
    #[serde(rename = "pass", default)]
    pub passengers: u32,
    /// Free text such as `"100 tons"` or `"450 kg"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo: Option<String>,
    /// Free text such as `"2 months"` or `"1 year 3 days"`.
    #[serde(rename = "cons", default, skip_serializing_if = "Option::is_none")]
    pub consumables: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Initial modifier values of a chassis default part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultPartConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount: Option<crate::modifiers::Mount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_link: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement: Option<crate::modifiers::Enhancement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_count: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub payload_option: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fire_link_option: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub point_blank: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_user: Option<String>,
}

/// A chassis default part: a bare part id or an object with initial values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultPart {
    Bare(String),
    Configured(DefaultPartConfig),
}

impl DefaultPart {
    pub fn part_id(&self) -> &str {
        match self {
            DefaultPart::Bare(id) => id,
            DefaultPart::Configured(config) => &config.id,
        }
    }

    /// Battery multiplicity declared by the default (1 when absent or zero).
    pub fn battery_count(&self) -> u32 {
        match self {
            DefaultPart::Configured(config) => config.battery_count.filter(|&n| n > 0).unwrap_or(1),
            DefaultPart::Bare(_) => 1,
        }
    }

    /// Quantity declared by the default (1 when absent or zero).
    pub fn quantity(&self) -> u32 {
        match self {
            DefaultPart::Configured(config) => config.quantity.filter(|&n| n > 0).unwrap_or(1),
            DefaultPart::Bare(_) => 1,
        }
    }
}

/// Base platform being configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub base_ep: i64,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub logistics: Logistics,
    #[serde(default, alias = "defaultParts", skip_serializing_if = "Vec::is_empty")]
    pub default_mods: Vec<DefaultPart>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl VehicleDefinition {
    /// Placeholder used when the catalog holds no vehicles at all.
    pub(crate) fn fallback() -> Self {
        Self {
            size: "Huge".to_string(),
            ..Self::default()
        }
    }

    /// Vehicles whose size label begins with "Colossal" may trade escape
    /// capacity for budget.
    pub fn has_escape_capacity(&self) -> bool {
        self.size.starts_with("Colossal")
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::CatalogValidation {
                message: format!("vehicle '{}' has an empty id", self.name),
            });
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(Error::CatalogValidation {
                message: format!("cost of vehicle '{}' must be finite and non-negative", self.id),
            });
        }
        Ok(())
    }
}

/// Configuration template applied on top of a chassis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "one")]
    pub cost_mult: f64,
    #[serde(default)]
    pub ep_mod: i64,
    #[serde(default)]
    pub stats: Stats,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn one() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hp_dynamic_str_accepts_bool_and_number() {
        let a: Stats = serde_json::from_str(r#"{"hp_dynamic_str": true}"#).expect("bool");
        let b: Stats = serde_json::from_str(r#"{"hp_dynamic_str": 1}"#).expect("number");
        let c: Stats = serde_json::from_str(r#"{"hp_dynamic_str": 0}"#).expect("zero");
        assert!(a.hp_dynamic_str);
        assert!(b.hp_dynamic_str);
        assert!(!c.hp_dynamic_str);
    }

    #[test]
    fn max_ship_size_wins_over_legacy_max_size() {
        let part: PartDefinition = serde_json::from_str(
            r#"{"id":"p","maxSize":"Huge","maxShipSize":"Gargantuan","minSize":"Small"}"#,
        )
        .expect("part parses");
        assert_eq!(part.max_size_bound(), Some("Gargantuan"));
        assert_eq!(part.min_size_bound(), Some("Small"));
    }

    #[test]
    fn legacy_option_cost_reads_nested_cost() {
        let specs: UpgradeSpecs =
            serde_json::from_str(r#"{"fireLinkOption":{"cost":{"cost":500,"sizeMult":true}}}"#)
                .expect("specs parse");
        let cost = specs.legacy_option_cost("fireLinkOption").expect("legacy cost");
        assert_eq!(
            cost,
            OptionCost::Detailed(OptionCostDetail {
                cost: Some(500.0),
                size_mult: true,
                ..OptionCostDetail::default()
            })
        );
        assert!(specs.legacy_option_cost("missing").is_none());
    }

    #[test]
    fn default_part_forms_parse() {
        let parts: Vec<DefaultPart> =
            serde_json::from_str(r#"["laser", {"id":"missiles","quantity":2}]"#).expect("parse");
        assert_eq!(parts[0].part_id(), "laser");
        assert_eq!(parts[1].part_id(), "missiles");
        assert_eq!(parts[1].quantity(), 2);
        assert_eq!(parts[1].battery_count(), 1);
    }
}
