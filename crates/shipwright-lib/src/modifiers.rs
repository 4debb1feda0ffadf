//! Per-entry modifier record and the edits that can be applied to it.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

/// Weapon user assigned to newly installed weapons.
pub const DEFAULT_WEAPON_USER: &str = "Pilot";

/// Weapon mount arity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mount {
    #[default]
    Single,
    Twin,
    Quad,
}

impl Mount {
    /// Monetary cost multiplier.
    pub fn cost_multiplier(self) -> f64 {
        match self {
            Mount::Single => 1.0,
            Mount::Twin => 3.0,
            Mount::Quad => 5.0,
        }
    }

    /// Capacity added on top of the part's base draw.
    pub fn capacity_addend(self) -> i64 {
        match self {
            Mount::Quad => 1,
            Mount::Single | Mount::Twin => 0,
        }
    }

    /// Extra damage dice.
    pub fn dice_bonus(self) -> i64 {
        match self {
            Mount::Single => 0,
            Mount::Twin => 1,
            Mount::Quad => 2,
        }
    }
}

/// Enhancement tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enhancement {
    #[default]
    Normal,
    Enhanced,
    Advanced,
}

impl Enhancement {
    pub fn cost_multiplier(self) -> f64 {
        match self {
            Enhancement::Normal => 1.0,
            Enhancement::Enhanced => 2.0,
            Enhancement::Advanced => 5.0,
        }
    }

    /// Capacity added on top of the part's base draw; doubles as the extra
    /// damage dice granted by the tier.
    pub fn capacity_addend(self) -> i64 {
        match self {
            Enhancement::Normal => 0,
            Enhancement::Enhanced => 1,
            Enhancement::Advanced => 2,
        }
    }
}

fn one() -> u32 {
    1
}

fn is_one(n: &u32) -> bool {
    *n == 1
}

/// Wire names of the non-boolean typed fields. They can never be option
/// flags, or the flattened map would repeat them on export.
const TYPED_KEYS: &[&str] = &[
    "payloadCount",
    "batteryCount",
    "quantity",
    "mount",
    "fireLink",
    "enhancement",
    "weaponUser",
];

fn is_typed_key(key: &str) -> bool {
    TYPED_KEYS.contains(&key)
}

/// Keeps boolean extras and drops anything else with a warning.
fn lenient_flags<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::Bool(enabled) => Some((key, enabled)),
            other => {
                warn!(key = %key, value = %other, "dropping non-boolean modifier option");
                None
            }
        })
        .collect())
}

fn serialize_flags<S>(flags: &BTreeMap<String, bool>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(None)?;
    for (key, enabled) in flags.iter().filter(|(key, _)| !is_typed_key(key)) {
        map.serialize_entry(key, enabled)?;
    }
    map.end()
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Modifier values of one installed entry.
///
/// The well-known knobs are typed fields; catalog-defined ad hoc options are
/// plain boolean flags in `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    /// Additional capacity units bought on a capacity-style payload.
    #[serde(default)]
    pub payload_count: u32,
    /// Toggle-style payload option.
    #[serde(default)]
    pub payload_option: bool,
    #[serde(default = "one")]
    pub battery_count: u32,
    #[serde(default = "one")]
    pub quantity: u32,
    /// Selective-fire option on fire-linked weapons.
    #[serde(default)]
    pub fire_link_option: bool,
    #[serde(default, skip_serializing_if = "is_default")]
    pub mount: Mount,
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub fire_link: u32,
    #[serde(default, skip_serializing_if = "is_default")]
    pub enhancement: Enhancement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_user: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub point_blank: bool,
    #[serde(
        flatten,
        deserialize_with = "lenient_flags",
        serialize_with = "serialize_flags"
    )]
    pub options: BTreeMap<String, bool>,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            payload_count: 0,
            payload_option: false,
            battery_count: 1,
            quantity: 1,
            fire_link_option: false,
            mount: Mount::Single,
            fire_link: 1,
            enhancement: Enhancement::Normal,
            weapon_user: None,
            point_blank: false,
            options: BTreeMap::new(),
        }
    }
}

impl Modifiers {
    /// Names of the boolean option flags that are switched on, excluding the
    /// payload toggle and the selective-fire option (both priced separately).
    pub fn enabled_flags(&self) -> impl Iterator<Item = &str> {
        let point_blank = self.point_blank.then_some("pointBlank");
        point_blank.into_iter().chain(
            self.options
                .iter()
                .filter(|(_, enabled)| **enabled)
                .map(|(key, _)| key.as_str()),
        )
    }

    /// Whether the flag with the given wire name is switched on.
    pub fn flag(&self, key: &str) -> bool {
        match key {
            "payloadOption" => self.payload_option,
            "fireLinkOption" => self.fire_link_option,
            "pointBlank" => self.point_blank,
            other => self.options.get(other).copied().unwrap_or(false),
        }
    }

    /// Switch a flag by wire name; well-known names land on their typed field.
    ///
    /// Returns false, leaving the record untouched, when the name belongs to
    /// a non-boolean field such as `quantity`.
    pub fn set_flag(&mut self, key: &str, enabled: bool) -> bool {
        match key {
            "payloadOption" => self.payload_option = enabled,
            "fireLinkOption" => self.fire_link_option = enabled,
            "pointBlank" => self.point_blank = enabled,
            other if is_typed_key(other) => return false,
            other => {
                self.options.insert(other.to_string(), enabled);
            }
        }
        true
    }

    /// Battery multiplicity, treating 0 as 1.
    pub fn effective_battery(&self) -> u32 {
        self.battery_count.max(1)
    }

    /// Quantity, treating 0 as 1.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }

    /// Fire-link multiplicity, treating 0 as 1.
    pub fn effective_fire_link(&self) -> u32 {
        self.fire_link.max(1)
    }
}

/// One edit to an installed entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ModifierChange {
    PayloadCount(u32),
    PayloadOption(bool),
    BatteryCount(u32),
    Quantity(u32),
    /// Setting a multiplicity above 1 also resets the battery count to 1 and,
    /// on capacity-payload parts, enables the selective-fire option.
    FireLink(u32),
    FireLinkOption(bool),
    Mount(Mount),
    Enhancement(Enhancement),
    WeaponUser(Option<String>),
    PointBlank(bool),
    /// Catalog-defined ad hoc option flag.
    Option { key: String, enabled: bool },
    Miniaturization(u8),
    NonStandard(bool),
    Location(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let mods: Modifiers = serde_json::from_str("{}").expect("empty object parses");
        assert_eq!(mods, Modifiers::default());
    }

    #[test]
    fn unknown_boolean_keys_become_options() {
        let mods: Modifiers =
            serde_json::from_str(r#"{"quantity":2,"mount":"twin","autofire":true,"slave":false}"#)
                .expect("parses");
        assert_eq!(mods.quantity, 2);
        assert_eq!(mods.mount, Mount::Twin);
        assert!(mods.flag("autofire"));
        assert!(!mods.flag("slave"));
        let enabled: Vec<&str> = mods.enabled_flags().collect();
        assert_eq!(enabled, vec!["autofire"]);
    }

    #[test]
    fn non_boolean_extras_are_dropped() {
        let mods: Modifiers =
            serde_json::from_str(r#"{"quantity":3,"note":"spare","rank":2,"autofire":true}"#)
                .expect("parses");
        assert_eq!(mods.quantity, 3);
        assert_eq!(mods.options.len(), 1);
        assert!(mods.flag("autofire"));
    }

    #[test]
    fn typed_field_names_are_not_flags() {
        let mut mods = Modifiers::default();
        assert!(!mods.set_flag("quantity", true));
        assert!(!mods.set_flag("mount", false));
        assert!(mods.set_flag("autofire", true));
        assert!(mods.options.get("quantity").is_none());
        assert_eq!(mods.quantity, 1);
    }

    #[test]
    fn typed_field_names_in_options_are_not_serialized() {
        let mut mods = Modifiers::default();
        mods.options.insert("quantity".to_string(), true);
        mods.options.insert("autofire".to_string(), true);
        let json = serde_json::to_value(&mods).expect("serializes");
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["autofire"], true);
        let back: Modifiers = serde_json::from_value(json).expect("parses back");
        assert_eq!(back.quantity, 1);
        assert!(back.flag("autofire"));
    }

    #[test]
    fn enabled_flags_skip_payload_and_selective_fire() {
        let mods = Modifiers {
            payload_option: true,
            fire_link_option: true,
            point_blank: true,
            ..Modifiers::default()
        };
        let enabled: Vec<&str> = mods.enabled_flags().collect();
        assert_eq!(enabled, vec!["pointBlank"]);
    }
}
