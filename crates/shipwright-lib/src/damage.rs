//! Dice-notation damage formulas adjusted by weapon modifiers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::configuration::InstalledEntry;
use crate::modifiers::Modifiers;
use crate::projection::Projection;

static DICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)d(\d+)(x\d+)?").expect("dice pattern is valid"));

/// Parsed `<count>d<die>[x<mult>]` formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceFormula {
    pub count: i64,
    pub die: u32,
    /// Multiplier suffix including the leading `x`, or empty.
    pub multiplier: String,
}

impl DiceFormula {
    /// First dice formula found in `text`.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = DICE_PATTERN.captures(text)?;
        Some(Self {
            count: caps.get(1)?.as_str().parse().ok()?,
            die: caps.get(2)?.as_str().parse().ok()?,
            multiplier: caps.get(3).map_or_else(String::new, |m| m.as_str().to_string()),
        })
    }
}

impl std::fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}{}", self.count, self.die, self.multiplier)
    }
}

/// Extra dice granted by the modifiers of one entry.
pub fn dice_bonus(mods: &Modifiers) -> i64 {
    let fire_link = match mods.fire_link {
        2 => 1,
        4 => 2,
        _ => 0,
    };
    mods.enhancement.capacity_addend() + mods.mount.dice_bonus() + fire_link
}

/// Resolve a damage string; text that holds no dice formula comes back
/// unchanged.
pub fn resolve_damage(damage: &str, mods: &Modifiers, weapon_damage_dice: i64) -> String {
    match DiceFormula::parse(damage) {
        Some(mut formula) => {
            formula.count += dice_bonus(mods) + weapon_damage_dice;
            formula.to_string()
        }
        None => damage.to_string(),
    }
}

impl Projection<'_> {
    /// Adjusted damage of an installed entry, or `None` when its part has no
    /// damage formula.
    pub fn entry_damage(&self, entry: &InstalledEntry) -> Option<String> {
        let damage = self.part(entry)?.damage.as_deref()?;
        let dice = self.stats().weapon_damage_dice.unwrap_or(0.0) as i64;
        Some(resolve_damage(damage, &entry.modifiers, dice))
    }
}
