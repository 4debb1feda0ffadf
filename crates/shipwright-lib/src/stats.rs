//! Derived combat statistics and defenses.
//!
//! Aggregation folds every installed part's stat deltas into the chassis
//! baseline. Most deltas are accumulated on the side and folded in after the
//! pass; intelligence bonuses and the strength-scaled hit point bonus are the
//! exceptions, both of which see the running record mid-pass.

use serde::Serialize;

use crate::catalog::Stats;
use crate::projection::Projection;

#[derive(Debug, Default)]
struct Accumulated {
    shield_rating: Option<f64>,
    best_hyperdrive: Option<f64>,
    sr: f64,
    armor: f64,
    hp: f64,
    dex: f64,
    str: f64,
    perception: f64,
    speed_factor: f64,
    hyperdrive_shift: f64,
    hp_pct: f64,
    weapon_dice: f64,
}

fn nonzero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Aggregate statistics from a baseline, an optional template and the stat
/// deltas of installed parts in installation order.
pub fn aggregate_stats<'a>(
    baseline: &Stats,
    template: Option<&Stats>,
    parts: impl IntoIterator<Item = &'a Stats>,
) -> Stats {
    let mut s = baseline.clone();
    s.speed = Some(0.0);
    s.sr.get_or_insert(0.0);

    if let Some(template) = template {
        s.merge_additive(template);
    }

    let mut acc = Accumulated::default();
    for delta in parts {
        if let Some(sr) = delta.sr {
            acc.shield_rating = Some(sr);
        }
        if let Some(class) = delta.hyperdrive {
            if acc.best_hyperdrive.map_or(true, |best| class < best) {
                acc.best_hyperdrive = Some(class);
            }
        }
        if let Some(speed) = delta.speed {
            s.speed = Some(speed);
        }

        acc.sr += nonzero(delta.sr_bonus);
        acc.armor += nonzero(delta.armor_bonus);
        acc.dex += nonzero(delta.dex_bonus);
        if let Some(bonus) = delta.int_bonus.filter(|b| *b != 0.0) {
            s.intelligence = Some(s.intelligence.unwrap_or(0.0) + bonus);
        }
        acc.str += nonzero(delta.str_bonus);
        acc.perception += nonzero(delta.perception_bonus);
        acc.speed_factor += nonzero(delta.speed_factor);
        acc.hyperdrive_shift += nonzero(delta.hyperdrive_bonus);
        if delta.hp_dynamic_str {
            // Reads strength as it stands now, before strength bonuses fold in.
            let strength = s.strength.unwrap_or(0.0);
            acc.hp += ((strength / 2.0).floor() / 10.0).floor() * 10.0;
        }
        acc.hp_pct += nonzero(delta.hp_bonus_pct);
        acc.weapon_dice += nonzero(delta.weapon_damage_dice);
    }

    if let Some(sr) = acc.shield_rating {
        s.sr = Some(sr);
    }
    if let Some(class) = acc.best_hyperdrive {
        s.hyperdrive = Some(class);
    }

    s.sr = Some(s.sr.unwrap_or(0.0) + acc.sr);
    s.armor = Some(s.armor.unwrap_or(0.0) + acc.armor);
    s.hp = Some(s.hp.unwrap_or(0.0) + acc.hp);
    s.dexterity = Some((s.dexterity.unwrap_or(0.0) + acc.dex).max(0.0));
    s.strength = Some(s.strength.unwrap_or(0.0) + acc.str);
    s.perception_bonus = Some(acc.perception);

    if acc.hp_pct > 0.0 {
        let hp = s.hp.unwrap_or(0.0);
        s.hp = Some(hp + (hp * acc.hp_pct).floor());
    }

    let speed = s.speed.unwrap_or(0.0);
    if speed > 0.0 && acc.speed_factor > 0.0 {
        s.speed = Some(speed + (speed * acc.speed_factor).floor().max(1.0));
    }

    if let Some(class) = s.hyperdrive.filter(|c| *c != 0.0) {
        s.hyperdrive = Some(class + acc.hyperdrive_shift);
    }

    s.weapon_damage_dice = Some(s.weapon_damage_dice.unwrap_or(0.0) + acc.weapon_dice);
    s
}

/// Ability modifier of a score; a missing or zero score counts as 10.
pub fn ability_modifier(score: Option<f64>) -> f64 {
    let score = score.filter(|s| *s != 0.0).unwrap_or(10.0);
    ((score - 10.0) / 2.0).floor()
}

/// Defense values derived from aggregated statistics and chassis size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Defenses {
    pub fortitude: f64,
    pub reflex: f64,
    pub damage_threshold: f64,
}

impl Projection<'_> {
    /// Aggregated statistics of the current configuration.
    pub fn stats(&self) -> Stats {
        let parts = self.resolved_entries().filter_map(|(_, part)| part.stats.as_ref());
        aggregate_stats(
            &self.vehicle.stats,
            self.template.map(|t| &t.stats),
            parts,
        )
    }

    pub fn defenses(&self) -> Defenses {
        self.defenses_for(&self.stats())
    }

    /// Defenses for already aggregated statistics.
    pub fn defenses_for(&self, stats: &Stats) -> Defenses {
        let tables = self.tables();
        let fortitude = 10.0 + ability_modifier(stats.strength);
        let reflex = 10.0
            + ability_modifier(stats.dexterity)
            + stats.armor.unwrap_or(0.0)
            + tables.reflex_size_mod(&self.vehicle.size);

        Defenses {
            fortitude,
            reflex,
            damage_threshold: fortitude + tables.damage_threshold_size_mod(&self.vehicle.size),
        }
    }
}
