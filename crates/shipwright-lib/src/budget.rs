//! Capacity budget (EP): the draw of each installed entry and the allowance
//! granted by the chassis, template and conversion knobs.

use serde::Serialize;

use crate::catalog::{DefaultPart, PartDefinition};
use crate::configuration::InstalledEntry;
use crate::modifiers::{Enhancement, Mount};
use crate::projection::Projection;

/// Modifier values that affect capacity draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityInput {
    pub enhancement: Enhancement,
    pub mount: Mount,
    pub fire_link: u32,
    pub battery_count: u32,
    pub quantity: u32,
    pub non_standard: bool,
    pub miniaturization: u8,
}

impl Default for CapacityInput {
    fn default() -> Self {
        Self {
            enhancement: Enhancement::Normal,
            mount: Mount::Single,
            fire_link: 1,
            battery_count: 1,
            quantity: 1,
            non_standard: false,
            miniaturization: 0,
        }
    }
}

impl CapacityInput {
    pub fn from_entry(entry: &InstalledEntry) -> Self {
        let mods = &entry.modifiers;
        Self {
            enhancement: mods.enhancement,
            mount: mods.mount,
            fire_link: mods.effective_fire_link(),
            battery_count: mods.effective_battery(),
            quantity: mods.effective_quantity(),
            non_standard: entry.is_non_standard,
            miniaturization: entry.miniaturization,
        }
    }

    /// Chassis defaults only contribute their battery and quantity to the
    /// stock allowance.
    pub fn from_default(default: &DefaultPart) -> Self {
        Self {
            battery_count: default.battery_count(),
            quantity: default.quantity(),
            ..Self::default()
        }
    }
}

/// Capacity drawn by one part.
///
/// A part declaring `ep_dynamic_pct` draws `floor(vehicle base EP × pct)`
/// instead of its own base EP (usually a negative value, i.e. a gain).
/// Non-standard doubling and miniaturization only apply to positive draws.
pub fn capacity_cost(part: &PartDefinition, input: &CapacityInput, vehicle_base_ep: i64) -> i64 {
    let mut ep = match part
        .stats
        .as_ref()
        .and_then(|s| s.ep_dynamic_pct)
        .filter(|p| *p != 0.0)
    {
        Some(pct) => (vehicle_base_ep as f64 * pct).floor() as i64,
        None => part.base_ep,
    };

    ep += input.enhancement.capacity_addend();
    ep += input.mount.capacity_addend();

    for factor in [input.fire_link, input.battery_count, input.quantity] {
        if factor > 1 {
            ep *= i64::from(factor);
        }
    }

    if input.non_standard && ep > 0 {
        ep *= 2;
    }

    if ep > 0 {
        match input.miniaturization {
            1 => ep = (ep - 1).max(1),
            2 => ep = (ep + 1) / 2,
            _ => {}
        }
    }

    ep
}

/// Capacity allowance and draw of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityBudget {
    pub base: i64,
    pub stock: i64,
    pub template: i64,
    pub cargo_conversion: i64,
    pub escape_conversion: i64,
    pub total: i64,
    pub used: i64,
    /// Negative when the configuration is over budget.
    pub remaining: i64,
    /// `used / total`; absent when the total is zero.
    pub usage_ratio: Option<f64>,
}

impl CapacityBudget {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0
    }
}

impl Projection<'_> {
    /// Capacity drawn by an installed entry; stock entries draw too.
    pub fn entry_capacity(&self, entry: &InstalledEntry) -> i64 {
        self.part(entry).map_or(0, |part| {
            capacity_cost(part, &CapacityInput::from_entry(entry), self.vehicle.base_ep)
        })
    }

    /// Allowance credited for the chassis default parts.
    pub fn stock_capacity(&self) -> i64 {
        self.vehicle
            .default_mods
            .iter()
            .filter_map(|default| {
                self.merged.part(default.part_id()).map(|part| {
                    capacity_cost(
                        part,
                        &CapacityInput::from_default(default),
                        self.vehicle.base_ep,
                    )
                })
            })
            .sum()
    }

    /// Budget gained by converting cargo, capped at the cargo capacity and
    /// divided by the size multiplier.
    pub fn cargo_conversion_capacity(&self) -> i64 {
        let converted = self.config.cargo_to_ep_amount.min(self.max_cargo_tons()).max(0.0);
        (converted / self.size_multiplier()).floor() as i64
    }

    /// One EP per ten percent of escape capacity given up, for eligible
    /// vehicles only.
    pub fn escape_conversion_capacity(&self) -> i64 {
        if self.vehicle.has_escape_capacity() {
            i64::from(self.config.escape_pods_to_ep_pct / 10)
        } else {
            0
        }
    }

    pub fn total_capacity(&self) -> i64 {
        self.vehicle.base_ep
            + self.stock_capacity()
            + self.template.map_or(0, |t| t.ep_mod)
            + self.cargo_conversion_capacity()
            + self.escape_conversion_capacity()
    }

    pub fn used_capacity(&self) -> i64 {
        self.config
            .entries
            .iter()
            .map(|entry| self.entry_capacity(entry))
            .sum()
    }

    pub fn remaining_capacity(&self) -> i64 {
        self.total_capacity() - self.used_capacity()
    }

    pub fn capacity_budget(&self) -> CapacityBudget {
        let base = self.vehicle.base_ep;
        let stock = self.stock_capacity();
        let template = self.template.map_or(0, |t| t.ep_mod);
        let cargo_conversion = self.cargo_conversion_capacity();
        let escape_conversion = self.escape_conversion_capacity();
        let total = base + stock + template + cargo_conversion + escape_conversion;
        let used = self.used_capacity();

        CapacityBudget {
            base,
            stock,
            template,
            cargo_conversion,
            escape_conversion,
            total,
            used,
            remaining: total - used,
            usage_ratio: (total != 0).then(|| used as f64 / total as f64),
        }
    }
}
