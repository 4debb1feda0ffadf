//! Monetary cost ledger: per-entry installation cost, hull cost, licensing
//! fees and the grand total.

use serde::Serialize;

use crate::catalog::{CatalogTables, PartDefinition, PayloadKind};
use crate::configuration::InstalledEntry;
use crate::options::option_cost;
use crate::projection::Projection;

/// Inputs the cost pipeline needs besides the part and the entry.
#[derive(Debug, Clone, Copy)]
pub struct CostContext<'a> {
    pub tables: &'a CatalogTables,
    /// Cost multiplier of the chassis size.
    pub size_multiplier: f64,
    /// Hull cost, for parts priced as a share of it.
    pub hull_cost: f64,
}

/// Hull cost: `floor(vehicle cost × template cost multiplier)`.
pub fn hull_cost(vehicle_cost: f64, template_cost_mult: f64) -> f64 {
    (vehicle_cost * template_cost_mult).floor()
}

/// Installation cost of one entry.
///
/// Stock entries cost nothing. Otherwise the steps run in this order, each
/// working on the running total unless stated:
///
/// 1. base cost, times the size multiplier for size-scaled parts
/// 2. plus `floor(hull cost × cost_dynamic_pct)`
/// 3. enhancement (×2 enhanced, ×5 advanced)
/// 4. mount (×3 twin, ×5 quad)
/// 5. fire-link multiplicity when above 1
/// 6. payload: `count × base cost × cost factor` (unmodified base) for
///    capacity payloads, or the flat toggle cost
/// 7. selective-fire option priced against the running total, then every
///    other enabled flag priced against the unmodified base cost
/// 8. battery multiplicity, 9. quantity
/// 10. miniaturization (×2 rank 1, ×5 rank 2), 11. non-standard (×5)
pub fn installation_cost(part: &PartDefinition, entry: &InstalledEntry, ctx: &CostContext) -> f64 {
    if entry.is_stock {
        return 0.0;
    }
    let mods = &entry.modifiers;

    let mut cost = part.base_cost;
    if part.size_mult {
        cost *= ctx.size_multiplier;
    }

    if let Some(pct) = part
        .stats
        .as_ref()
        .and_then(|s| s.cost_dynamic_pct)
        .filter(|p| *p != 0.0)
    {
        cost += (ctx.hull_cost * pct).floor();
    }

    cost *= mods.enhancement.cost_multiplier();
    cost *= mods.mount.cost_multiplier();

    if mods.fire_link > 1 {
        cost *= f64::from(mods.fire_link);
    }

    if let Some(payload) = part.payload() {
        match payload.kind {
            PayloadKind::Capacity if mods.payload_count > 0 => {
                cost += f64::from(mods.payload_count) * (part.base_cost * payload.cost_factor);
            }
            PayloadKind::Toggle if mods.payload_option => {
                cost += payload.cost;
            }
            _ => {}
        }
    }

    if mods.fire_link_option {
        cost += option_cost(
            part,
            "fireLinkOption",
            cost,
            ctx.tables,
            ctx.size_multiplier,
        );
    }

    for key in mods.enabled_flags() {
        let added = option_cost(part, key, part.base_cost, ctx.tables, ctx.size_multiplier);
        if added > 0.0 {
            cost += added;
        }
    }

    if mods.battery_count > 1 {
        cost *= f64::from(mods.battery_count);
    }
    if mods.quantity > 1 {
        cost *= f64::from(mods.quantity);
    }

    match entry.miniaturization {
        1 => cost *= 2.0,
        2 => cost *= 5.0,
        _ => {}
    }

    if entry.is_non_standard {
        cost *= 5.0;
    }

    cost
}

/// Cost of one installed entry, as shown in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerLine {
    pub instance_id: String,
    pub def_id: String,
    pub cost: f64,
    pub licensing_fee: f64,
}

/// Monetary totals of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostLedger {
    pub hull_cost: f64,
    pub components_cost: f64,
    pub licensing_cost: f64,
    pub total_cost: f64,
    pub lines: Vec<LedgerLine>,
}

impl Projection<'_> {
    /// `floor(chassis cost × template cost multiplier)`; the multiplier is 1
    /// without a template.
    pub fn hull_cost(&self) -> f64 {
        let mult = self.template.map_or(1.0, |t| t.cost_mult);
        hull_cost(self.vehicle.cost, mult)
    }

    fn cost_context(&self) -> CostContext<'_> {
        CostContext {
            tables: self.tables(),
            size_multiplier: self.size_multiplier(),
            hull_cost: self.hull_cost(),
        }
    }

    /// Installation cost of an entry; unresolved and stock entries cost 0.
    pub fn entry_cost(&self, entry: &InstalledEntry) -> f64 {
        match self.part(entry) {
            Some(part) => installation_cost(part, entry, &self.cost_context()),
            None => 0.0,
        }
    }

    /// Licensing fee of an entry: its cost times the fee rate of the part's
    /// declared availability. Stock entries and parts without an
    /// availability pay nothing.
    pub fn licensing_fee(&self, entry: &InstalledEntry) -> f64 {
        if entry.is_stock {
            return 0.0;
        }
        let Some(part) = self.part(entry) else {
            return 0.0;
        };
        let Some(availability) = part.availability.as_deref() else {
            return 0.0;
        };
        installation_cost(part, entry, &self.cost_context()) * self.tables().fee_rate(availability)
    }

    /// Hull cost, component costs, licensing fees and the grand total.
    pub fn cost_ledger(&self) -> CostLedger {
        let ctx = self.cost_context();
        let mut lines = Vec::with_capacity(self.config.entries.len());

        for entry in &self.config.entries {
            let (cost, licensing_fee) = match self.part(entry) {
                Some(part) => {
                    let cost = installation_cost(part, entry, &ctx);
                    let rate = match (entry.is_stock, part.availability.as_deref()) {
                        (false, Some(availability)) => self.tables().fee_rate(availability),
                        _ => 0.0,
                    };
                    (cost, cost * rate)
                }
                None => (0.0, 0.0),
            };
            lines.push(LedgerLine {
                instance_id: entry.instance_id.clone(),
                def_id: entry.def_id.clone(),
                cost,
                licensing_fee,
            });
        }

        let components_cost: f64 = lines.iter().map(|l| l.cost).sum();
        let licensing_cost: f64 = lines.iter().map(|l| l.licensing_fee).sum();

        CostLedger {
            hull_cost: ctx.hull_cost,
            components_cost,
            licensing_cost,
            total_cost: ctx.hull_cost + components_cost + licensing_cost,
            lines,
        }
    }
}
