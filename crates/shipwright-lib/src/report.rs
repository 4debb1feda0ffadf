//! Everything derivable from a configuration, bundled for display.

use serde::Serialize;
use tracing::warn;

use crate::availability::Availability;
use crate::budget::CapacityBudget;
use crate::catalog::Stats;
use crate::configuration::{CrewQuality, CrewStats};
use crate::damage::resolve_damage;
use crate::ledger::CostLedger;
use crate::logistics::LogisticsSummary;
use crate::projection::Projection;
use crate::shipyard::SizeCheck;
use crate::stats::Defenses;

/// Derived values of one installed entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReport {
    pub instance_id: String,
    pub def_id: String,
    /// Part name, or the part id when the entry no longer resolves.
    pub name: String,
    pub location: String,
    pub is_stock: bool,
    pub resolved: bool,
    pub cost: f64,
    pub capacity: i64,
    pub availability: Availability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    pub size: SizeCheck,
}

/// Cost, budget, statistics and logistics of the whole configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipReport {
    pub name: String,
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub costs: CostLedger,
    pub capacity: CapacityBudget,
    pub stats: Stats,
    pub defenses: Defenses,
    pub logistics: LogisticsSummary,
    pub crew_quality: CrewQuality,
    pub crew_stats: CrewStats,
    pub availability: String,
    pub entries: Vec<EntryReport>,
}

impl ShipReport {
    /// Entries whose part does not fit the chassis.
    pub fn incompatible(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| !e.size.is_compatible())
    }

    /// Entries whose part id no longer resolves.
    pub fn unresolved(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| !e.resolved)
    }
}

impl Projection<'_> {
    pub fn report(&self) -> ShipReport {
        let stats = self.stats();
        let weapon_dice = stats.weapon_damage_dice.unwrap_or(0.0) as i64;
        let capacity = self.capacity_budget();
        if capacity.is_over_budget() {
            warn!(
                remaining = capacity.remaining,
                total = capacity.total,
                "configuration exceeds its capacity budget"
            );
        }

        let entries = self
            .config
            .entries
            .iter()
            .map(|entry| {
                let part = self.part(entry);
                EntryReport {
                    instance_id: entry.instance_id.clone(),
                    def_id: entry.def_id.clone(),
                    name: part.map_or_else(|| entry.def_id.clone(), |p| p.name.clone()),
                    location: entry.location.clone(),
                    is_stock: entry.is_stock,
                    resolved: part.is_some(),
                    cost: self.entry_cost(entry),
                    capacity: self.entry_capacity(entry),
                    availability: self.availability_of(entry),
                    damage: part.and_then(|p| p.damage.as_deref()).map(|damage| {
                        resolve_damage(damage, &entry.modifiers, weapon_dice)
                    }),
                    size: part.map_or(SizeCheck::Compatible, |p| self.size_check(p)),
                }
            })
            .collect();

        ShipReport {
            name: self.config.name.clone(),
            vehicle_id: self.vehicle.id.clone(),
            vehicle_name: self.vehicle.name.clone(),
            size: self.vehicle.size.clone(),
            template: self.template.map(|t| t.name.clone()),
            costs: self.cost_ledger(),
            capacity,
            defenses: self.defenses_for(&stats),
            stats,
            logistics: self.logistics(),
            crew_quality: self.config.crew_quality,
            crew_stats: self.config.crew_quality.stats(),
            availability: self.ship_availability(),
            entries,
        }
    }
}
