//! Market availability of installed entries and legality of the whole
//! configuration.

use serde::{Deserialize, Serialize};

use crate::catalog::{PartDefinition, ILLEGAL_AVAILABILITY, MILITARY_AVAILABILITY};
use crate::configuration::InstalledEntry;
use crate::modifiers::{Enhancement, Mount};
use crate::projection::Projection;

/// Availability levels from least to most restricted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Availability {
    #[default]
    Common,
    Licensed,
    Restricted,
    Military,
    Illegal,
}

impl Availability {
    pub fn label(self) -> &'static str {
        match self {
            Availability::Common => "Common",
            Availability::Licensed => "Licensed",
            Availability::Restricted => "Restricted",
            Availability::Military => "Military",
            Availability::Illegal => "Illegal",
        }
    }

    /// Level of a catalog label; `None` for labels outside the fixed scale.
    pub fn from_label(label: &str) -> Option<Self> {
        [
            Availability::Common,
            Availability::Licensed,
            Availability::Restricted,
            Availability::Military,
            Availability::Illegal,
        ]
        .into_iter()
        .find(|level| level.label() == label)
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Availability of one installed part after its modifiers are considered.
///
/// Quad mounts, fire-linking and the enhanced tier make a part at least
/// Restricted, the advanced tier at least Military. Any switched-on option
/// whose `optionCosts` entry declares an availability raises the level to it.
pub fn entry_availability(part: &PartDefinition, entry: &InstalledEntry) -> Availability {
    let mods = &entry.modifiers;
    let mut level = part
        .availability
        .as_deref()
        .and_then(Availability::from_label)
        .unwrap_or_default();

    if mods.mount == Mount::Quad || mods.fire_link > 1 || mods.enhancement == Enhancement::Enhanced
    {
        level = level.max(Availability::Restricted);
    }
    if mods.enhancement == Enhancement::Advanced {
        level = level.max(Availability::Military);
    }

    if let Some(specs) = &part.upgrade_specs {
        for (key, cost) in &specs.option_costs {
            if !mods.flag(key) {
                continue;
            }
            if let Some(raised) = cost.availability().and_then(Availability::from_label) {
                level = level.max(raised);
            }
        }
    }

    level
}

impl Projection<'_> {
    /// Availability of an installed entry; unresolved entries are Common.
    pub fn availability_of(&self, entry: &InstalledEntry) -> Availability {
        self.part(entry)
            .map(|part| entry_availability(part, entry))
            .unwrap_or_default()
    }

    /// Legality of the configuration: the most restricted declared
    /// availability among installed parts, by the catalog's availability
    /// order. Trading escape capacity for budget is illegal on anything less
    /// than a military-grade configuration.
    pub fn ship_availability(&self) -> String {
        let tables = self.tables();
        let max_rank = self
            .resolved_entries()
            .filter_map(|(_, part)| part.availability.as_deref())
            .filter_map(|availability| tables.availability_rank(availability))
            .max()
            .unwrap_or(0);

        if self.config.escape_pods_to_ep_pct > 0 {
            if let Some(military) = tables.availability_rank(MILITARY_AVAILABILITY) {
                if max_rank < military {
                    return ILLEGAL_AVAILABILITY.to_string();
                }
            }
        }

        tables
            .availability_rank
            .get(max_rank)
            .cloned()
            .unwrap_or_else(|| Availability::Common.label().to_string())
    }
}
