//! Option price lookup shared by the cost ledger and availability rules.
//!
//! A price is looked up in three places, first hit wins: the part's
//! `optionCosts` override table, a legacy `{ "<option>": { "cost": ... } }`
//! object on the part's upgrade specs, then the catalog-wide default table.

use std::borrow::Cow;

use crate::catalog::{CatalogTables, OptionCost, PartDefinition};

/// Find the price declaration for option `key` on `part`.
pub fn resolve_option_cost<'a>(
    part: &'a PartDefinition,
    key: &str,
    tables: &'a CatalogTables,
) -> Option<Cow<'a, OptionCost>> {
    if let Some(specs) = &part.upgrade_specs {
        if let Some(cost) = specs.option_costs.get(key) {
            return Some(Cow::Borrowed(cost));
        }
        if let Some(cost) = specs.legacy_option_cost(key) {
            return Some(Cow::Owned(cost));
        }
    }
    tables.default_option_cost(key).map(Cow::Borrowed)
}

/// Turn a price declaration into credits.
///
/// A flat number is returned as is; a multiplier scales `base`; a detailed
/// flat cost is scaled by `size_multiplier` when it asks for it. Anything
/// else prices at zero.
pub fn price_option(cost: &OptionCost, base: f64, size_multiplier: f64) -> f64 {
    match cost {
        OptionCost::Flat(amount) => *amount,
        OptionCost::Detailed(detail) => {
            if let Some(multiplier) = detail.multiplier.filter(|m| *m != 0.0) {
                return base * multiplier;
            }
            match detail.cost.filter(|c| *c != 0.0) {
                Some(amount) if detail.size_mult => amount * size_multiplier,
                Some(amount) => amount,
                None => 0.0,
            }
        }
    }
}

/// Price of option `key` on `part` against `base`, or 0 when undeclared.
pub fn option_cost(
    part: &PartDefinition,
    key: &str,
    base: f64,
    tables: &CatalogTables,
    size_multiplier: f64,
) -> f64 {
    resolve_option_cost(part, key, tables)
        .map(|cost| price_option(&cost, base, size_multiplier))
        .unwrap_or(0.0)
}
