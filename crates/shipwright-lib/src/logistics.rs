//! Crew, passenger, cargo and consumables figures.
//!
//! Chassis logistics are free text ("150 tons", "1 year 2 months"); the
//! parsers here extract numbers from them and the formatters turn derived
//! numbers back into the same shape.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::projection::Projection;

/// Crew reduction factor per automation part id.
pub const CREW_AUTOMATION_FACTORS: &[(&str, f64)] = &[
    ("slave_circuits", 0.666),
    ("slave_circuits_adv", 0.333),
    ("slave_circuits_recall", 0.333),
];
pub const PASSENGER_CONVERSION_ID: &str = "passenger_conversion";
pub const EXTENDED_RANGE_ID: &str = "extended_range";

/// Consumables assumed when the chassis declares none.
pub const DEFAULT_CONSUMABLES: &str = "1 day";
const DAYS_PER_YEAR: u64 = 360;
const DAYS_PER_MONTH: u64 = 30;

static CARGO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([\d,]+(?:\.\d+)?)\s*(tons|kg)").expect("cargo pattern is valid")
});
static YEARS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*years?").expect("years pattern is valid"));
static MONTHS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*months?").expect("months pattern is valid"));
static DAYS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*days?").expect("days pattern is valid"));

/// Cargo capacity in tons; kilograms are converted, unparseable text is 0.
pub fn parse_cargo_tons(text: &str) -> f64 {
    let Some(caps) = CARGO_PATTERN.captures(text) else {
        return 0.0;
    };
    let Ok(value) = caps[1].replace(',', "").parse::<f64>() else {
        return 0.0;
    };
    if caps[2].eq_ignore_ascii_case("kg") {
        value / 1000.0
    } else {
        value
    }
}

fn capture_number(pattern: &Regex, text: &str) -> u64 {
    pattern
        .captures(text)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .unwrap_or(0)
}

/// Duration in days using 360-day years and 30-day months; never below 1.
pub fn parse_duration_days(text: &str) -> u64 {
    let total = capture_number(&YEARS_PATTERN, text) * DAYS_PER_YEAR
        + capture_number(&MONTHS_PATTERN, text) * DAYS_PER_MONTH
        + capture_number(&DAYS_PATTERN, text);
    total.max(1)
}

fn plural(count: u64, unit: &str) -> String {
    if count > 1 {
        format!("{count} {unit}s")
    } else {
        format!("{count} {unit}")
    }
}

/// Render days as "N years N months N days", omitting zero parts.
pub fn format_days(days: u64) -> String {
    let years = days / DAYS_PER_YEAR;
    let months = (days % DAYS_PER_YEAR) / DAYS_PER_MONTH;
    let rest = days % DAYS_PER_MONTH;

    let parts: Vec<String> = [(years, "year"), (months, "month"), (rest, "day")]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| plural(count, unit))
        .collect();

    if parts.is_empty() {
        "0 days".to_string()
    } else {
        parts.join(" ")
    }
}

/// Insert thousands separators into an unsigned integer.
///
/// ```
/// # use shipwright_lib::logistics::group_thousands;
/// assert_eq!(group_thousands(4_018_000), "4,018,000");
/// ```
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a tonnage: whole kilograms strictly between 0 and 1 ton, tons with
/// at most two decimals otherwise.
pub fn format_cargo(tons: f64) -> String {
    let tons = tons.max(0.0);
    if tons > 0.0 && tons < 1.0 {
        return format!("{} kg", group_thousands((tons * 1000.0).floor() as u64));
    }

    let cents = (tons * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    if fraction == 0 {
        format!("{whole} tons")
    } else {
        let decimals = format!("{fraction:02}");
        format!("{whole}.{} tons", decimals.trim_end_matches('0'))
    }
}

/// Derived logistics of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogisticsSummary {
    pub crew: u32,
    pub passengers: u32,
    pub population: u32,
    /// Seats left in escape craft after any conversion.
    pub escape_capacity: u32,
    pub max_cargo_tons: f64,
    pub current_cargo: String,
    pub consumables_days: u64,
    pub consumables: String,
}

impl Projection<'_> {
    /// Chassis cargo scaled by the last declared cargo factor plus size-scaled
    /// cargo bonuses.
    pub fn max_cargo_tons(&self) -> f64 {
        let Some(text) = self.vehicle.logistics.cargo.as_deref() else {
            return 0.0;
        };
        let base = parse_cargo_tons(text);
        let size_multiplier = self.size_multiplier();

        let mut factor = 1.0;
        let mut bonus = 0.0;
        for (_, part) in self.resolved_entries() {
            let Some(stats) = part.stats.as_ref() else {
                continue;
            };
            if let Some(f) = stats.cargo_factor.filter(|f| *f != 0.0) {
                factor = f;
            }
            if let Some(b) = stats.cargo_bonus_size_mult.filter(|b| *b != 0.0) {
                bonus += b * size_multiplier;
            }
        }
        base * factor + bonus
    }

    /// Cargo left after conversion into capacity budget.
    pub fn current_cargo_tons(&self) -> f64 {
        let max = self.max_cargo_tons();
        (max - self.config.cargo_to_ep_amount.min(max)).max(0.0)
    }

    pub fn current_cargo(&self) -> String {
        format_cargo(self.current_cargo_tons())
    }

    /// Crew after automation: the smallest reduction factor applies, rounded
    /// up and never below 1 for a crewed chassis.
    pub fn crew(&self) -> u32 {
        let base = self.vehicle.logistics.crew;
        let factor = self
            .config
            .entries
            .iter()
            .filter_map(|entry| {
                CREW_AUTOMATION_FACTORS
                    .iter()
                    .find(|(id, _)| *id == entry.def_id)
                    .map(|(_, factor)| *factor)
            })
            .fold(1.0_f64, f64::min);

        let crew = (f64::from(base) * factor).ceil() as u32;
        if crew < 1 && base > 0 {
            1
        } else {
            crew
        }
    }

    /// Chassis passengers plus one size multiplier per passenger conversion
    /// unit. Gains are summed before a single rounding, so whole multipliers
    /// stay exact and a fractional one is rounded once for the total.
    pub fn passengers(&self) -> u32 {
        let per_unit = self.size_multiplier();
        let extra: f64 = self
            .config
            .entries
            .iter()
            .filter(|entry| entry.def_id == PASSENGER_CONVERSION_ID)
            .map(|entry| per_unit * f64::from(entry.modifiers.effective_quantity()))
            .sum();
        self.vehicle.logistics.passengers + extra.round() as u32
    }

    pub fn population(&self) -> u32 {
        self.crew() + self.passengers()
    }

    /// Escape seats: the full population unless escape capacity was traded
    /// for budget on an eligible chassis.
    pub fn escape_capacity(&self) -> u32 {
        let population = self.population();
        let pct = self.config.escape_pods_to_ep_pct.min(100);
        if self.vehicle.has_escape_capacity() && pct > 0 {
            let kept = f64::from(population) * f64::from(100 - pct) / 100.0;
            kept.ceil() as u32
        } else {
            population
        }
    }

    /// Consumables in days; each range extension adds a tenth of the
    /// baseline, at least one day per unit.
    pub fn consumables_days(&self) -> u64 {
        let text = self
            .vehicle
            .logistics
            .consumables
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CONSUMABLES);
        let base = parse_duration_days(text);
        let extensions: u64 = self
            .config
            .entries
            .iter()
            .filter(|entry| entry.def_id == EXTENDED_RANGE_ID)
            .map(|entry| u64::from(entry.modifiers.effective_quantity()))
            .sum();
        let per_unit = (base / 10).max(1);
        base + per_unit * extensions
    }

    pub fn consumables(&self) -> String {
        format_days(self.consumables_days())
    }

    pub fn logistics(&self) -> LogisticsSummary {
        let crew = self.crew();
        let passengers = self.passengers();
        let consumables_days = self.consumables_days();
        LogisticsSummary {
            crew,
            passengers,
            population: crew + passengers,
            escape_capacity: self.escape_capacity(),
            max_cargo_tons: self.max_cargo_tons(),
            current_cargo: self.current_cargo(),
            consumables_days,
            consumables: format_days(consumables_days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cargo_text_parses_tons_and_kilograms() {
        assert_eq!(parse_cargo_tons("1,500 tons"), 1500.0);
        assert_eq!(parse_cargo_tons("250 kg"), 0.25);
        assert_eq!(parse_cargo_tons("80 Tons of cargo"), 80.0);
        assert_eq!(parse_cargo_tons("2.5 tons"), 2.5);
        assert_eq!(parse_cargo_tons("none"), 0.0);
    }

    #[test]
    fn durations_use_360_day_years() {
        assert_eq!(parse_duration_days("1 year"), 360);
        assert_eq!(parse_duration_days("2 years 3 months"), 810);
        assert_eq!(parse_duration_days("5 days"), 5);
        assert_eq!(parse_duration_days("none"), 1);
    }

    #[test]
    fn days_format_back_into_units() {
        assert_eq!(format_days(396), "1 year 1 month 6 days");
        assert_eq!(format_days(61), "2 months 1 day");
        assert_eq!(format_days(0), "0 days");
    }

    #[test]
    fn cargo_renders_kilograms_below_one_ton() {
        assert_eq!(format_cargo(0.25), "250 kg");
        assert_eq!(format_cargo(0.0), "0 tons");
        assert_eq!(format_cargo(1234.5), "1,234.5 tons");
        assert_eq!(format_cargo(100.0), "100 tons");
        assert_eq!(format_cargo(3.456), "3.46 tons");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }
}
