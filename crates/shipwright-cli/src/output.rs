//! Output formatting for catalog listings and ship reports.
//!
//! Text formatters return `String`s so they can be tested without capturing
//! stdout; JSON goes straight to stdout through [`render_json`].

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use shipwright_lib::catalog::{PartDefinition, VehicleDefinition};
use shipwright_lib::logistics::group_thousands;
use shipwright_lib::report::EntryReport;
use shipwright_lib::{InstallOutcome, ShipReport, SizeCheck};

use crate::terminal::ColorPalette;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write `value` to stdout as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Whole credits with thousands separators, e.g. `4,018,000 cr`.
pub fn format_credits(value: f64) -> String {
    format!("{} cr", group_thousands(value.max(0.0).round() as u64))
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

fn format_size_check(size: &SizeCheck) -> Option<String> {
    match size {
        SizeCheck::Compatible => None,
        SizeCheck::ChassisTooLarge { max } => Some(format!("chassis too large (max {max})")),
        SizeCheck::ChassisTooSmall { min } => Some(format!("chassis too small (min {min})")),
    }
}

/// Table of parts: id, name, category, cost and capacity draw.
pub fn format_parts_table(parts: &[&PartDefinition]) -> String {
    if parts.is_empty() {
        return "No parts available in catalog.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Available parts ({}):", parts.len());
    let _ = writeln!(
        out,
        "{:<22} {:<30} {:<18} {:>12} {:>4}",
        "Id", "Name", "Category", "Cost", "EP"
    );
    for part in parts {
        let cost = if part.size_mult {
            format!("{}*", format_credits(part.base_cost))
        } else {
            format_credits(part.base_cost)
        };
        let _ = writeln!(
            out,
            "{:<22} {:<30} {:<18} {:>12} {:>4}",
            part.id, part.name, part.category, cost, part.base_ep
        );
    }
    if parts.iter().any(|p| p.size_mult) {
        let _ = writeln!(out, "* scaled by the chassis size multiplier");
    }
    out
}

/// Table of vehicles: id, name, size, hull cost and base budget.
pub fn format_vehicles_table(vehicles: &[&VehicleDefinition]) -> String {
    if vehicles.is_empty() {
        return "No vehicles available in catalog.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Available vehicles ({}):", vehicles.len());
    let _ = writeln!(
        out,
        "{:<20} {:<24} {:<20} {:>14} {:>4}",
        "Id", "Name", "Size", "Cost", "EP"
    );
    for vehicle in vehicles {
        let _ = writeln!(
            out,
            "{:<20} {:<24} {:<20} {:>14} {:>4}",
            vehicle.id,
            vehicle.name,
            vehicle.size,
            format_credits(vehicle.cost),
            vehicle.base_ep
        );
    }
    out
}

fn format_entry_line(entry: &EntryReport, p: &ColorPalette) -> String {
    let mut line = format!(
        "  - {}{}{} ({})",
        p.heading, entry.name, p.reset, entry.instance_id
    );
    if entry.is_stock {
        let _ = write!(line, " {}[stock]{}", p.muted, p.reset);
    }
    if !entry.location.is_empty() {
        let _ = write!(line, " @ {}", entry.location);
    }
    let _ = write!(
        line,
        ": {}, {} EP, {}",
        format_credits(entry.cost),
        entry.capacity,
        entry.availability
    );
    if let Some(damage) = &entry.damage {
        let _ = write!(line, ", {}{damage}{}", p.accent, p.reset);
    }
    if !entry.resolved {
        let _ = write!(line, " {}(unknown part){}", p.warn, p.reset);
    } else if let Some(problem) = format_size_check(&entry.size) {
        let _ = write!(line, " {}({problem}){}", p.warn, p.reset);
    }
    line
}

/// Multi-section text rendering of a ship report.
pub fn format_report_text(report: &ShipReport, p: &ColorPalette) -> String {
    let mut out = String::new();
    let name = if report.name.is_empty() {
        report.vehicle_name.as_str()
    } else {
        report.name.as_str()
    };
    let _ = writeln!(
        out,
        "{}{name}{} ({}, {})",
        p.heading, p.reset, report.vehicle_name, report.size
    );
    if let Some(template) = &report.template {
        let _ = writeln!(out, "{}Template:{} {template}", p.muted, p.reset);
    }

    let costs = &report.costs;
    let _ = writeln!(out, "\n{}Cost{}", p.heading, p.reset);
    let _ = writeln!(out, "  Hull:        {:>16}", format_credits(costs.hull_cost));
    let _ = writeln!(out, "  Components:  {:>16}", format_credits(costs.components_cost));
    let _ = writeln!(out, "  Licensing:   {:>16}", format_credits(costs.licensing_cost));
    let _ = writeln!(out, "  Total:       {:>16}", format_credits(costs.total_cost));

    let budget = &report.capacity;
    let budget_color = if budget.is_over_budget() { p.error } else { p.ok };
    let _ = writeln!(out, "\n{}Capacity{}", p.heading, p.reset);
    let _ = writeln!(
        out,
        "  Used {} of {} EP ({}{} remaining{})",
        budget.used, budget.total, budget_color, budget.remaining, p.reset
    );

    let stats = &report.stats;
    let defenses = &report.defenses;
    let _ = writeln!(out, "\n{}Statistics{}", p.heading, p.reset);
    let _ = writeln!(
        out,
        "  HP {}  Armor {}  SR {}  Speed {}  Hyperdrive {}",
        format_stat(stats.hp),
        format_stat(stats.armor),
        format_stat(stats.sr),
        format_stat(stats.speed),
        format_stat(stats.hyperdrive)
    );
    let _ = writeln!(
        out,
        "  Fortitude {}  Reflex {}  Damage threshold {}",
        format_stat(Some(defenses.fortitude)),
        format_stat(Some(defenses.reflex)),
        format_stat(Some(defenses.damage_threshold))
    );

    let logistics = &report.logistics;
    let _ = writeln!(out, "\n{}Logistics{}", p.heading, p.reset);
    let _ = writeln!(
        out,
        "  Crew {} ({})  Passengers {}  Escape seats {}",
        logistics.crew,
        report.crew_quality.label(),
        logistics.passengers,
        logistics.escape_capacity
    );
    let _ = writeln!(
        out,
        "  Cargo {}  Consumables {}",
        logistics.current_cargo, logistics.consumables
    );

    let _ = writeln!(out, "\n{}Availability:{} {}", p.heading, p.reset, report.availability);

    let _ = writeln!(
        out,
        "\n{}Installed ({}){}",
        p.heading,
        report.entries.len(),
        p.reset
    );
    for entry in &report.entries {
        let _ = writeln!(out, "{}", format_entry_line(entry, p));
    }
    out
}

/// One-paragraph confirmation of an install.
pub fn format_install_text(part_id: &str, outcome: &InstallOutcome, remaining: i64) -> String {
    let mut out = format!("Installed {part_id} as {}\n", outcome.instance_id);
    for evicted in &outcome.evicted {
        let _ = writeln!(out, "Evicted {evicted} (same exclusive group)");
    }
    if let Some(problem) = format_size_check(&outcome.size) {
        let _ = writeln!(out, "Warning: {problem}");
    }
    let _ = writeln!(out, "Remaining capacity: {remaining} EP");
    out
}
