//! Commands that create, inspect and edit saved ship snapshots.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use shipwright_lib::{Catalog, InstallOutcome, Shipyard};

use crate::output::{format_install_text, format_report_text, render_json, OutputFormat};
use crate::terminal::ColorPalette;

/// Arguments for the `new` command.
#[derive(Debug, Clone)]
pub struct NewShipArgs {
    pub vehicle: String,
    pub template: Option<String>,
    pub name: Option<String>,
    /// Snapshot file to write.
    pub output: PathBuf,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone)]
pub struct InstallArgs {
    pub snapshot: PathBuf,
    pub part: String,
    pub location: String,
    pub non_standard: bool,
}

#[derive(Debug, Serialize)]
struct InstallResult<'a> {
    part: &'a str,
    #[serde(flatten)]
    outcome: &'a InstallOutcome,
    remaining_capacity: i64,
}

#[derive(Debug, Serialize)]
struct RemoveResult<'a> {
    instance_id: &'a str,
    removed: bool,
    remaining_capacity: i64,
}

fn open_snapshot(catalog: Catalog, path: &Path) -> Result<Shipyard> {
    let mut yard = Shipyard::new(catalog);
    yard.load_from_path(path)
        .with_context(|| format!("failed to load snapshot from {}", path.display()))?;
    Ok(yard)
}

fn save_snapshot(yard: &Shipyard, path: &Path) -> Result<()> {
    yard.save_to_path(path)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))
}

fn print_report(yard: &Shipyard, format: OutputFormat) -> Result<()> {
    let report = yard.projection().report();
    match format {
        OutputFormat::Json => render_json(&report).context("failed to write report")?,
        OutputFormat::Text => print!("{}", format_report_text(&report, &ColorPalette::detect())),
    }
    Ok(())
}

/// Handle the `new` subcommand: start a ship on a chassis with its default
/// parts, save it and print its report.
pub fn handle_new(catalog: Catalog, args: &NewShipArgs, format: OutputFormat) -> Result<()> {
    if !catalog.vehicles.iter().any(|v| v.id == args.vehicle) {
        bail!("unknown vehicle '{}'", args.vehicle);
    }
    if let Some(template) = args.template.as_deref() {
        if catalog.template(template).is_none() {
            bail!("unknown template '{template}'");
        }
    }

    let mut yard = Shipyard::new(catalog);
    yard.install_defaults(&args.vehicle);
    yard.select_template(args.template.as_deref());
    if let Some(name) = &args.name {
        yard.set_name(name.clone());
    }

    save_snapshot(&yard, &args.output)?;
    print_report(&yard, format)
}

/// Handle the `summary` subcommand.
pub fn handle_summary(catalog: Catalog, snapshot: &Path, format: OutputFormat) -> Result<()> {
    let yard = open_snapshot(catalog, snapshot)?;
    print_report(&yard, format)
}

/// Handle the `install` subcommand: install one part and save the snapshot
/// in place.
pub fn handle_install(catalog: Catalog, args: &InstallArgs, format: OutputFormat) -> Result<()> {
    let mut yard = open_snapshot(catalog, &args.snapshot)?;
    let Some(outcome) = yard.install(&args.part, args.location.as_str(), args.non_standard) else {
        bail!("unknown part '{}'", args.part);
    };
    save_snapshot(&yard, &args.snapshot)?;

    let remaining = yard.projection().remaining_capacity();
    match format {
        OutputFormat::Json => render_json(&InstallResult {
            part: &args.part,
            outcome: &outcome,
            remaining_capacity: remaining,
        })
        .context("failed to write install result")?,
        OutputFormat::Text => print!("{}", format_install_text(&args.part, &outcome, remaining)),
    }
    Ok(())
}

/// Handle the `remove` subcommand. Removing an unknown instance id is an
/// error so scripts notice typos.
pub fn handle_remove(
    catalog: Catalog,
    snapshot: &Path,
    instance_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let mut yard = open_snapshot(catalog, snapshot)?;
    if !yard.remove(instance_id) {
        bail!("no installed entry with id '{instance_id}'");
    }
    save_snapshot(&yard, snapshot)?;

    let remaining = yard.projection().remaining_capacity();
    match format {
        OutputFormat::Json => render_json(&RemoveResult {
            instance_id,
            removed: true,
            remaining_capacity: remaining,
        })
        .context("failed to write remove result")?,
        OutputFormat::Text => {
            println!("Removed {instance_id}");
            println!("Remaining capacity: {remaining} EP");
        }
    }
    Ok(())
}
