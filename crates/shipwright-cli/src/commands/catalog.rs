//! Catalog discovery and the `parts` / `vehicles` listing commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use shipwright_lib::catalog::{PartDefinition, VehicleDefinition};
use shipwright_lib::Catalog;

use crate::output::{format_parts_table, format_vehicles_table, render_json, OutputFormat};

/// Environment variable naming a catalog file.
pub const CATALOG_ENV_VAR: &str = "SHIPWRIGHT_CATALOG";
const CATALOG_FILENAME: &str = "catalog.json";

/// Load the catalog.
///
/// An explicit `--catalog` path is used as given. Otherwise the first
/// existing candidate wins:
/// 1. `SHIPWRIGHT_CATALOG` environment variable
/// 2. `catalog.json` in the platform data directory
/// 3. Debug fixture path (only in debug builds)
pub fn load_catalog(explicit: Option<&Path>) -> Result<Catalog> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => catalog_candidates()
            .into_iter()
            .find(|p| p.exists())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "{CATALOG_FILENAME} not found; pass --catalog or set {CATALOG_ENV_VAR}"
                )
            })?,
    };
    debug!(path = %path.display(), "loading catalog");

    Catalog::from_path(&path)
        .with_context(|| format!("failed to load catalog from {}", path.display()))
}

fn catalog_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(env_path) = std::env::var(CATALOG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Some(dirs) = ProjectDirs::from("com", "shipwright", "shipwright") {
        candidates.push(dirs.data_dir().join(CATALOG_FILENAME));
    }

    if cfg!(debug_assertions) {
        let fixture =
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/catalog.json");
        candidates.push(fixture);
    }

    candidates
}

/// Handle the `parts` subcommand, optionally filtered by category
/// (case-insensitive).
pub fn handle_list_parts(
    catalog: &Catalog,
    category: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let parts: Vec<&PartDefinition> = catalog
        .parts
        .iter()
        .filter(|p| category.map_or(true, |c| p.category.eq_ignore_ascii_case(c)))
        .collect();

    match format {
        OutputFormat::Json => render_json(&parts).context("failed to write parts")?,
        OutputFormat::Text => print!("{}", format_parts_table(&parts)),
    }
    Ok(())
}

/// Handle the `vehicles` subcommand.
pub fn handle_list_vehicles(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let vehicles: Vec<&VehicleDefinition> = catalog.vehicles.iter().collect();

    match format {
        OutputFormat::Json => render_json(&vehicles).context("failed to write vehicles")?,
        OutputFormat::Text => print!("{}", format_vehicles_table(&vehicles)),
    }
    Ok(())
}
