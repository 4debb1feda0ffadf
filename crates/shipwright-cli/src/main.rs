use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shipwright_cli::commands::catalog::{handle_list_parts, handle_list_vehicles, load_catalog};
use shipwright_cli::commands::ship::{
    handle_install, handle_new, handle_remove, handle_summary, InstallArgs, NewShipArgs,
};
use shipwright_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Starship configuration tools")]
struct Cli {
    /// Catalog file to load instead of the default location.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the parts in the catalog.
    Parts {
        /// Only list parts of this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// List the vehicles in the catalog.
    Vehicles,
    /// Start a ship on a vehicle with its default parts and save it.
    New {
        /// Vehicle id.
        vehicle: String,
        /// Snapshot file to write.
        #[arg(long, short)]
        output: PathBuf,
        /// Template id to apply.
        #[arg(long)]
        template: Option<String>,
        /// Ship name.
        #[arg(long)]
        name: Option<String>,
    },
    /// Print cost, capacity, statistics and logistics of a saved ship.
    Summary {
        /// Snapshot file to read.
        snapshot: PathBuf,
    },
    /// Install a part into a saved ship.
    Install {
        /// Snapshot file to update.
        snapshot: PathBuf,
        /// Part id.
        part: String,
        /// Free-text mounting location.
        #[arg(long, default_value = "")]
        location: String,
        /// Install as a non-standard modification (doubles cost and draw).
        #[arg(long)]
        non_standard: bool,
    },
    /// Remove an installed entry from a saved ship.
    Remove {
        /// Snapshot file to update.
        snapshot: PathBuf,
        /// Instance id of the entry.
        instance_id: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;
    let format = cli.format;

    match cli.command {
        Command::Parts { category } => handle_list_parts(&catalog, category.as_deref(), format),
        Command::Vehicles => handle_list_vehicles(&catalog, format),
        Command::New {
            vehicle,
            output,
            template,
            name,
        } => handle_new(
            catalog,
            &NewShipArgs {
                vehicle,
                template,
                name,
                output,
            },
            format,
        ),
        Command::Summary { snapshot } => handle_summary(catalog, &snapshot, format),
        Command::Install {
            snapshot,
            part,
            location,
            non_standard,
        } => handle_install(
            catalog,
            &InstallArgs {
                snapshot,
                part,
                location,
                non_standard,
            },
            format,
        ),
        Command::Remove {
            snapshot,
            instance_id,
        } => handle_remove(catalog, &snapshot, &instance_id, format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
