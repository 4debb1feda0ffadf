// Handlers for CLI subcommands. main.rs parses arguments, loads the catalog
// and dispatches here.

pub mod catalog;
pub mod ship;
