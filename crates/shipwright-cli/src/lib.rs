//! Shipwright CLI library.
//!
//! Command handlers, output formatting and terminal styling behind the
//! `shipwright-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
