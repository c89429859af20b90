//! CLI module for ropelog
//!
//! Provides command-line interface for:
//! - init: Create the database and schema
//! - serve: Boot the HTTP server
//! - status: One-shot status report for a rope
//! - generate-id: Print a fresh rope id

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{generate_id, init, run, run_command, serve, status, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
