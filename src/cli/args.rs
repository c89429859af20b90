//! CLI argument definitions using clap
//!
//! Commands:
//! - ropelog init --config <path>
//! - ropelog serve --config <path> [--port N]
//! - ropelog status --config <path> --rope <id> [--on <date>]
//! - ropelog generate-id

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// ropelog - climbing rope lifecycle tracking
#[derive(Parser, Debug)]
#[command(name = "ropelog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and its schema
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./ropelog.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./ropelog.json")]
        config: PathBuf,

        /// Port to listen on (overrides the config file)
        #[arg(long, env = "ROPELOG_PORT")]
        port: Option<u16>,

        /// Admin username (overrides the config file)
        #[arg(long, env = "ROPELOG_ADMIN_USERNAME")]
        admin_username: Option<String>,

        /// Admin password (overrides the config file)
        #[arg(long, env = "ROPELOG_ADMIN_PASSWORD", hide_env_values = true)]
        admin_password: Option<String>,
    },

    /// Print the status of one rope and exit
    Status {
        /// Path to configuration file
        #[arg(long, default_value = "./ropelog.json")]
        config: PathBuf,

        /// Rope id
        #[arg(long)]
        rope: String,

        /// Evaluate as of this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        on: Option<NaiveDate>,
    },

    /// Print a freshly generated rope id
    GenerateId,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
