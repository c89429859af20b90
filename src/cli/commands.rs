//! CLI command implementations

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::AdminCredentials;
use crate::http_server::{HttpServer, HttpServerConfig, RopeState};
use crate::observability::init_logging;
use crate::rope::{generate_rope_id, Clock, FixedClock, RopeId, RopeService, SystemClock};
use crate::store::SqliteRopeStore;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (required)
    pub database_path: String,

    /// Operator username for the admin endpoints
    #[serde(default)]
    pub admin_username: String,

    /// Operator password for the admin endpoints
    #[serde(default, skip_serializing)]
    pub admin_password: String,

    /// Listener and CORS settings
    #[serde(flatten)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        Ok(())
    }

    /// Apply command-line / environment overrides
    pub fn with_overrides(
        mut self,
        port: Option<u16>,
        admin_username: Option<String>,
        admin_password: Option<String>,
    ) -> CliResult<Self> {
        if let Some(port) = port {
            self.http.port = port;
        }
        if let Some(username) = admin_username {
            self.admin_username = username;
        }
        if let Some(password) = admin_password {
            self.admin_password = password;
        }

        self.validate()?;
        Ok(self)
    }

    /// Admin credentials; both fields must be set
    pub fn admin_credentials(&self) -> CliResult<AdminCredentials> {
        if self.admin_username.is_empty() || self.admin_password.is_empty() {
            return Err(CliError::config_error(
                "admin_username and admin_password must be set \
                 (config file or ROPELOG_ADMIN_USERNAME / ROPELOG_ADMIN_PASSWORD)",
            ));
        }

        Ok(AdminCredentials::new(
            self.admin_username.clone(),
            self.admin_password.clone(),
        ))
    }

    /// Get database path as Path
    pub fn database_path(&self) -> &Path {
        Path::new(&self.database_path)
    }
}

/// Parse args and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve {
            config,
            port,
            admin_username,
            admin_password,
        } => serve(&config, port, admin_username, admin_password),
        Command::Status { config, rope, on } => status(&config, &rope, on),
        Command::GenerateId => generate_id(),
    }
}

fn open_existing_store(config: &Config) -> CliResult<SqliteRopeStore> {
    if !config.database_path().exists() {
        return Err(CliError::not_initialized());
    }
    Ok(SqliteRopeStore::open(config.database_path())?)
}

/// Create the database file and its schema
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let db_path = config.database_path();

    if db_path.exists() {
        return Err(CliError::already_initialized());
    }

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CliError::config_error(format!("Failed to create directory {:?}: {}", parent, e))
        })?;
    }

    SqliteRopeStore::open(db_path)?;

    write_response(json!({
        "initialized": true,
        "database_path": config.database_path,
    }))
}

/// Boot the HTTP server
pub fn serve(
    config_path: &Path,
    port: Option<u16>,
    admin_username: Option<String>,
    admin_password: Option<String>,
) -> CliResult<()> {
    let config =
        Config::load(config_path)?.with_overrides(port, admin_username, admin_password)?;
    let admin = config.admin_credentials()?;

    init_logging();

    let store = open_existing_store(&config)?;
    let state = Arc::new(RopeState::new(store, SystemClock, admin));
    let server = HttpServer::new(config.http.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print one rope's status report
pub fn status(config_path: &Path, rope: &str, on: Option<NaiveDate>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store = open_existing_store(&config)?;

    let clock: Box<dyn Clock> = match on {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };
    let service = RopeService::new(store, clock);

    let rope_id = RopeId::parse(rope)?;
    let report = service.status_of(&rope_id)?;

    write_response(json!({
        "rope_id": rope_id,
        "evaluated_on": service.today(),
        "report": report,
    }))
}

/// Print a new rope id
pub fn generate_id() -> CliResult<()> {
    write_response(json!({ "rope_id": generate_rope_id() }))
}
