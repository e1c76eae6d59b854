//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Database pool and repository (via flinkenv-db)
//! - Distribution oracle (via flinkenv-runtime)
//! - Environment service (via flinkenv-core)
//!
//! Command handlers receive the composed `CliContext` and delegate work to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use flinkenv_core::{FlinkEnvService, Settings, database_path, validate_settings};
use flinkenv_db::{CoreFactory, setup_database};
use flinkenv_runtime::DistributionOracle;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Registration settings (host Scala version, config file name).
    pub settings: Settings,
    /// Path to the `SQLite` database; `None` resolves the data directory
    /// when the context is bootstrapped.
    pub db_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create config with default settings and the default database location.
    pub fn with_defaults() -> Self {
        Self {
            settings: Settings::with_defaults(),
            db_path: None,
        }
    }

    /// Defaults overridden by global flags (which clap also fills from the environment).
    ///
    /// Touches nothing on disk.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            settings: settings_from_cli(cli)?,
            ..Self::with_defaults()
        })
    }
}

fn settings_from_cli(cli: &Cli) -> Result<Settings, CliError> {
    let mut settings = Settings::with_defaults();
    if let Some(version) = &cli.scala_version {
        settings.host_scala_version = Some(version.trim().to_string());
    }
    if let Some(name) = &cli.conf_file {
        settings.conf_file_name = Some(name.trim().to_string());
    }
    validate_settings(&settings).map_err(|e| CliError::Config(e.to_string()))?;
    Ok(settings)
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Environment service.
    pub envs: FlinkEnvService,
}

impl CliContext {
    /// Access the environment service.
    pub fn envs(&self) -> &FlinkEnvService {
        &self.envs
    }
}

/// Bootstrap the CLI application.
///
/// Opens (and if needed creates) the database, then assembles the
/// environment service around the filesystem oracle.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let db_path = match config.db_path {
        Some(path) => path,
        None => database_path()?,
    };
    let pool = setup_database(&db_path).await?;
    let envs = CoreFactory::build_env_service(
        pool,
        Arc::new(DistributionOracle::new()),
        &config.settings,
    );

    debug!(
        db = %db_path.display(),
        scala = %envs.registrar().host().scala_version,
        "CLI context ready"
    );
    Ok(CliContext { envs })
}

/// Bootstrap with a pre-built service (for testing).
pub fn bootstrap_with(envs: FlinkEnvService) -> CliContext {
    CliContext { envs }
}
