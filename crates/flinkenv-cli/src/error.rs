//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` to exit codes and user-facing messages.

use flinkenv_core::{CoreError, EnvError, RepositoryError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The named environment does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The installation cannot run on this host or is unreadable as a Flink distribution.
    #[error("{0}")]
    Incompatible(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,     // EX_USAGE
            Self::Incompatible(_) => 65, // EX_DATAERR
            Self::NotFound(_) => 66,     // EX_NOINPUT
            Self::Database(_) => 73,     // EX_CANTCREAT (closest fit)
            Self::Io(_) => 74,           // EX_IOERR
            Self::Config(_) => 78,       // EX_CONFIG
        }
    }

    fn from_core(err: &CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::NotFound(msg)) => Self::NotFound(msg.clone()),
            CoreError::Repository(RepositoryError::AlreadyExists(msg)) => Self::Core(msg.clone()),
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Env(env_err) => Self::from_env(env_err),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Conflict(msg) => Self::Core(msg.clone()),
            CoreError::Validation(msg) => Self::Arguments(msg.clone()),
        }
    }

    fn from_env(err: &EnvError) -> Self {
        match err {
            EnvError::ConfigRead { .. } | EnvError::Io(_) => Self::Io(err.to_string()),
            EnvError::VersionMismatch { .. }
            | EnvError::MalformedVersion(_)
            | EnvError::Oracle(_) => Self::Incompatible(err.to_string()),
            EnvError::InvalidInput(msg) => Self::Arguments(msg.clone()),
            EnvError::Codec(msg) => Self::Core(msg.clone()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from_core(&err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error bubbled up to `main`.
///
/// Looks through the `anyhow` chain for a `CliError` or `CoreError`; anything
/// else is a general failure.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return cli.exit_code();
        }
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return CliError::from_core(core).exit_code();
        }
    }
    1
}
