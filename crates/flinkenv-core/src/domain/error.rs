//! Environment validation errors.
//!
//! Every variant is fail-fast: it describes a misconfigured installation,
//! not a transient condition, and aborts the registration in progress.

use std::path::PathBuf;

use thiserror::Error;

use crate::ports::OracleError;

/// Errors raised while validating or reading a Flink environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The runtime configuration file is missing, unreadable, or not UTF-8 text.
    #[error("Failed to read Flink configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O failure during registration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The distribution was built for a Scala version the host cannot load.
    #[error(
        "The current Scala version of the host is {host}, but the Scala version of the Flink \
         distribution to be added is {required}, which does not match"
    )]
    VersionMismatch { host: String, required: String },

    /// A version string does not have exactly three components.
    #[error("Malformed Flink version: {0:?} (expected major.minor.patch)")]
    MalformedVersion(String),

    /// The compressed configuration blob could not be encoded or decoded.
    #[error("Config codec error: {0}")]
    Codec(String),

    /// Required registration input is missing or blank.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The compatibility oracle could not inspect the installation.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
