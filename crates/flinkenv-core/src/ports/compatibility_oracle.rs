//! Compatibility oracle port definition.
//!
//! The oracle inspects an installation path and reports which Flink version
//! it contains and which Scala version it was built for. It performs I/O and
//! is injected wherever versions are derived; records never cache one.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Versions reported for one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionInfo {
    /// Flink version, expected as `major.minor.patch`.
    pub version: String,
    /// Scala binary version, e.g. "2.11" or "2.12".
    pub scala_version: String,
}

/// Errors that can occur while inspecting an installation.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The installation path or a required subdirectory does not exist.
    #[error("Flink installation not found: {0}")]
    NotFound(PathBuf),

    /// The path exists but does not look like a Flink distribution.
    #[error("Unrecognized Flink distribution at {path}: {reason}")]
    Unrecognized { path: PathBuf, reason: String },

    /// IO error while inspecting the installation.
    #[error("IO error inspecting {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

/// Port for deriving version metadata from an installation.
///
/// Implementations live in `flinkenv-runtime`.
pub trait CompatibilityOracle: Send + Sync {
    /// Inspect the installation rooted at `flink_home`.
    fn inspect(&self, flink_home: &Path) -> Result<DistributionInfo, OracleError>;
}
