//! Filesystem implementation of `CompatibilityOracle`.

use std::fs;
use std::path::Path;

use flinkenv_core::ports::{CompatibilityOracle, DistributionInfo, OracleError};
use tracing::debug;

use crate::dist::detect_versions;

/// Oracle that reads versions from the jars in `<FLINK_HOME>/lib`.
#[derive(Debug, Clone, Default)]
pub struct DistributionOracle;

impl DistributionOracle {
    pub const fn new() -> Self {
        Self
    }
}

impl CompatibilityOracle for DistributionOracle {
    fn inspect(&self, flink_home: &Path) -> Result<DistributionInfo, OracleError> {
        if !flink_home.is_dir() {
            return Err(OracleError::NotFound(flink_home.to_path_buf()));
        }

        let lib = flink_home.join("lib");
        if !lib.is_dir() {
            return Err(OracleError::NotFound(lib));
        }

        let entries = fs::read_dir(&lib).map_err(|e| OracleError::Io {
            path: lib.clone(),
            reason: e.to_string(),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| OracleError::Io {
                path: lib.clone(),
                reason: e.to_string(),
            })?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        let detected =
            detect_versions(names.iter().map(String::as_str)).map_err(|e| {
                OracleError::Unrecognized {
                    path: flink_home.to_path_buf(),
                    reason: e.to_string(),
                }
            })?;

        debug!(
            home = %flink_home.display(),
            version = %detected.version,
            scala = %detected.scala_version,
            "Inspected Flink distribution"
        );

        Ok(DistributionInfo {
            version: detected.version,
            scala_version: detected.scala_version,
        })
    }
}
