//! Settings domain types and validation.
//!
//! This module contains the registration settings used across the application.
//! These are pure domain types with no infrastructure dependencies; adapters
//! decide where values come from (environment, flags, `.env`).

use serde::{Deserialize, Serialize};

use crate::conf::DEFAULT_CONF_FILE_NAME;
use crate::domain::is_scala_version;

/// Scala version the host was built against when nothing overrides it.
pub const DEFAULT_HOST_SCALA_VERSION: &str = "2.12.15";

/// Environment variable read by the CLI for the host Scala version.
pub const HOST_SCALA_VERSION_ENV: &str = "FLINKENV_SCALA_VERSION";

/// Environment variable read by the CLI for the config file name.
pub const CONF_FILE_NAME_ENV: &str = "FLINKENV_CONF_FILE";

/// The host's own secondary-language runtime.
///
/// Passed explicitly into the compatibility check so callers (and tests)
/// choose the value instead of reading a process global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRuntime {
    /// Full Scala version, e.g. "2.12.15".
    pub scala_version: String,
}

impl HostRuntime {
    pub fn new(scala_version: impl Into<String>) -> Self {
        Self {
            scala_version: scala_version.into(),
        }
    }
}

impl Default for HostRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_SCALA_VERSION)
    }
}

/// Registration settings.
///
/// All fields are optional to support partial configuration and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// File name read from `<FLINK_HOME>/conf`.
    pub conf_file_name: Option<String>,

    /// Host Scala version used for the compatibility gate.
    pub host_scala_version: Option<String>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            conf_file_name: Some(DEFAULT_CONF_FILE_NAME.to_string()),
            host_scala_version: Some(DEFAULT_HOST_SCALA_VERSION.to_string()),
        }
    }

    /// Get the effective config file name (with default fallback).
    pub fn effective_conf_file_name(&self) -> &str {
        self.conf_file_name
            .as_deref()
            .unwrap_or(DEFAULT_CONF_FILE_NAME)
    }

    /// Get the effective host runtime (with default fallback).
    pub fn host_runtime(&self) -> HostRuntime {
        self.host_scala_version
            .as_deref()
            .map_or_else(HostRuntime::default, HostRuntime::new)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file name cannot be empty")]
    EmptyConfFileName,

    #[error("Config file name must not contain path separators, got {0:?}")]
    ConfFileNameHasSeparator(String),

    #[error("Host Scala version must look like 2.12 or 2.12.15, got {0:?}")]
    InvalidScalaVersion(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(name) = &settings.conf_file_name {
        if name.trim().is_empty() {
            return Err(SettingsError::EmptyConfFileName);
        }
        if name.contains('/') || name.contains('\\') {
            return Err(SettingsError::ConfFileNameHasSeparator(name.clone()));
        }
    }

    if let Some(version) = &settings.host_scala_version {
        if !is_scala_version(version) {
            return Err(SettingsError::InvalidScalaVersion(version.clone()));
        }
    }

    Ok(())
}
