//! Flink environment domain types.
//!
//! A Flink environment is one registered runtime installation. Its config
//! blob and versions are derived from the installation at registration time
//! and never edited field by field afterwards.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::EnvError;
use super::version::{VersionTriplet, is_scala_version};
use crate::conf::{self, ConfMap};
use crate::ports::{CompatibilityOracle, OracleError};
use crate::settings::HostRuntime;

// ─────────────────────────────────────────────────────────────────────────────
// Registration Request
// ─────────────────────────────────────────────────────────────────────────────

/// Operator input for registering (or re-registering) an installation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvRegistration {
    /// Human-chosen label, unique among environments.
    pub name: String,
    /// Filesystem path of the Flink distribution (`FLINK_HOME`).
    pub flink_home: PathBuf,
    /// Free text.
    pub description: Option<String>,
    /// Promote this environment to the default after registration.
    #[serde(default)]
    pub set_default: bool,
}

impl EnvRegistration {
    pub fn new(name: impl Into<String>, flink_home: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            flink_home: flink_home.into(),
            description: None,
            set_default: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.set_default = true;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment Types
// ─────────────────────────────────────────────────────────────────────────────

/// A persisted Flink environment.
///
/// Use `NewFlinkEnv` for environments that are still being validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlinkEnv {
    /// Database ID, assigned at insert.
    pub id: i64,
    /// Unique human-readable name.
    pub name: String,
    /// Installation path (`FLINK_HOME`).
    pub flink_home: PathBuf,
    /// Compressed `flink-conf.yaml` content.
    pub flink_conf: String,
    pub description: Option<String>,
    /// Scala version the distribution was built for (e.g. "2.12").
    pub scala_version: String,
    /// Flink version as `major.minor.patch`.
    pub version: String,
    /// Whether this is the environment used when a job names none.
    pub is_default: bool,
    /// UTC timestamp of when the environment was registered.
    pub created_at: DateTime<Utc>,
}

/// A validated environment that has not been persisted yet.
///
/// After insertion, the repository returns a `FlinkEnv` with the assigned ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlinkEnv {
    pub name: String,
    pub flink_home: PathBuf,
    pub flink_conf: String,
    pub description: Option<String>,
    pub scala_version: String,
    pub version: String,
    pub created_at: DateTime<Utc>,
}

impl NewFlinkEnv {
    /// Start an unregistered environment; config and versions are empty until
    /// [`load_conf`](Self::load_conf) and [`derive_version`](Self::derive_version) run.
    pub fn new(
        name: impl Into<String>,
        flink_home: impl Into<PathBuf>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            flink_home: flink_home.into(),
            flink_conf: String::new(),
            description: None,
            scala_version: String::new(),
            version: String::new(),
            created_at,
        }
    }

    /// Read `<flink_home>/conf/<conf_file_name>` and store it compressed.
    pub fn load_conf(&mut self, conf_file_name: &str) -> Result<(), EnvError> {
        let text = conf::read_conf_file(&self.flink_home, conf_file_name)?;
        self.flink_conf = conf::compress(&text)?;
        debug!(
            home = %self.flink_home.display(),
            raw_len = text.len(),
            blob_len = self.flink_conf.len(),
            "Loaded Flink config"
        );
        Ok(())
    }

    /// Ask the oracle for the distribution's versions and check that the host
    /// can run it.
    ///
    /// The host Scala version must start with the distribution's Scala version
    /// (`2.12.15` accepts `2.12`, rejects `2.11`).
    pub fn derive_version(
        &mut self,
        oracle: &dyn CompatibilityOracle,
        host: &HostRuntime,
    ) -> Result<(), EnvError> {
        let info = oracle.inspect(&self.flink_home)?;
        let version = VersionTriplet::parse(&info.version)?;
        if !is_scala_version(&info.scala_version) {
            return Err(OracleError::Unrecognized {
                path: self.flink_home.clone(),
                reason: format!("invalid Scala version {:?}", info.scala_version),
            }
            .into());
        }

        self.version = version.to_string();
        self.scala_version.clone_from(&info.scala_version);

        if !host.scala_version.starts_with(&info.scala_version) {
            return Err(EnvError::VersionMismatch {
                host: host.scala_version.clone(),
                required: info.scala_version,
            });
        }

        Ok(())
    }

    pub fn conf_text(&self) -> Result<String, EnvError> {
        conf::decompress(&self.flink_conf)
    }

    pub fn conf_map(&self) -> Result<ConfMap, EnvError> {
        Ok(conf::parse_flink_conf(&self.conf_text()?))
    }
}

impl FlinkEnv {
    /// Build the persisted form of a validated environment.
    pub fn from_new(id: i64, env: NewFlinkEnv, is_default: bool) -> Self {
        Self {
            id,
            name: env.name,
            flink_home: env.flink_home,
            flink_conf: env.flink_conf,
            description: env.description,
            scala_version: env.scala_version,
            version: env.version,
            is_default,
            created_at: env.created_at,
        }
    }

    /// Replace every registered field with a freshly validated registration.
    ///
    /// `id`, `created_at` and `is_default` are kept.
    pub fn replace_with(&mut self, env: NewFlinkEnv) {
        self.name = env.name;
        self.flink_home = env.flink_home;
        self.flink_conf = env.flink_conf;
        self.description = env.description;
        self.scala_version = env.scala_version;
        self.version = env.version;
    }

    /// Decompressed config text. The stored blob is left untouched.
    pub fn conf_text(&self) -> Result<String, EnvError> {
        conf::decompress(&self.flink_conf)
    }

    /// Config as a flat key/value map.
    pub fn conf_map(&self) -> Result<ConfMap, EnvError> {
        Ok(conf::parse_flink_conf(&self.conf_text()?))
    }

    /// Parsed version, validating the component count.
    pub fn version_triplet(&self) -> Result<VersionTriplet, EnvError> {
        VersionTriplet::parse(&self.version)
    }

    /// `major.minor` (e.g. "1.13" for "1.13.2").
    pub fn major_minor(&self) -> Result<String, EnvError> {
        Ok(self.version_triplet()?.major_minor())
    }

    pub fn component_at(&self, index: usize) -> Result<String, EnvError> {
        self.version_triplet()?
            .component_at(index)
            .map(ToString::to_string)
    }

    pub fn major(&self) -> Result<String, EnvError> {
        self.component_at(0)
    }

    pub fn minor(&self) -> Result<String, EnvError> {
        self.component_at(1)
    }

    pub fn patch(&self) -> Result<String, EnvError> {
        self.component_at(2)
    }
}
