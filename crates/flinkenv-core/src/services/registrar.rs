//! Environment registration.
//!
//! Validation runs as a small state machine:
//!
//! ```text
//! Unregistered -> Validating -> Registered
//!                           \-> Rejected
//! ```
//!
//! `Validating` reads the config file first and asks the oracle second; the
//! first failure rejects the registration. The registrar never persists
//! anything, so a rejected registration leaves no trace.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::conf;
use crate::domain::{EnvError, EnvRegistration, FlinkEnv, NewFlinkEnv};
use crate::ports::CompatibilityOracle;
use crate::settings::{HostRuntime, Settings};

/// Registration progress, reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Validating,
    Registered,
    Rejected,
}

impl fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unregistered => "unregistered",
            Self::Validating => "validating",
            Self::Registered => "registered",
            Self::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// Validates registration requests into `NewFlinkEnv` values.
pub struct EnvRegistrar {
    oracle: Arc<dyn CompatibilityOracle>,
    host: HostRuntime,
    conf_file_name: String,
}

impl EnvRegistrar {
    pub fn new(
        oracle: Arc<dyn CompatibilityOracle>,
        host: HostRuntime,
        conf_file_name: impl Into<String>,
    ) -> Self {
        Self {
            oracle,
            host,
            conf_file_name: conf_file_name.into(),
        }
    }

    /// Build a registrar from resolved settings.
    pub fn from_settings(oracle: Arc<dyn CompatibilityOracle>, settings: &Settings) -> Self {
        Self::new(
            oracle,
            settings.host_runtime(),
            settings.effective_conf_file_name(),
        )
    }

    pub fn host(&self) -> &HostRuntime {
        &self.host
    }

    pub fn conf_file_name(&self) -> &str {
        &self.conf_file_name
    }

    /// Validate a registration request.
    ///
    /// Returns a fully derived `NewFlinkEnv` or the first error hit.
    pub fn validate(&self, request: &EnvRegistration) -> Result<NewFlinkEnv, EnvError> {
        let mut state = RegistrationState::Unregistered;
        debug!(name = %request.name, %state, "Registration requested");

        let name = request.name.trim();
        if name.is_empty() {
            return Err(reject(EnvError::InvalidInput(
                "environment name cannot be empty".to_string(),
            )));
        }
        if request.flink_home.as_os_str().is_empty() {
            return Err(reject(EnvError::InvalidInput(
                "Flink home cannot be empty".to_string(),
            )));
        }
        if request.flink_home.to_str().is_none() {
            return Err(reject(EnvError::InvalidInput(format!(
                "Flink home {} is not valid UTF-8",
                request.flink_home.display()
            ))));
        }

        state = RegistrationState::Validating;
        debug!(name, home = %request.flink_home.display(), %state, "Validating installation");

        let mut env = NewFlinkEnv::new(name, request.flink_home.clone(), Utc::now());
        env.description = request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string);

        env.load_conf(&self.conf_file_name).map_err(reject)?;
        env.derive_version(self.oracle.as_ref(), &self.host)
            .map_err(reject)?;

        state = RegistrationState::Registered;
        info!(
            name,
            version = %env.version,
            scala = %env.scala_version,
            %state,
            "Flink environment validated"
        );
        Ok(env)
    }

    /// Re-read the config file of a registered environment.
    ///
    /// Returns the new compressed blob.
    pub fn reload_conf(&self, env: &FlinkEnv) -> Result<String, EnvError> {
        let text = conf::read_conf_file(&env.flink_home, &self.conf_file_name)?;
        conf::compress(&text)
    }
}

fn reject(err: EnvError) -> EnvError {
    warn!(state = %RegistrationState::Rejected, error = %err, "Registration rejected");
    err
}
