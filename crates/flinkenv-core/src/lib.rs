//! Core domain types, config codec and port definitions for flinkenv.
//!
//! A Flink environment is a registered runtime installation. Registering one
//! reads its `conf/flink-conf.yaml`, stores it compressed, asks a
//! [`CompatibilityOracle`] for the Flink and Scala versions, and rejects the
//! installation when its Scala version does not match the host's.
//!
//! Adapters (SQLite persistence, filesystem oracle, CLI) live in sibling crates
//! and plug in through [`ports`].

#![deny(unused_crate_dependencies)]

pub mod conf;
pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use conf::{ConfMap, DEFAULT_CONF_FILE_NAME};
pub use domain::{EnvError, EnvRegistration, FlinkEnv, NewFlinkEnv, VersionTriplet};
pub use paths::{PathError, data_root, database_path, normalize_user_path};
pub use ports::{
    CompatibilityOracle, CoreError, DistributionInfo, FlinkEnvRepository, OracleError,
    RepositoryError,
};
pub use services::{EnvRegistrar, FlinkEnvService, RegistrationState};
pub use settings::{
    CONF_FILE_NAME_ENV, DEFAULT_HOST_SCALA_VERSION, HOST_SCALA_VERSION_ENV, HostRuntime,
    Settings, SettingsError, validate_settings,
};
