//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, CLI, etc.).
//!
//! # Structure
//!
//! - `env` - Flink environment types (`FlinkEnv`, `NewFlinkEnv`, `EnvRegistration`)
//! - `version` - validated `major.minor.patch` triplet
//! - `error` - validation errors shared by the above

mod env;
mod error;
mod version;

pub use env::{EnvRegistration, FlinkEnv, NewFlinkEnv};
pub use error::EnvError;
pub use version::{VersionTriplet, is_scala_version};
