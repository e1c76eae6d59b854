//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Traits are minimal and CRUD-focused for repositories
//! - Installation introspection goes through `CompatibilityOracle`

pub mod compatibility_oracle;
pub mod env_repository;

use thiserror::Error;

pub use compatibility_oracle::{CompatibilityOracle, DistributionInfo, OracleError};
pub use env_repository::FlinkEnvRepository;

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., unique name, single default).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters should map this to their own error types (CLI exit codes, etc.).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed. Passed through unmodified.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Environment validation failed.
    #[error(transparent)]
    Env(#[from] crate::domain::EnvError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// The operation would break a uniqueness rule (e.g., duplicate name).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation error (invalid input or disallowed operation).
    #[error("Validation error: {0}")]
    Validation(String),
}
