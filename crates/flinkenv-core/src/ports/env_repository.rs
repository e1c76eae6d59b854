//! Flink environment repository trait definition.
//!
//! This port defines the interface for environment persistence operations.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{FlinkEnv, NewFlinkEnv};

/// Repository for Flink environment persistence.
///
/// # Invariants owned by implementations
///
/// - `name` is unique: inserting or renaming onto an existing name returns
///   `RepositoryError::AlreadyExists`.
/// - At most one environment has `is_default = true`. `set_default`,
///   `insert_as_default` and `update_as_default` must clear the previous
///   default atomically.
#[async_trait]
pub trait FlinkEnvRepository: Send + Sync {
    /// List all environments, oldest first.
    async fn list(&self) -> Result<Vec<FlinkEnv>, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if the environment doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<FlinkEnv, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if no environment has that name.
    async fn get_by_name(&self, name: &str) -> Result<FlinkEnv, RepositoryError>;

    /// The current default environment, if any.
    async fn get_default(&self) -> Result<Option<FlinkEnv>, RepositoryError>;

    /// Insert a validated environment as non-default.
    async fn insert(&self, env: &NewFlinkEnv) -> Result<FlinkEnv, RepositoryError>;

    /// Insert a validated environment and make it the only default.
    async fn insert_as_default(&self, env: &NewFlinkEnv) -> Result<FlinkEnv, RepositoryError>;

    /// Replace the stored fields of an existing environment.
    ///
    /// `is_default` is not changed by this call; use `set_default`.
    async fn update(&self, env: &FlinkEnv) -> Result<(), RepositoryError>;

    /// Replace the stored fields and make `env` the only default, all or nothing.
    async fn update_as_default(&self, env: &FlinkEnv) -> Result<(), RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if the environment doesn't exist.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Make `id` the only default environment.
    async fn set_default(&self, id: i64) -> Result<(), RepositoryError>;
}
