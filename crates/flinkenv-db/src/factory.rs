//! Composition utilities for building `FlinkEnvService` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the application
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use flinkenv_core::{CompatibilityOracle, EnvRegistrar, FlinkEnvService, Settings};

use crate::repositories::SqliteFlinkEnvRepository;

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a `SQLite` connection pool.
    ///
    /// # Arguments
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:/var/lib/flinkenv/flinkenv.db")
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Create an environment repository from a pool.
    pub fn env_repository(pool: SqlitePool) -> Arc<SqliteFlinkEnvRepository> {
        Arc::new(SqliteFlinkEnvRepository::new(pool))
    }

    /// Build a complete `FlinkEnvService` from a pool, an oracle and settings.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use flinkenv_db::{CoreFactory, setup_database};
    /// use flinkenv_runtime::DistributionOracle;
    ///
    /// let pool = setup_database(&db_path).await?;
    /// let service = CoreFactory::build_env_service(
    ///     pool,
    ///     Arc::new(DistributionOracle::new()),
    ///     &Settings::with_defaults(),
    /// );
    /// ```
    pub fn build_env_service(
        pool: SqlitePool,
        oracle: Arc<dyn CompatibilityOracle>,
        settings: &Settings,
    ) -> FlinkEnvService {
        let registrar = EnvRegistrar::from_settings(oracle, settings);
        FlinkEnvService::new(Self::env_repository(pool), registrar)
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with full schema already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn env_repository(&self) -> SqliteFlinkEnvRepository {
        SqliteFlinkEnvRepository::new(self.pool.clone())
    }

    /// Build a service over this database.
    pub fn env_service(
        &self,
        oracle: Arc<dyn CompatibilityOracle>,
        settings: &Settings,
    ) -> FlinkEnvService {
        CoreFactory::build_env_service(self.pool.clone(), oracle, settings)
    }
}
