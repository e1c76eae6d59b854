//! `SQLite` implementation of the Flink environment repository.
//!
//! Name uniqueness and the single-default rule are both enforced by unique
//! indexes (see `setup.rs`). Default changes run in a transaction so the old
//! default is cleared and the new one set in one step.

use std::path::Path;

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use flinkenv_core::{FlinkEnv, FlinkEnvRepository, NewFlinkEnv, RepositoryError};

use super::row_mappers::{FLINK_ENV_SELECT_COLUMNS, format_datetime, row_to_flink_env};

/// `SQLite` implementation of the Flink environment repository.
pub struct SqliteFlinkEnvRepository {
    pool: SqlitePool,
}

impl SqliteFlinkEnvRepository {
    /// Create a new `SQLite` environment repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>, RepositoryError> {
        self.pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }

    async fn insert_in(
        tx: &mut Transaction<'static, Sqlite>,
        env: &NewFlinkEnv,
        is_default: bool,
    ) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO flink_envs (
                name, flink_home, flink_conf, description,
                scala_version, version, is_default, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&env.name)
        .bind(home_text(&env.flink_home)?)
        .bind(&env.flink_conf)
        .bind(&env.description)
        .bind(&env.scala_version)
        .bind(&env.version)
        .bind(i64::from(is_default))
        .bind(format_datetime(&env.created_at))
        .execute(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error(e, &env.name))?;

        Ok(result.last_insert_rowid())
    }

    async fn insert_with(
        &self,
        env: &NewFlinkEnv,
        is_default: bool,
    ) -> Result<FlinkEnv, RepositoryError> {
        let mut tx = self.begin().await?;

        if is_default {
            clear_default(&mut tx).await?;
        }
        let id = Self::insert_in(&mut tx, env, is_default).await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        debug!(id, name = %env.name, is_default, "Inserted Flink environment");
        Ok(FlinkEnv::from_new(id, env.clone(), is_default))
    }

    /// Rewrite the stored fields of `env`; `make_default` also moves the
    /// default onto it inside the same transaction.
    async fn update_with(
        &self,
        env: &FlinkEnv,
        make_default: bool,
    ) -> Result<(), RepositoryError> {
        let home = home_text(&env.flink_home)?;
        let mut tx = self.begin().await?;

        if make_default {
            clear_default(&mut tx).await?;
        }
        let result = sqlx::query(
            r#"
            UPDATE flink_envs SET
                name = ?, flink_home = ?, flink_conf = ?, description = ?,
                scala_version = ?, version = ?, is_default = (is_default OR ?)
            WHERE id = ?
            "#,
        )
        .bind(&env.name)
        .bind(home)
        .bind(&env.flink_conf)
        .bind(&env.description)
        .bind(&env.scala_version)
        .bind(&env.version)
        .bind(i64::from(make_default))
        .bind(env.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(e, &env.name))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Flink environment {}",
                env.id
            )));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        debug!(id = env.id, name = %env.name, make_default, "Updated Flink environment");
        Ok(())
    }
}

/// Paths are stored as text; anything that is not UTF-8 cannot round-trip.
fn home_text(path: &Path) -> Result<&str, RepositoryError> {
    path.to_str().ok_or_else(|| {
        RepositoryError::Serialization(format!(
            "Flink home {} is not valid UTF-8",
            path.display()
        ))
    })
}

async fn clear_default(tx: &mut Transaction<'static, Sqlite>) -> Result<(), RepositoryError> {
    sqlx::query("UPDATE flink_envs SET is_default = 0 WHERE is_default = 1")
        .execute(&mut **tx)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;
    Ok(())
}

/// Map unique index violations onto repository errors.
fn map_sqlx_error(e: sqlx::Error, name: &str) -> RepositoryError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") {
        if msg.contains("flink_envs.name") {
            return RepositoryError::AlreadyExists(format!(
                "Flink environment '{name}' already exists"
            ));
        }
        if msg.contains("flink_envs.is_default") {
            return RepositoryError::Constraint(
                "only one Flink environment can be the default".to_string(),
            );
        }
        return RepositoryError::Constraint(msg);
    }
    RepositoryError::Storage(msg)
}

#[async_trait]
impl FlinkEnvRepository for SqliteFlinkEnvRepository {
    async fn list(&self) -> Result<Vec<FlinkEnv>, RepositoryError> {
        let query = format!("SELECT {FLINK_ENV_SELECT_COLUMNS} FROM flink_envs ORDER BY id ASC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_flink_env).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<FlinkEnv, RepositoryError> {
        let query = format!("SELECT {FLINK_ENV_SELECT_COLUMNS} FROM flink_envs WHERE id = ?");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        match row {
            Some(row) => row_to_flink_env(&row),
            None => Err(RepositoryError::NotFound(format!("Flink environment {id}"))),
        }
    }

    async fn get_by_name(&self, name: &str) -> Result<FlinkEnv, RepositoryError> {
        let query = format!("SELECT {FLINK_ENV_SELECT_COLUMNS} FROM flink_envs WHERE name = ?");
        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        match row {
            Some(row) => row_to_flink_env(&row),
            None => Err(RepositoryError::NotFound(format!(
                "Flink environment '{name}'"
            ))),
        }
    }

    async fn get_default(&self) -> Result<Option<FlinkEnv>, RepositoryError> {
        let query =
            format!("SELECT {FLINK_ENV_SELECT_COLUMNS} FROM flink_envs WHERE is_default = 1");
        let row = sqlx::query(&query)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row.as_ref().map(row_to_flink_env).transpose()
    }

    async fn insert(&self, env: &NewFlinkEnv) -> Result<FlinkEnv, RepositoryError> {
        self.insert_with(env, false).await
    }

    async fn insert_as_default(&self, env: &NewFlinkEnv) -> Result<FlinkEnv, RepositoryError> {
        self.insert_with(env, true).await
    }

    async fn update(&self, env: &FlinkEnv) -> Result<(), RepositoryError> {
        self.update_with(env, false).await
    }

    async fn update_as_default(&self, env: &FlinkEnv) -> Result<(), RepositoryError> {
        self.update_with(env, true).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM flink_envs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Flink environment {id}")));
        }

        Ok(())
    }

    async fn set_default(&self, id: i64) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;

        clear_default(&mut tx).await?;
        let result = sqlx::query("UPDATE flink_envs SET is_default = 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        // Dropping the transaction rolls back the cleared default
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Flink environment {id}")));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        debug!(id, "Default Flink environment set");
        Ok(())
    }
}
