//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, NaiveDateTime, Utc};
use flinkenv_core::{FlinkEnv, RepositoryError};
use sqlx::Row;
use std::path::PathBuf;

/// Shared SELECT column list for environment queries.
pub const FLINK_ENV_SELECT_COLUMNS: &str =
    "id, name, flink_home, flink_conf, description, scala_version, version, is_default, created_at";

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Render a timestamp the way it is stored in `created_at`.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parse a stored timestamp, tolerating a trailing " UTC".
pub fn parse_datetime(datetime_str: &str) -> Option<DateTime<Utc>> {
    let trimmed = datetime_str.trim_end_matches(" UTC");
    NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        .ok()
}

/// Parse a database row into a `FlinkEnv`.
pub fn row_to_flink_env(row: &sqlx::sqlite::SqliteRow) -> Result<FlinkEnv, RepositoryError> {
    let created_at_str: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;
    let created_at = parse_datetime(&created_at_str).ok_or_else(|| {
        RepositoryError::Serialization(format!("invalid created_at: {created_at_str}"))
    })?;

    Ok(FlinkEnv {
        id: row
            .try_get::<i64, _>("id")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        flink_home: PathBuf::from(
            row.try_get::<String, _>("flink_home")
                .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        ),
        flink_conf: row
            .try_get("flink_conf")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        description: row
            .try_get("description")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        scala_version: row
            .try_get("scala_version")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        version: row
            .try_get("version")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        is_default: row
            .try_get::<i64, _>("is_default")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            != 0,
        created_at,
    })
}
