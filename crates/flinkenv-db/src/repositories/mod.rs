//! `SQLite` repository implementations.

mod row_mappers;
mod sqlite_flink_env_repository;

pub use sqlite_flink_env_repository::SqliteFlinkEnvRepository;
