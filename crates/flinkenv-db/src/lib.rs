//! `SQLite` persistence for flinkenv.
//!
//! Implements `FlinkEnvRepository` and owns the two collection-wide rules
//! the core delegates to storage: unique environment names and a single
//! default environment.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// libsqlite3-sys is only here to pin the bundled SQLite build
use libsqlite3_sys as _;

// Re-export factory for convenient access
pub use factory::CoreFactory;

#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::SqliteFlinkEnvRepository;

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
