//! Path utilities for flinkenv data directories and user-supplied locations.
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod database;
mod error;
mod platform;

#[cfg(test)]
pub(crate) mod test_utils;

pub use database::database_path;
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, normalize_user_path};
