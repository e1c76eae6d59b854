//! Flink configuration file handling.
//!
//! - `codec` - reversible compression used for the stored config blob
//! - `parser` - flat key/value view over a config document

mod codec;
mod parser;

use std::fs;
use std::path::{Path, PathBuf};

pub use codec::{compress, decompress};
pub use parser::{ConfMap, parse_flink_conf, parse_legacy};

use crate::domain::EnvError;

/// Config file Flink reads from `<FLINK_HOME>/conf`.
pub const DEFAULT_CONF_FILE_NAME: &str = "flink-conf.yaml";

/// Location of the config file inside an installation.
pub fn conf_file_path(flink_home: &Path, file_name: &str) -> PathBuf {
    flink_home.join("conf").join(file_name)
}

/// Read the raw config text of an installation.
pub fn read_conf_file(flink_home: &Path, file_name: &str) -> Result<String, EnvError> {
    let path = conf_file_path(flink_home, file_name);
    fs::read_to_string(&path).map_err(|source| EnvError::ConfigRead { path, source })
}
