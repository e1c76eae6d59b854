//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use flinkenv_core::{CONF_FILE_NAME_ENV, HOST_SCALA_VERSION_ENV};

use crate::commands::Commands;

/// Command-line interface for managing registered Flink environments.
#[derive(Parser)]
#[command(name = "flinkenv")]
#[command(about = "Register and manage Flink runtime installations")]
#[command(version)]
pub struct Cli {
    /// Scala version of the host, checked against each distribution
    #[arg(long = "scala-version", env = HOST_SCALA_VERSION_ENV, global = true)]
    pub scala_version: Option<String>,

    /// Config file name read from `<FLINK_HOME>/conf`
    #[arg(long = "conf-file", env = CONF_FILE_NAME_ENV, global = true)]
    pub conf_file: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
