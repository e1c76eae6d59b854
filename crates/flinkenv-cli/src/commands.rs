//! Main commands enum.
//!
//! Environments are addressed by numeric ID or by name wherever an
//! `identifier` is taken.

use clap::Subcommand;

/// Available commands for managing Flink environments.
#[derive(Subcommand)]
pub enum Commands {
    /// Register a Flink installation
    Add {
        /// Unique name for the environment
        name: String,
        /// Path to the installation (FLINK_HOME)
        flink_home: String,
        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
        /// Make this the default environment
        #[arg(long)]
        default: bool,
    },

    /// Re-register an environment, re-reading its config and versions
    Update {
        /// Environment ID or name
        identifier: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New installation path
        #[arg(long = "home")]
        flink_home: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// Make this the default environment
        #[arg(long)]
        default: bool,
    },

    /// List registered environments
    List,

    /// Show details of one environment
    Show {
        /// Environment ID or name
        identifier: String,
    },

    /// Print the stored Flink configuration
    Conf {
        /// Environment ID or name
        identifier: String,
        /// Print the original file text instead of key/value pairs
        #[arg(long)]
        raw: bool,
    },

    /// Re-read the config file of an environment from disk
    Sync {
        /// Environment ID or name
        identifier: String,
    },

    /// Remove an environment (the installation is left on disk)
    Remove {
        /// Environment ID or name
        identifier: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show the default environment, or set it
    Default {
        /// Environment ID or name to make the default
        identifier: Option<String>,
    },
}
