//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod env_display;
pub mod tables;

pub use env_display::{EnvSummaryOpts, display_env_summary, summary_lines};
pub use tables::{format_optional, print_separator, truncate_string};
