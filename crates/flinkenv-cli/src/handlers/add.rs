//! Add command handler.
//!
//! Registers a Flink installation: its config is read and stored, its
//! versions are derived and checked against the host.

use anyhow::Result;
use flinkenv_core::EnvRegistration;

use super::install_path;
use crate::bootstrap::CliContext;
use crate::presentation::{EnvSummaryOpts, display_env_summary};

/// Execute the add command.
pub async fn execute(
    ctx: &CliContext,
    name: &str,
    flink_home: &str,
    description: Option<String>,
    make_default: bool,
) -> Result<()> {
    let mut request = EnvRegistration::new(name, install_path(flink_home)?);
    request.description = description;
    request.set_default = make_default;

    let env = ctx.envs().create(&request).await?;

    display_env_summary(&env, EnvSummaryOpts::with_title("Flink environment added:"));
    Ok(())
}
