//! Update command handler.
//!
//! Re-registers an environment. Options left out keep their current value;
//! the config and versions are always derived again from the installation.

use anyhow::Result;
use flinkenv_core::EnvRegistration;

use super::{install_path, resolve_env};
use crate::bootstrap::CliContext;
use crate::presentation::{EnvSummaryOpts, display_env_summary};

/// Arguments for the update command.
#[derive(Debug, Default)]
pub struct UpdateArgs {
    pub name: Option<String>,
    pub flink_home: Option<String>,
    pub description: Option<String>,
    pub make_default: bool,
}

/// Execute the update command.
pub async fn execute(ctx: &CliContext, identifier: &str, args: UpdateArgs) -> Result<()> {
    let existing = resolve_env(ctx, identifier).await?;

    let flink_home = match args.flink_home.as_deref() {
        Some(raw) => install_path(raw)?,
        None => existing.flink_home.clone(),
    };
    let mut request =
        EnvRegistration::new(args.name.unwrap_or_else(|| existing.name.clone()), flink_home);
    request.description = args.description.or_else(|| existing.description.clone());
    request.set_default = args.make_default;

    let env = ctx.envs().update(existing.id, &request).await?;

    display_env_summary(&env, EnvSummaryOpts::with_title("Flink environment updated:"));
    Ok(())
}
