//! Show command handler.

use anyhow::Result;

use super::resolve_env;
use crate::bootstrap::CliContext;
use crate::presentation::{EnvSummaryOpts, display_env_summary};

/// Execute the show command.
pub async fn execute(ctx: &CliContext, identifier: &str) -> Result<()> {
    let env = resolve_env(ctx, identifier).await?;
    display_env_summary(&env, EnvSummaryOpts::detailed());
    Ok(())
}
