//! Sync command handler.
//!
//! Re-reads the config file of an environment from its installation. The
//! versions are left alone; use `update` to re-derive them.

use anyhow::Result;

use super::resolve_env;
use crate::bootstrap::CliContext;

/// Execute the sync command.
pub async fn execute(ctx: &CliContext, identifier: &str) -> Result<()> {
    let env = resolve_env(ctx, identifier).await?;
    let synced = ctx.envs().sync_conf(env.id).await?;

    println!(
        "Synced config of '{}' ({} entries).",
        synced.name,
        synced.conf_map()?.len()
    );
    Ok(())
}
