//! Default command handler.

use anyhow::Result;

use super::resolve_env;
use crate::bootstrap::CliContext;
use crate::presentation::{EnvSummaryOpts, display_env_summary};

/// Execute the default command.
///
/// Without an identifier, prints the current default environment.
pub async fn execute(ctx: &CliContext, identifier: Option<&str>) -> Result<()> {
    let Some(identifier) = identifier else {
        match ctx.envs().get_default().await? {
            Some(env) => display_env_summary(&env, EnvSummaryOpts::with_title("Default:")),
            None => println!("No default Flink environment set."),
        }
        return Ok(());
    };

    let env = resolve_env(ctx, identifier).await?;
    if env.is_default {
        println!("'{}' is already the default.", env.name);
        return Ok(());
    }

    ctx.envs().set_default(env.id).await?;
    println!("'{}' (ID {}) is now the default Flink environment.", env.name, env.id);
    Ok(())
}
