//! Remove command handler.
//!
//! Removes a Flink environment from the database. The installation
//! itself remains on disk unchanged.

use anyhow::Result;

use super::resolve_env;
use crate::bootstrap::CliContext;
use crate::presentation::{EnvSummaryOpts, display_env_summary};
use crate::utils::input;

/// Execute the remove command.
///
/// Unless `force` is set, shows the environment and asks for confirmation.
/// The default environment is refused by the service.
pub async fn execute(ctx: &CliContext, identifier: &str, force: bool) -> Result<()> {
    let env = resolve_env(ctx, identifier).await?;

    if !force {
        display_env_summary(&env, EnvSummaryOpts::for_removal());
        println!();

        let confirm = input::prompt_confirmation(
            "Are you sure you want to remove this environment from the database?",
        )?;
        if !confirm {
            println!("Remove operation cancelled.");
            return Ok(());
        }
    }

    ctx.envs().remove(env.id).await?;

    println!(
        "Flink environment '{}' (ID {}) removed. Files under {} were not touched.",
        env.name,
        env.id,
        env.flink_home.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{context, install};
    use flinkenv_core::{CoreError, EnvRegistration};

    #[tokio::test]
    async fn test_remove_refuses_default_then_succeeds() {
        let root = tempfile::tempdir().unwrap();
        let a = install(root.path(), "flink-1.14.6_2.12", "rest.port: 8081\n");
        let b = install(root.path(), "flink-1.15.4_2.12", "rest.port: 8082\n");
        let (ctx, _db) = context("2.12.15").await;
        ctx.envs().create(&EnvRegistration::new("a", &a)).await.unwrap();
        ctx.envs().create(&EnvRegistration::new("b", &b)).await.unwrap();

        let err = execute(&ctx, "a", true).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::Validation(_))
        ));

        execute(&ctx, "b", true).await.unwrap();
        let names: Vec<_> = ctx
            .envs()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a".to_string()]);
    }
}
