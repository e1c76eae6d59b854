//! Command handlers that delegate to `FlinkEnvService`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call service methods
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Access repositories directly
//! - Contain registration logic
//! - Manage database connections

pub mod add;
pub mod conf;
pub mod default;
pub mod list;
pub mod remove;
pub mod show;
pub mod sync;
pub mod update;

use std::path::PathBuf;

use flinkenv_core::{CoreError, FlinkEnv, RepositoryError, normalize_user_path};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Look up an environment by numeric ID, falling back to its name.
pub async fn resolve_env(ctx: &CliContext, identifier: &str) -> Result<FlinkEnv, CoreError> {
    let identifier = identifier.trim();
    if let Ok(id) = identifier.parse::<i64>() {
        match ctx.envs().get(id).await {
            Ok(env) => return Ok(env),
            Err(CoreError::Repository(RepositoryError::NotFound(_))) => {}
            Err(e) => return Err(e),
        }
    }
    ctx.envs().get_by_name(identifier).await
}

/// Expand and absolutize an installation path typed by the user.
pub(crate) fn install_path(raw: &str) -> Result<PathBuf, CliError> {
    normalize_user_path(raw).map_err(|e| CliError::Arguments(e.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use flinkenv_core::{CompatibilityOracle, DistributionInfo, OracleError, Settings};
    use flinkenv_db::TestDb;

    use crate::bootstrap::{CliContext, bootstrap_with};

    /// Reads versions from the install directory name, `<anything>-<version>_<scala>`.
    pub struct DirNameOracle;

    impl CompatibilityOracle for DirNameOracle {
        fn inspect(&self, flink_home: &Path) -> Result<DistributionInfo, OracleError> {
            let unrecognized = || OracleError::Unrecognized {
                path: flink_home.to_path_buf(),
                reason: "unexpected directory name".to_string(),
            };
            let dir = flink_home
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(unrecognized)?;
            let (_, versions) = dir.rsplit_once('-').ok_or_else(unrecognized)?;
            let (version, scala) = versions.split_once('_').ok_or_else(unrecognized)?;
            Ok(DistributionInfo {
                version: version.to_string(),
                scala_version: scala.to_string(),
            })
        }
    }

    pub fn install(root: &Path, dir: &str, conf: &str) -> PathBuf {
        let home = root.join(dir);
        fs::create_dir_all(home.join("conf")).unwrap();
        fs::write(home.join("conf").join("flink-conf.yaml"), conf).unwrap();
        home
    }

    pub async fn context(host: &str) -> (CliContext, TestDb) {
        let db = TestDb::new().await.unwrap();
        let settings = Settings {
            host_scala_version: Some(host.to_string()),
            ..Settings::with_defaults()
        };
        let envs = db.env_service(Arc::new(DirNameOracle), &settings);
        (bootstrap_with(envs), db)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{context, install};
    use super::*;
    use flinkenv_core::EnvRegistration;

    #[tokio::test]
    async fn test_resolve_by_id_and_name() {
        let root = tempfile::tempdir().unwrap();
        let home = install(root.path(), "flink-1.14.6_2.12", "rest.port: 8081\n");
        let (ctx, _db) = context("2.12.15").await;
        let env = ctx
            .envs()
            .create(&EnvRegistration::new("streaming", &home))
            .await
            .unwrap();

        assert_eq!(resolve_env(&ctx, &env.id.to_string()).await.unwrap().id, env.id);
        assert_eq!(resolve_env(&ctx, " streaming ").await.unwrap().id, env.id);
        assert!(matches!(
            resolve_env(&ctx, "batch").await,
            Err(CoreError::Repository(RepositoryError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_numeric_name_falls_back_to_name_lookup() {
        let root = tempfile::tempdir().unwrap();
        let home = install(root.path(), "flink-1.14.6_2.12", "rest.port: 8081\n");
        let (ctx, _db) = context("2.12.15").await;
        let env = ctx
            .envs()
            .create(&EnvRegistration::new("2024", &home))
            .await
            .unwrap();

        assert_eq!(resolve_env(&ctx, "2024").await.unwrap().id, env.id);
    }

    #[test]
    fn test_install_path_rejects_blank() {
        assert!(matches!(install_path("  "), Err(CliError::Arguments(_))));
        assert!(install_path("/opt/flink").unwrap().is_absolute());
    }
}
