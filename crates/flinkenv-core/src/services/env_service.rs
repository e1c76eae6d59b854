//! Flink environment service - orchestrates registration and persistence.

use std::sync::Arc;

use tracing::info;

use super::registrar::EnvRegistrar;
use crate::domain::{EnvRegistration, FlinkEnv};
use crate::ports::{CoreError, FlinkEnvRepository, RepositoryError};

/// Service for managing registered Flink environments.
///
/// Validation goes through `EnvRegistrar`; the repository owns name
/// uniqueness and the single-default rule and its errors pass through as-is.
pub struct FlinkEnvService {
    repo: Arc<dyn FlinkEnvRepository>,
    registrar: EnvRegistrar,
}

impl FlinkEnvService {
    /// Create a new environment service.
    pub fn new(repo: Arc<dyn FlinkEnvRepository>, registrar: EnvRegistrar) -> Self {
        Self { repo, registrar }
    }

    pub fn registrar(&self) -> &EnvRegistrar {
        &self.registrar
    }

    /// List all environments.
    pub async fn list(&self) -> Result<Vec<FlinkEnv>, CoreError> {
        self.repo.list().await.map_err(CoreError::from)
    }

    /// Get an environment by ID.
    pub async fn get(&self, id: i64) -> Result<FlinkEnv, CoreError> {
        self.repo.get_by_id(id).await.map_err(CoreError::from)
    }

    /// Get an environment by name.
    pub async fn get_by_name(&self, name: &str) -> Result<FlinkEnv, CoreError> {
        self.repo.get_by_name(name).await.map_err(CoreError::from)
    }

    /// Find an environment by name, returning None if not found.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<FlinkEnv>, CoreError> {
        match self.repo.get_by_name(name).await {
            Ok(env) => Ok(Some(env)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(CoreError::Repository(e)),
        }
    }

    /// Whether an environment with this name is registered.
    pub async fn exists(&self, name: &str) -> Result<bool, CoreError> {
        Ok(self.find_by_name(name.trim()).await?.is_some())
    }

    /// The current default environment, if any.
    pub async fn get_default(&self) -> Result<Option<FlinkEnv>, CoreError> {
        self.repo.get_default().await.map_err(CoreError::from)
    }

    /// Register a new environment.
    ///
    /// The first environment ever registered becomes the default.
    pub async fn create(&self, request: &EnvRegistration) -> Result<FlinkEnv, CoreError> {
        if self.exists(&request.name).await? {
            return Err(CoreError::Conflict(format!(
                "Flink environment '{}' already exists",
                request.name.trim()
            )));
        }

        let env = self.registrar.validate(request)?;
        let make_default = request.set_default || self.repo.get_default().await?.is_none();

        let created = if make_default {
            self.repo.insert_as_default(&env).await?
        } else {
            self.repo.insert(&env).await?
        };

        info!(
            id = created.id,
            name = %created.name,
            version = %created.version,
            default = created.is_default,
            "Registered Flink environment"
        );
        Ok(created)
    }

    /// Re-register an existing environment, replacing all derived state.
    pub async fn update(
        &self,
        id: i64,
        request: &EnvRegistration,
    ) -> Result<FlinkEnv, CoreError> {
        let mut existing = self.repo.get_by_id(id).await?;

        if let Some(other) = self.find_by_name(request.name.trim()).await? {
            if other.id != id {
                return Err(CoreError::Conflict(format!(
                    "Flink environment '{}' already exists",
                    other.name
                )));
            }
        }

        let env = self.registrar.validate(request)?;
        existing.replace_with(env);
        if request.set_default && !existing.is_default {
            self.repo.update_as_default(&existing).await?;
        } else {
            self.repo.update(&existing).await?;
        }

        info!(id, name = %existing.name, version = %existing.version, "Updated Flink environment");
        self.get(id).await
    }

    /// Re-read the config file of an environment from its installation.
    pub async fn sync_conf(&self, id: i64) -> Result<FlinkEnv, CoreError> {
        let mut env = self.repo.get_by_id(id).await?;
        env.flink_conf = self.registrar.reload_conf(&env)?;
        self.repo.update(&env).await?;

        info!(id, name = %env.name, "Synced Flink config");
        Ok(env)
    }

    /// Make `id` the default environment.
    pub async fn set_default(&self, id: i64) -> Result<(), CoreError> {
        self.repo.set_default(id).await?;
        info!(id, "Default Flink environment changed");
        Ok(())
    }

    /// Remove an environment.
    ///
    /// The default environment cannot be removed; promote another one first.
    pub async fn remove(&self, id: i64) -> Result<(), CoreError> {
        let env = self.repo.get_by_id(id).await?;
        if env.is_default {
            return Err(CoreError::Validation(format!(
                "Flink environment '{}' is the default, set another default before removing it",
                env.name
            )));
        }

        self.repo.delete(id).await?;
        info!(id, name = %env.name, "Removed Flink environment");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EnvError, NewFlinkEnv};
    use crate::ports::{CompatibilityOracle, DistributionInfo, OracleError};
    use crate::settings::HostRuntime;
    use async_trait::async_trait;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory repository enforcing the same invariants as the SQLite one.
    #[derive(Default)]
    struct MemoryRepo {
        envs: Mutex<Vec<FlinkEnv>>,
        next_id: Mutex<i64>,
        set_default_calls: AtomicUsize,
    }

    impl MemoryRepo {
        fn push(&self, env: &NewFlinkEnv, is_default: bool) -> Result<FlinkEnv, RepositoryError> {
            let mut envs = self.envs.lock().unwrap();
            if envs.iter().any(|e| e.name == env.name) {
                return Err(RepositoryError::AlreadyExists(env.name.clone()));
            }
            let mut id = self.next_id.lock().unwrap();
            *id += 1;
            if is_default {
                envs.iter_mut().for_each(|e| e.is_default = false);
            }
            let persisted = FlinkEnv::from_new(*id, env.clone(), is_default);
            envs.push(persisted.clone());
            Ok(persisted)
        }
    }

    #[async_trait]
    impl FlinkEnvRepository for MemoryRepo {
        async fn list(&self) -> Result<Vec<FlinkEnv>, RepositoryError> {
            Ok(self.envs.lock().unwrap().clone())
        }

        async fn get_by_id(&self, id: i64) -> Result<FlinkEnv, RepositoryError> {
            self.envs
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound(format!("id={id}")))
        }

        async fn get_by_name(&self, name: &str) -> Result<FlinkEnv, RepositoryError> {
            self.envs
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.name == name)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound(format!("name={name}")))
        }

        async fn get_default(&self) -> Result<Option<FlinkEnv>, RepositoryError> {
            Ok(self.envs.lock().unwrap().iter().find(|e| e.is_default).cloned())
        }

        async fn insert(&self, env: &NewFlinkEnv) -> Result<FlinkEnv, RepositoryError> {
            self.push(env, false)
        }

        async fn insert_as_default(&self, env: &NewFlinkEnv) -> Result<FlinkEnv, RepositoryError> {
            self.push(env, true)
        }

        async fn update(&self, env: &FlinkEnv) -> Result<(), RepositoryError> {
            let mut envs = self.envs.lock().unwrap();
            let slot = envs
                .iter_mut()
                .find(|e| e.id == env.id)
                .ok_or_else(|| RepositoryError::NotFound(format!("id={}", env.id)))?;
            let is_default = slot.is_default;
            *slot = env.clone();
            slot.is_default = is_default;
            Ok(())
        }

        async fn update_as_default(&self, env: &FlinkEnv) -> Result<(), RepositoryError> {
            let mut envs = self.envs.lock().unwrap();
            if !envs.iter().any(|e| e.id == env.id) {
                return Err(RepositoryError::NotFound(format!("id={}", env.id)));
            }
            for slot in envs.iter_mut() {
                if slot.id == env.id {
                    *slot = env.clone();
                }
                slot.is_default = slot.id == env.id;
            }
            Ok(())
        }

        async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
            let mut envs = self.envs.lock().unwrap();
            let before = envs.len();
            envs.retain(|e| e.id != id);
            if envs.len() == before {
                return Err(RepositoryError::NotFound(format!("id={id}")));
            }
            Ok(())
        }

        async fn set_default(&self, id: i64) -> Result<(), RepositoryError> {
            self.set_default_calls.fetch_add(1, Ordering::SeqCst);
            let mut envs = self.envs.lock().unwrap();
            if !envs.iter().any(|e| e.id == id) {
                return Err(RepositoryError::NotFound(format!("id={id}")));
            }
            for env in envs.iter_mut() {
                env.is_default = env.id == id;
            }
            Ok(())
        }
    }

    /// Oracle reading `<home>/VERSION` as `flink_version scala_version`.
    struct FileOracle;

    impl CompatibilityOracle for FileOracle {
        fn inspect(&self, flink_home: &Path) -> Result<DistributionInfo, OracleError> {
            let raw = fs::read_to_string(flink_home.join("VERSION"))
                .map_err(|_| OracleError::NotFound(flink_home.to_path_buf()))?;
            let mut parts = raw.split_whitespace();
            Ok(DistributionInfo {
                version: parts.next().unwrap_or_default().to_string(),
                scala_version: parts.next().unwrap_or_default().to_string(),
            })
        }
    }

    fn fake_install(root: &Path, dir: &str, version: &str, scala: &str) -> std::path::PathBuf {
        let home = root.join(dir);
        fs::create_dir_all(home.join("conf")).unwrap();
        fs::write(
            home.join("conf").join("flink-conf.yaml"),
            "taskmanager.numberOfTaskSlots: 4\n",
        )
        .unwrap();
        fs::write(home.join("VERSION"), format!("{version} {scala}")).unwrap();
        home
    }

    fn service(host: &str) -> (FlinkEnvService, Arc<MemoryRepo>) {
        let repo = Arc::new(MemoryRepo::default());
        let registrar =
            EnvRegistrar::new(Arc::new(FileOracle), HostRuntime::new(host), "flink-conf.yaml");
        (FlinkEnvService::new(repo.clone(), registrar), repo)
    }

    #[tokio::test]
    async fn test_first_environment_becomes_default() {
        let root = tempfile::tempdir().unwrap();
        let (service, _repo) = service("2.12.15");
        let home_a = fake_install(root.path(), "flink-1.14.6", "1.14.6", "2.12");
        let home_b = fake_install(root.path(), "flink-1.15.4", "1.15.4", "2.12");

        let a = service.create(&EnvRegistration::new("a", &home_a)).await.unwrap();
        let b = service.create(&EnvRegistration::new("b", &home_b)).await.unwrap();

        assert!(a.is_default);
        assert!(!b.is_default);
        assert_eq!(service.get_default().await.unwrap().unwrap().id, a.id);
        assert_eq!(a.major_minor().unwrap(), "1.14");
    }

    #[tokio::test]
    async fn test_create_with_set_default_moves_default() {
        let root = tempfile::tempdir().unwrap();
        let (service, _repo) = service("2.12.15");
        let home_a = fake_install(root.path(), "a", "1.14.6", "2.12");
        let home_b = fake_install(root.path(), "b", "1.15.4", "2.12");

        service.create(&EnvRegistration::new("a", &home_a)).await.unwrap();
        let b = service
            .create(&EnvRegistration::new("b", &home_b).as_default())
            .await
            .unwrap();

        let defaults: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter(|e| e.is_default)
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, b.id);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let root = tempfile::tempdir().unwrap();
        let (service, _repo) = service("2.12.15");
        let home = fake_install(root.path(), "flink", "1.14.6", "2.12");

        service.create(&EnvRegistration::new("flink", &home)).await.unwrap();
        let err = service
            .create(&EnvRegistration::new("flink", &home))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        assert!(service.exists("flink").await.unwrap());
    }

    #[tokio::test]
    async fn test_incompatible_scala_persists_nothing() {
        let root = tempfile::tempdir().unwrap();
        let (service, repo) = service("2.12.10");
        let home = fake_install(root.path(), "flink-1.13.2", "1.13.2", "2.11");

        let err = service
            .create(&EnvRegistration::new("flink-1.13", &home))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Env(EnvError::VersionMismatch { .. })));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_home_persists_nothing() {
        let (service, repo) = service("2.12.15");
        let err = service
            .create(&EnvRegistration::new("ghost", "/nonexistent/flink"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Env(EnvError::ConfigRead { .. })));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let root = tempfile::tempdir().unwrap();
        let (service, _repo) = service("2.12.15");
        let old_home = fake_install(root.path(), "old", "1.14.6", "2.12");
        let new_home = fake_install(root.path(), "new", "1.15.4", "2.12");

        let created = service.create(&EnvRegistration::new("flink", &old_home)).await.unwrap();
        let updated = service
            .update(
                created.id,
                &EnvRegistration::new("flink-new", &new_home).with_description("upgraded"),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.is_default);
        assert_eq!(updated.name, "flink-new");
        assert_eq!(updated.version, "1.15.4");
        assert_eq!(updated.description.as_deref(), Some("upgraded"));
    }

    #[tokio::test]
    async fn test_update_with_set_default_promotes_in_one_write() {
        let root = tempfile::tempdir().unwrap();
        let (service, repo) = service("2.12.15");
        let home_a = fake_install(root.path(), "a", "1.14.6", "2.12");
        let home_b = fake_install(root.path(), "b", "1.15.4", "2.12");

        let a = service.create(&EnvRegistration::new("a", &home_a)).await.unwrap();
        let b = service.create(&EnvRegistration::new("b", &home_b)).await.unwrap();
        assert!(!b.is_default);

        let updated = service
            .update(b.id, &EnvRegistration::new("b2", &home_b).as_default())
            .await
            .unwrap();

        assert!(updated.is_default);
        assert_eq!(updated.name, "b2");
        assert!(!service.get(a.id).await.unwrap().is_default);
        assert_eq!(repo.set_default_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_rejects_taken_name() {
        let root = tempfile::tempdir().unwrap();
        let (service, _repo) = service("2.12.15");
        let home = fake_install(root.path(), "flink", "1.14.6", "2.12");

        service.create(&EnvRegistration::new("a", &home)).await.unwrap();
        let b = service.create(&EnvRegistration::new("b", &home)).await.unwrap();

        let err = service
            .update(b.id, &EnvRegistration::new("a", &home))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_failed_update_leaves_record_unchanged() {
        let root = tempfile::tempdir().unwrap();
        let (service, _repo) = service("2.12.15");
        let home = fake_install(root.path(), "flink", "1.14.6", "2.12");
        let bad_home = fake_install(root.path(), "bad", "1.13.2", "2.11");

        let created = service.create(&EnvRegistration::new("flink", &home)).await.unwrap();
        assert!(service
            .update(created.id, &EnvRegistration::new("flink", &bad_home))
            .await
            .is_err());

        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_sync_conf_rereads_file() {
        let root = tempfile::tempdir().unwrap();
        let (service, _repo) = service("2.12.15");
        let home = fake_install(root.path(), "flink", "1.14.6", "2.12");
        let created = service.create(&EnvRegistration::new("flink", &home)).await.unwrap();

        fs::write(
            home.join("conf").join("flink-conf.yaml"),
            "taskmanager.numberOfTaskSlots: 8\n",
        )
        .unwrap();
        let synced = service.sync_conf(created.id).await.unwrap();

        assert_eq!(
            synced.conf_map().unwrap().get("taskmanager.numberOfTaskSlots").unwrap(),
            "8"
        );
        assert_eq!(service.get(created.id).await.unwrap().flink_conf, synced.flink_conf);
    }

    #[tokio::test]
    async fn test_default_cannot_be_removed() {
        let root = tempfile::tempdir().unwrap();
        let (service, _repo) = service("2.12.15");
        let home = fake_install(root.path(), "flink", "1.14.6", "2.12");

        let a = service.create(&EnvRegistration::new("a", &home)).await.unwrap();
        let b = service.create(&EnvRegistration::new("b", &home)).await.unwrap();

        assert!(matches!(service.remove(a.id).await, Err(CoreError::Validation(_))));

        service.set_default(b.id).await.unwrap();
        service.remove(a.id).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_repository_errors_pass_through() {
        let (service, _repo) = service("2.12.15");
        let err = service.set_default(42).await.unwrap_err();
        assert!(matches!(err, CoreError::Repository(RepositoryError::NotFound(_))));
    }
}
