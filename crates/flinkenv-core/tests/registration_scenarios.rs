//! End-to-end registration scenarios against a fake installation on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use flinkenv_core::conf::{compress, decompress, parse_flink_conf};
use flinkenv_core::{
    CompatibilityOracle, DistributionInfo, EnvError, EnvRegistrar, EnvRegistration, FlinkEnv,
    HostRuntime, OracleError,
};

struct StaticOracle {
    version: &'static str,
    scala: &'static str,
}

impl CompatibilityOracle for StaticOracle {
    fn inspect(&self, flink_home: &Path) -> Result<DistributionInfo, OracleError> {
        if !flink_home.exists() {
            return Err(OracleError::NotFound(flink_home.to_path_buf()));
        }
        Ok(DistributionInfo {
            version: self.version.to_string(),
            scala_version: self.scala.to_string(),
        })
    }
}

fn flink_1_13_2(root: &Path) -> std::path::PathBuf {
    let home = root.join("flink-1.13.2");
    fs::create_dir_all(home.join("conf")).unwrap();
    fs::write(
        home.join("conf/flink-conf.yaml"),
        "\
jobmanager.rpc.address: localhost
jobmanager.memory.process.size: 1600m
taskmanager.numberOfTaskSlots: 4
parallelism.default: 1
",
    )
    .unwrap();
    home
}

fn registrar(host: &str) -> EnvRegistrar {
    EnvRegistrar::new(
        Arc::new(StaticOracle {
            version: "1.13.2",
            scala: "2.11",
        }),
        HostRuntime::new(host),
        "flink-conf.yaml",
    )
}

#[test]
fn test_register_flink_1_13_on_scala_2_11_host() {
    let root = tempfile::tempdir().unwrap();
    let home = flink_1_13_2(root.path());

    let new = registrar("2.11.12")
        .validate(&EnvRegistration::new("flink-1.13.2", &home))
        .unwrap();
    let env = FlinkEnv::from_new(1, new, true);

    let conf = env.conf_map().unwrap();
    assert_eq!(conf.get("taskmanager.numberOfTaskSlots").unwrap(), "4");
    assert_eq!(conf.get("jobmanager.memory.process.size").unwrap(), "1600m");
    assert_eq!(env.major_minor().unwrap(), "1.13");
    assert_eq!(env.major().unwrap(), "1");
    assert_eq!(env.minor().unwrap(), "13");
    assert_eq!(env.patch().unwrap(), "2");
}

#[test]
fn test_register_flink_1_13_on_scala_2_12_host_is_rejected() {
    let root = tempfile::tempdir().unwrap();
    let home = flink_1_13_2(root.path());

    let err = registrar("2.12.10")
        .validate(&EnvRegistration::new("flink-1.13.2", &home))
        .unwrap_err();

    assert!(matches!(err, EnvError::VersionMismatch { .. }));
    let message = err.to_string();
    assert!(message.contains("2.11"), "{message}");
    assert!(message.contains("2.12.10"), "{message}");
}

#[test]
fn test_stored_blob_round_trips_to_original_text() {
    let root = tempfile::tempdir().unwrap();
    let home = flink_1_13_2(root.path());
    let original = fs::read_to_string(home.join("conf/flink-conf.yaml")).unwrap();

    let new = registrar("2.11.12")
        .validate(&EnvRegistration::new("flink", &home))
        .unwrap();

    assert_eq!(new.conf_text().unwrap(), original);
    assert_eq!(
        parse_flink_conf(&decompress(&compress(&original).unwrap()).unwrap()),
        parse_flink_conf(&original)
    );
}
