//! Version detection from the jar names shipped in `<FLINK_HOME>/lib`.
//!
//! Flink up to 1.14 ships `flink-dist_<scala>-<version>.jar`, which carries
//! both versions. From 1.15 the dist jar is Scala-free
//! (`flink-dist-<version>.jar`) and the Scala version is read from
//! `flink-scala_<scala>-<version>.jar` or a Scala-suffixed table planner.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static DIST_WITH_SCALA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^flink-dist_(\d+\.\d+)-(.+)\.jar$").expect("dist jar pattern is valid")
});

static DIST_SCALA_FREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^flink-dist-(\d.*)\.jar$").expect("dist jar pattern is valid")
});

static SCALA_CARRIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^flink-(?:scala|table-planner)_(\d+\.\d+)-.+\.jar$")
        .expect("scala jar pattern is valid")
});

/// Why a set of jar names could not be mapped to versions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectError {
    #[error("no flink-dist jar found")]
    NoDistJar,

    #[error("multiple flink-dist jars found: {0}")]
    AmbiguousDistJar(String),

    #[error("no Scala-suffixed jar (flink-scala_*, flink-table-planner_*) found next to {0}")]
    NoScalaJar(String),

    #[error("Scala-suffixed jars disagree on the Scala version: {0}")]
    ConflictingScala(String),
}

/// Versions detected from jar names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedVersions {
    pub version: String,
    pub scala_version: String,
}

/// Detect the Flink and Scala versions from the file names in `lib/`.
pub fn detect_versions<'a, I>(file_names: I) -> Result<DetectedVersions, DetectError>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = file_names.into_iter().collect();

    let dist_jars: Vec<&str> = names
        .iter()
        .copied()
        .filter(|n| DIST_WITH_SCALA.is_match(n) || DIST_SCALA_FREE.is_match(n))
        .collect();

    let dist = match dist_jars.as_slice() {
        [] => return Err(DetectError::NoDistJar),
        [one] => *one,
        many => return Err(DetectError::AmbiguousDistJar(many.join(", "))),
    };

    if let Some(caps) = DIST_WITH_SCALA.captures(dist) {
        return Ok(DetectedVersions {
            version: caps[2].to_string(),
            scala_version: caps[1].to_string(),
        });
    }

    let version = DIST_SCALA_FREE
        .captures(dist)
        .map(|caps| caps[1].to_string())
        .ok_or(DetectError::NoDistJar)?;

    let mut scala_versions: Vec<&str> = names
        .iter()
        .filter_map(|n| SCALA_CARRIER.captures(n))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    scala_versions.sort_unstable();
    scala_versions.dedup();

    match scala_versions.as_slice() {
        [] => Err(DetectError::NoScalaJar(dist.to_string())),
        [scala] => Ok(DetectedVersions {
            version,
            scala_version: (*scala).to_string(),
        }),
        many => Err(DetectError::ConflictingScala(many.join(", "))),
    }
}
