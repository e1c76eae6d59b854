//! Flink version triplet.
//!
//! Versions reported by a distribution always have the shape
//! `major.minor.patch`. Components are kept as text since patch levels may
//! carry a suffix (`1.14.0-rc1`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::EnvError;

/// A validated `major.minor.patch` version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTriplet {
    major: String,
    minor: String,
    patch: String,
}

impl VersionTriplet {
    /// Parse a version string, requiring exactly three non-empty components.
    pub fn parse(version: &str) -> Result<Self, EnvError> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.trim().is_empty()) {
            return Err(EnvError::MalformedVersion(version.to_string()));
        }
        if parts.iter().any(|p| p.chars().any(char::is_whitespace)) {
            return Err(EnvError::MalformedVersion(version.to_string()));
        }

        Ok(Self {
            major: parts[0].to_string(),
            minor: parts[1].to_string(),
            patch: parts[2].to_string(),
        })
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn minor(&self) -> &str {
        &self.minor
    }

    pub fn patch(&self) -> &str {
        &self.patch
    }

    /// `major.minor`, i.e. the version without its patch suffix.
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Component by position: 0 = major, 1 = minor, 2 = patch.
    pub fn component_at(&self, index: usize) -> Result<&str, EnvError> {
        match index {
            0 => Ok(&self.major),
            1 => Ok(&self.minor),
            2 => Ok(&self.patch),
            _ => Err(EnvError::MalformedVersion(format!(
                "{self} has no component at index {index}"
            ))),
        }
    }
}

/// Whether `version` is a Scala version (`2.12` or `2.12.15`).
pub fn is_scala_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    (2..=3).contains(&parts.len())
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

impl fmt::Display for VersionTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl TryFrom<String> for VersionTriplet {
    type Error = EnvError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionTriplet> for String {
    fn from(value: VersionTriplet) -> Self {
        value.to_string()
    }
}

impl std::str::FromStr for VersionTriplet {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
