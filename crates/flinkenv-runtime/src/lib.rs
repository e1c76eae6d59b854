//! OS-level concerns for flinkenv: inspecting Flink distributions on disk.

#![deny(unsafe_code)]

pub mod dist;
pub mod ports_impl;

pub use dist::{DetectError, DetectedVersions, detect_versions};
pub use ports_impl::DistributionOracle;
