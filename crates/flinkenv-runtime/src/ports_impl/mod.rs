//! Implementations of `flinkenv-core` ports.

mod compatibility_oracle;

pub use compatibility_oracle::DistributionOracle;
