//! Application services.
//!
//! - `registrar` - validates an installation into a `NewFlinkEnv`
//! - `env_service` - registration plus persistence through `FlinkEnvRepository`

mod env_service;
mod registrar;

pub use env_service::FlinkEnvService;
pub use registrar::{EnvRegistrar, RegistrationState};
