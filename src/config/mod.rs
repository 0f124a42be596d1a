//! Configuration module for stepper-lockstep.
//!
//! Static bring-up configuration: engine cadence, cycle shape, the shared
//! enable line and the ordered motor list. Loaded from TOML files (with `std`
//! feature) or built in code.

mod motor;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use system::{CycleConfig, EnableConfig, EngineConfig, SystemConfig, MAX_MOTORS};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millis, Steps, StepsPerSec, StepsPerSecSquared};
