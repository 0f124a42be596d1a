//! # stepper-lockstep
//!
//! Non-blocking lock-step motion cycles across a bank of stepper motors, with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Lock-step legs**: every motor gets the same relative move in one poll
//! - **Full barrier**: no transition until every motor has stopped
//! - **Never blocks**: `poll` checks one transition and returns
//! - **Failed binds degrade**: unbound slots stay in the bank as inert placeholders
//! - **Wraparound-safe**: pause deadlines survive the millisecond counter wrapping
//! - **Configuration-driven**: pins and cycle parameters from TOML
//! - **Driver sleep**: a shared enable line wakes the drivers only while they move
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_lockstep::{bind_bank, MotionScheduler, PollLoop, SoftEngine};
//!
//! // Load configuration from TOML
//! let config = stepper_lockstep::load_config("cycle.toml")?;
//!
//! // Bind one actuator per configured motor
//! let mut engine = SoftEngine::new(pins, pulse_delay, 8);
//! let (bank, report) = bind_bank::<_, 8>(&mut engine, &config)?;
//!
//! // Alternate +leg / -leg forever
//! let scheduler = MotionScheduler::from_config(bank, &config);
//! let mut poll_loop = PollLoop::new(scheduler, clock, delay, config.cycle.poll_interval());
//! poll_loop.run_with(|bank, now| {
//!     engine.service(bank, now);
//! });
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and `log` output
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `log`: Routes diagnostics to the `log` facade
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod actuator;
pub mod config;
pub mod engine;
pub mod error;
pub mod motion;
pub mod motor;
pub mod runner;
pub mod scheduler;
pub mod time;

// Re-exports for ergonomic API
pub use actuator::{Actuator, ActuatorBank, Slot};
pub use config::{validate_config, CycleConfig, MotorConfig, SystemConfig};
pub use engine::{bind_bank, BindReport, SoftEngine, StepperEngine};
pub use error::{BindError, BindFailure, Error, Result};
pub use motion::{Direction, MotionPhase, MotionProfile};
pub use motor::StepDirActuator;
pub use runner::PollLoop;
pub use scheduler::{CycleSettings, MotionScheduler, Phase, Transition};
pub use time::{SystemClock, Timestamp};

#[cfg(feature = "std")]
pub use time::OperatingSystemClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Millis, Steps, StepsPerSec, StepsPerSecSquared};
