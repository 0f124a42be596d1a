//! Unit test harness for stepper-lockstep.
//!
//! This module organizes unit tests for each component of the library.

mod config_parsing;
mod config_validation;
mod scheduler_properties;
pub mod support;
