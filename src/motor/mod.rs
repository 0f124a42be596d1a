//! Motor module for stepper-lockstep.
//!
//! A reference step/dir actuator: the per-motor half of the software pulse
//! engine in [`crate::engine`].

mod driver;
mod position;

pub use driver::{StepDirActuator, DEFAULT_PULSE_WIDTH_NS, MAX_STEPS_PER_SERVICE};
pub use position::Position;
