//! Motion module for stepper-lockstep.
//!
//! Step-rate profiles and their step-by-step execution, used by the
//! reference step/dir engine.

mod executor;
mod profile;

pub use executor::MotionExecutor;
pub use profile::{Direction, MotionPhase, MotionProfile};
