//! Actuator layer.
//!
//! [`Actuator`] is the contract the scheduler needs from a pulse engine's
//! per-motor handle. [`Slot`] wraps a handle that may have failed to bind, and
//! [`ActuatorBank`] is the ordered collection the scheduler drives.

mod bank;
mod slot;

pub use bank::ActuatorBank;
pub use slot::Slot;

/// Per-motor command surface supplied by a pulse engine.
///
/// Both calls return immediately. Step timing, ramping and driver wake-up all
/// happen inside the engine.
pub trait Actuator {
    /// Queue a move of `steps` relative to the current target.
    ///
    /// Callers must not issue a move while [`Actuator::is_in_motion`] is true.
    fn issue_relative_move(&mut self, steps: i32);

    /// True from the moment a move is issued until the commanded
    /// displacement has been reached.
    fn is_in_motion(&self) -> bool;
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn issue_relative_move(&mut self, steps: i32) {
        (**self).issue_relative_move(steps)
    }

    fn is_in_motion(&self) -> bool {
        (**self).is_in_motion()
    }
}
