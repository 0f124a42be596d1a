//! Position tracking for stepper motors.

use crate::config::units::Steps;

/// Open-loop position tracker: pulses emitted versus pulses commanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Position reached by emitted steps.
    current: Steps,
    /// Position the last command asked for.
    target: Steps,
}

impl Position {
    /// Create a tracker at the origin.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker resting at a specific position.
    #[inline]
    pub fn at(steps: Steps) -> Self {
        Self {
            current: steps,
            target: steps,
        }
    }

    /// Position reached so far.
    #[inline]
    pub fn current(&self) -> Steps {
        self.current
    }

    /// Commanded position.
    #[inline]
    pub fn target(&self) -> Steps {
        self.target
    }

    /// Steps still to emit (signed).
    #[inline]
    pub fn distance_to_go(&self) -> i64 {
        self.target.0 - self.current.0
    }

    /// Move the target relative to the current target.
    #[inline]
    pub fn retarget_by(&mut self, delta: i64) {
        self.target = Steps(self.target.0 + delta);
    }

    /// Record emitted steps.
    #[inline]
    pub fn move_steps(&mut self, delta: i64) {
        self.current = Steps(self.current.0 + delta);
    }

    /// Declare the current location to be `steps`, dropping any pending target.
    #[inline]
    pub fn set(&mut self, steps: Steps) {
        self.current = steps;
        self.target = steps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracking() {
        let mut pos = Position::new();
        pos.retarget_by(1000);
        assert_eq!(pos.distance_to_go(), 1000);

        pos.move_steps(400);
        assert_eq!(pos.current(), Steps(400));
        assert_eq!(pos.distance_to_go(), 600);

        pos.move_steps(600);
        pos.retarget_by(-1000);
        assert_eq!(pos.distance_to_go(), -1000);
    }

    #[test]
    fn test_set_clears_target() {
        let mut pos = Position::at(Steps(50));
        pos.retarget_by(10);
        pos.set(Steps(0));
        assert_eq!(pos.distance_to_go(), 0);
        assert_eq!(pos.target(), Steps(0));
    }
}
