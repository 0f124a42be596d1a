//! Shared test actuators.

use stepper_lockstep::{Actuator, ActuatorBank};

/// Actuator that finishes each move after a fixed number of ticks.
#[derive(Debug, Clone, Default)]
pub struct SimActuator {
    /// Sum of every move issued.
    pub position: i64,
    /// Every move issued, in order.
    pub legs: Vec<i32>,
    /// Ticks a move stays in flight (at least one).
    pub leg_ticks: u32,
    remaining: u32,
}

impl SimActuator {
    pub fn with_leg_ticks(leg_ticks: u32) -> Self {
        Self {
            leg_ticks,
            ..Self::default()
        }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

impl Actuator for SimActuator {
    fn issue_relative_move(&mut self, steps: i32) {
        assert_eq!(self.remaining, 0, "move issued while in flight");
        self.legs.push(steps);
        self.position += steps as i64;
        self.remaining = self.leg_ticks.max(1);
    }

    fn is_in_motion(&self) -> bool {
        self.remaining > 0
    }
}

/// Advance every bound actuator by one tick.
pub fn tick_bank<const N: usize>(bank: &mut ActuatorBank<SimActuator, N>) {
    for actuator in bank.bound_mut() {
        actuator.tick();
    }
}
