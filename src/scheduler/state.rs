//! Scheduler state and cycle parameters.

use crate::config::units::Millis;
use crate::config::SystemConfig;
use crate::time::Timestamp;

/// Fixed parameters of the alternating cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleSettings {
    /// Magnitude of every leg. The first leg moves by this signed amount.
    pub leg_steps: i32,
    /// Hold time between the end of one leg and the start of the next.
    pub pause: Millis,
}

impl CycleSettings {
    /// Create cycle settings.
    pub const fn new(leg_steps: i32, pause: Millis) -> Self {
        Self { leg_steps, pause }
    }

    /// Read the `[cycle]` section of a configuration.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            leg_steps: config.cycle.leg_steps,
            pause: config.cycle.pause(),
        }
    }
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self::new(1000, Millis(1000))
    }
}

/// Where the scheduler is in the cycle.
///
/// Exactly one phase holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting to start the next leg.
    Paused {
        /// Earliest time the next leg may start. `None` before the first leg.
        until: Option<Timestamp>,
    },
    /// A leg was issued and at least one actuator may still be moving.
    Moving,
}

/// A state change made by one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// A leg was issued to every slot.
    LegStarted {
        /// Signed relative move given to each actuator.
        steps: i32,
    },
    /// Every actuator stopped and the pause began.
    PauseStarted {
        /// When the pause ends.
        until: Timestamp,
    },
}
