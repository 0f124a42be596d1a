//! Step/dir actuator driven by non-blocking service calls.
//!
//! Generic over embedded-hal 1.0 pin and delay types. A move is planned when
//! issued and emitted from [`StepDirActuator::service`], which the engine's
//! maintenance task calls at its own cadence.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::actuator::Actuator;
use crate::config::units::{Steps, StepsPerSec, StepsPerSecSquared};
use crate::config::MotorConfig;
use crate::error::MotorError;
use crate::motion::{Direction, MotionExecutor, MotionProfile};

use super::position::Position;

/// Most steps a single service call will emit.
pub const MAX_STEPS_PER_SERVICE: u32 = 64;

/// Default STEP high time in nanoseconds.
pub const DEFAULT_PULSE_WIDTH_NS: u32 = 2_000;

/// Stepper motor with STEP and DIR outputs.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider for pulse timing (must implement `DelayNs`)
pub struct StepDirActuator<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin.
    dir_pin: DIR,

    /// Delay provider for the STEP high and low times.
    delay: DELAY,

    /// Open-loop position.
    position: Position,

    /// Level last written to DIR (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// DIR high means the position counts up.
    dir_high_counts_up: bool,

    /// Settle time between a DIR change and the next step.
    dir_change_delay: Duration,

    /// STEP high time, also used as the low time between back-to-back steps.
    pulse_width_ns: u32,

    /// How far behind schedule a service call may catch up.
    max_lag: Duration,

    /// Cruise step rate.
    speed: StepsPerSec,

    /// Ramp rate.
    acceleration: StepsPerSecSquared,

    /// Move being emitted, if any.
    executor: Option<MotionExecutor>,

    /// When the next step is due. `None` until the first service of a move.
    next_step_at: Option<Duration>,
}

impl<STEP, DIR, DELAY> StepDirActuator<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Create an idle actuator at position zero.
    pub fn new(
        step_pin: STEP,
        dir_pin: DIR,
        delay: DELAY,
        speed: StepsPerSec,
        acceleration: StepsPerSecSquared,
    ) -> Self {
        Self {
            step_pin,
            dir_pin,
            delay,
            position: Position::new(),
            current_direction: None,
            dir_high_counts_up: true,
            dir_change_delay: Duration::ZERO,
            pulse_width_ns: DEFAULT_PULSE_WIDTH_NS,
            max_lag: Duration::from_millis(1),
            speed,
            acceleration,
            executor: None,
            next_step_at: None,
        }
    }

    /// Apply DIR polarity and settle time from a motor entry.
    pub fn with_motor_config(mut self, motor: &MotorConfig) -> Self {
        self.dir_high_counts_up = motor.dir_high_counts_up;
        self.dir_change_delay = Duration::from_micros(motor.dir_change_delay_us as u64);
        self
    }

    /// Set the STEP high time.
    pub fn with_pulse_width(mut self, pulse_width_ns: u32) -> Self {
        self.pulse_width_ns = pulse_width_ns;
        self
    }

    /// Set how far behind schedule a service call may catch up.
    ///
    /// Steps that fell due earlier than `max_lag` before the service call
    /// are shifted later instead of being emitted in one burst.
    pub fn with_max_lag(mut self, max_lag: Duration) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// STEP high time in nanoseconds.
    #[inline]
    pub fn pulse_width_ns(&self) -> u32 {
        self.pulse_width_ns
    }

    /// Get current position in steps.
    #[inline]
    pub fn current_position(&self) -> Steps {
        self.position.current()
    }

    /// Get the commanded position in steps.
    #[inline]
    pub fn target_position(&self) -> Steps {
        self.position.target()
    }

    /// Declare the current location to be `steps`.
    ///
    /// Ignored while a move is in flight.
    pub fn set_current_position(&mut self, steps: Steps) {
        if self.executor.is_none() {
            self.position.set(steps);
        }
    }

    /// Cruise step rate used for the next move.
    #[inline]
    pub fn speed(&self) -> StepsPerSec {
        self.speed
    }

    /// Set the cruise step rate for subsequent moves.
    pub fn set_speed(&mut self, speed: StepsPerSec) {
        self.speed = speed;
    }

    /// Ramp rate used for the next move.
    #[inline]
    pub fn acceleration(&self) -> StepsPerSecSquared {
        self.acceleration
    }

    /// Set the ramp rate for subsequent moves.
    pub fn set_acceleration(&mut self, acceleration: StepsPerSecSquared) {
        self.acceleration = acceleration;
    }

    /// Steps left in the current move.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.executor.as_ref().map(|e| e.steps_remaining()).unwrap_or(0)
    }

    /// Emit every step that is due at `now`, up to [`MAX_STEPS_PER_SERVICE`].
    ///
    /// `now` must come from the same monotonic clock on every call. The
    /// first call after a move is issued writes DIR, and the settle time
    /// runs from that call. Each pulse holds STEP high for the pulse width;
    /// back-to-back pulses are separated by the same low time. A call more
    /// than the maximum lag behind schedule shifts the remaining steps later.
    ///
    /// Returns the number of steps emitted. A failed pin write leaves the
    /// position and the pending step untouched, so the step is retried next
    /// call.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::PinError` if a STEP or DIR write fails.
    pub fn service(&mut self, now: Duration) -> Result<u32, MotorError> {
        let direction = match self.executor.as_ref() {
            Some(executor) => executor.profile().direction,
            None => return Ok(0),
        };

        let mut due = match self.next_step_at {
            Some(due) => due,
            None => {
                let due = if self.current_direction == Some(direction) {
                    now
                } else {
                    self.set_direction(direction)?;
                    now + self.dir_change_delay
                };
                self.next_step_at = Some(due);
                due
            }
        };

        if now.saturating_sub(due) > self.max_lag {
            due = now - self.max_lag;
            self.next_step_at = Some(due);
        }

        let mut emitted = 0;

        while emitted < MAX_STEPS_PER_SERVICE && now >= due {
            if emitted > 0 {
                self.delay.delay_ns(self.pulse_width_ns);
            }
            self.pulse()?;
            self.position.move_steps(direction.sign());
            emitted += 1;

            let Some(executor) = self.executor.as_mut() else {
                break;
            };
            let interval_ns = executor.current_interval_ns();

            if !executor.advance() {
                self.executor = None;
                self.next_step_at = None;
                break;
            }

            due += Duration::from_nanos(interval_ns as u64);
            self.next_step_at = Some(due);
        }

        Ok(emitted)
    }

    /// Give back the pins and the delay provider.
    pub fn release(self) -> (STEP, DIR, DELAY) {
        (self.step_pin, self.dir_pin, self.delay)
    }

    fn pulse(&mut self) -> Result<(), MotorError> {
        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.delay.delay_ns(self.pulse_width_ns);
        self.step_pin.set_low().map_err(|_| MotorError::PinError)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), MotorError> {
        let pin_high = match direction {
            Direction::Forward => self.dir_high_counts_up,
            Direction::Reverse => !self.dir_high_counts_up,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }
}

impl<STEP, DIR, DELAY> Actuator for StepDirActuator<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    fn issue_relative_move(&mut self, steps: i32) {
        self.position.retarget_by(steps as i64);

        let profile = MotionProfile::symmetric_trapezoidal(
            self.position.distance_to_go(),
            self.speed.value(),
            self.acceleration.value(),
        );

        self.executor = if profile.is_zero() {
            None
        } else {
            Some(MotionExecutor::new(profile))
        };
        self.next_step_at = None;
    }

    #[inline]
    fn is_in_motion(&self) -> bool {
        self.executor.is_some()
    }
}
