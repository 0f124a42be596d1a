//! Software pulse engine over embedded-hal pins.
//!
//! [`SoftEngine`] claims STEP/DIR pins from a [`PinSource`] and hands out
//! [`StepDirActuator`]s. Pulses are produced by [`SoftEngine::service`], which
//! the run loop calls as the engine's maintenance task. The same call drives
//! the shared enable line, when one is configured.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::actuator::ActuatorBank;
use crate::config::units::Millis;
use crate::config::{EnableConfig, MotorConfig};
use crate::error::{BindFailure, MotorError};
use crate::motor::StepDirActuator;

use super::{ConnectSettings, StepperEngine};

/// Hands out output pins by number.
pub trait PinSource {
    /// STEP pin type.
    type Step: OutputPin;
    /// DIR pin type.
    type Dir: OutputPin;
    /// Shared enable pin type.
    type Enable: OutputPin;

    /// Take ownership of a STEP/DIR pair.
    ///
    /// # Errors
    ///
    /// Returns `BindFailure::PinUnavailable` if either pin is taken, or
    /// `BindFailure::InvalidPin` if it does not exist.
    fn claim(&mut self, step_pin: u8, dir_pin: u8)
        -> Result<(Self::Step, Self::Dir), BindFailure>;

    /// Take ownership of the enable pin shared by every driver.
    ///
    /// # Errors
    ///
    /// Same as [`PinSource::claim`].
    fn claim_enable(&mut self, pin: u8) -> Result<Self::Enable, BindFailure>;
}

/// Actuator type produced by a [`SoftEngine`] over `P` with delay `D`.
pub type SoftActuator<P, D> =
    StepDirActuator<<P as PinSource>::Step, <P as PinSource>::Dir, D>;

/// Shared driver enable output.
struct EnableLine<E> {
    pin: E,
    low_active: bool,
    auto_enable: bool,
    /// Last level written, as "drivers enabled".
    active: Option<bool>,
}

impl<E: OutputPin> EnableLine<E> {
    fn new(pin: E, config: &EnableConfig) -> Self {
        Self {
            pin,
            low_active: config.low_active,
            auto_enable: config.auto_enable,
            active: None,
        }
    }

    /// Request the drivers on or off. Without auto-enable they stay on.
    fn set_active(&mut self, active: bool) -> Result<(), MotorError> {
        let active = active || !self.auto_enable;
        if self.active == Some(active) {
            return Ok(());
        }

        if active != self.low_active {
            self.pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.active = Some(active);
        Ok(())
    }
}

/// Reference engine generating steps in software.
///
/// `D` is cloned into every actuator to time STEP pulses.
pub struct SoftEngine<P: PinSource, D> {
    pins: P,
    delay: D,
    channels: usize,
    connected: usize,
    task_rate: Millis,
    enable: Option<EnableLine<P::Enable>>,
    enable_claimed: bool,
}

impl<P, D> SoftEngine<P, D>
where
    P: PinSource,
    D: DelayNs + Clone,
{
    /// Create an engine with one pulse channel per motor, up to `channels`.
    pub fn new(pins: P, delay: D, channels: usize) -> Self {
        Self {
            pins,
            delay,
            channels,
            connected: 0,
            task_rate: Millis(1),
            enable: None,
            enable_claimed: false,
        }
    }

    /// Maintenance task rate set by [`StepperEngine::init`].
    pub fn task_rate(&self) -> Millis {
        self.task_rate
    }

    /// Number of actuators handed out so far.
    pub fn connected(&self) -> usize {
        self.connected
    }

    /// Whether the drivers are currently enabled. `None` without an enable line.
    pub fn drivers_enabled(&self) -> Option<bool> {
        self.enable.as_ref().and_then(|line| line.active)
    }

    /// Emit due steps for every bound actuator in `bank` at `now`.
    ///
    /// The enable line goes active before any step is emitted and, with
    /// auto-enable, inactive once the whole bank is idle. Returns the total
    /// number of steps emitted. A pin error on one actuator is logged and the
    /// rest are still serviced; the failed step is retried on the next call.
    pub fn service<const N: usize>(
        &mut self,
        bank: &mut ActuatorBank<SoftActuator<P, D>, N>,
        now: Duration,
    ) -> u32 {
        if bank.any_in_motion() {
            self.drive_enable(true);
        }

        let mut emitted = 0;
        for actuator in bank.bound_mut() {
            match actuator.service(now) {
                Ok(steps) => emitted += steps,
                Err(_) => warn!("Step output failed, retrying next service"),
            }
        }

        if !bank.any_in_motion() {
            self.drive_enable(false);
        }

        emitted
    }

    fn claim_enable(&mut self, config: &EnableConfig) {
        match self.pins.claim_enable(config.pin) {
            Ok(pin) => {
                let mut line = EnableLine::new(pin, config);
                if line.set_active(false).is_err() {
                    warn!("Enable pin {} write failed", config.pin);
                }
                self.enable = Some(line);
                debug!("Enable line on pin {}", config.pin);
            }
            Err(_) => warn!("Enable pin {} unavailable, drivers left as wired", config.pin),
        }
    }

    fn drive_enable(&mut self, active: bool) {
        if let Some(line) = self.enable.as_mut() {
            if line.set_active(active).is_err() {
                warn!("Enable pin write failed");
            }
        }
    }
}

impl<P, D> StepperEngine for SoftEngine<P, D>
where
    P: PinSource,
    D: DelayNs + Clone,
{
    type Actuator = SoftActuator<P, D>;

    fn init(&mut self, task_rate: Millis) {
        self.task_rate = task_rate;
    }

    fn connect(
        &mut self,
        index: usize,
        motor: &MotorConfig,
        settings: &ConnectSettings,
    ) -> Result<Self::Actuator, BindFailure> {
        if !self.enable_claimed {
            self.enable_claimed = true;
            if let Some(enable) = settings.enable {
                self.claim_enable(&enable);
            }
        }

        if self.connected >= self.channels {
            return Err(BindFailure::ResourcesExhausted);
        }

        let (step, dir) = self.pins.claim(motor.step_pin, motor.dir_pin)?;
        self.connected += 1;

        debug!(
            "Soft channel {} -> stepper #{} at {} steps/s",
            self.connected - 1,
            index,
            settings.speed.value()
        );

        Ok(StepDirActuator::new(
            step,
            dir,
            self.delay.clone(),
            settings.speed,
            settings.acceleration,
        )
        .with_motor_config(motor)
        .with_pulse_width(settings.step_pulse_ns)
        .with_max_lag(Duration::from_millis(self.task_rate.value() as u64)))
    }
}
