//! Pulse engine bring-up.
//!
//! A [`StepperEngine`] owns step timing and hands out one [`Actuator`] per
//! configured motor. [`bind_bank`] runs the bring-up: it initializes the
//! engine and connects every motor in configuration order. A motor that cannot
//! be connected becomes an inert [`Slot::Unbound`] and bring-up carries on.

mod soft;

pub use soft::{PinSource, SoftActuator, SoftEngine};

use heapless::Vec;

use crate::actuator::{Actuator, ActuatorBank, Slot};
use crate::config::units::{Millis, StepsPerSec, StepsPerSecSquared};
use crate::config::{EnableConfig, MotorConfig, SystemConfig};
use crate::error::{BindError, BindFailure, ConfigError, Error, Result};

/// Settings shared by every actuator an engine connects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectSettings {
    /// Cruise step rate.
    pub speed: StepsPerSec,
    /// Ramp rate.
    pub acceleration: StepsPerSecSquared,
    /// STEP high time in nanoseconds.
    pub step_pulse_ns: u32,
    /// Shared enable line, if any.
    pub enable: Option<EnableConfig>,
}

impl ConnectSettings {
    /// Extract the shared actuator settings from a configuration.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            speed: config.cycle.speed_hz,
            acceleration: config.cycle.acceleration,
            step_pulse_ns: config.engine.step_pulse_ns(),
            enable: config.enable,
        }
    }
}

/// A step-generation engine.
pub trait StepperEngine {
    /// The per-motor handle this engine produces.
    type Actuator: Actuator;

    /// Start the engine's maintenance task at `task_rate`.
    fn init(&mut self, task_rate: Millis);

    /// Bind motor `index` to its pins and configure it.
    ///
    /// The returned actuator starts idle at position zero.
    ///
    /// # Errors
    ///
    /// Returns the reason the motor could not be bound.
    fn connect(
        &mut self,
        index: usize,
        motor: &MotorConfig,
        settings: &ConnectSettings,
    ) -> core::result::Result<Self::Actuator, BindFailure>;
}

/// Outcome of [`bind_bank`]: which slots failed to bind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindReport<const N: usize> {
    failures: Vec<BindError, N>,
}

impl<const N: usize> BindReport<N> {
    /// Slots that failed to bind, in slot order.
    pub fn failures(&self) -> &[BindError] {
        &self.failures
    }

    /// Whether every slot bound.
    pub fn all_bound(&self) -> bool {
        self.failures.is_empty()
    }

    /// Treat any failed slot as an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::Bind` carrying the first failed slot.
    pub fn require_all(&self) -> Result<()> {
        match self.failures.first() {
            Some(failure) => Err(Error::Bind(*failure)),
            None => Ok(()),
        }
    }
}

/// Initialize `engine` and connect every configured motor.
///
/// Motors are connected in configuration order. Failures are logged, recorded
/// in the report and leave an [`Slot::Unbound`] placeholder at their index.
///
/// # Errors
///
/// Returns `ConfigError::TooManyMotors` if the configuration lists more motors
/// than the bank capacity `N`. Bind failures are never returned as errors.
pub fn bind_bank<E, const N: usize>(
    engine: &mut E,
    config: &SystemConfig,
) -> Result<(ActuatorBank<E::Actuator, N>, BindReport<N>)>
where
    E: StepperEngine,
{
    let count = config.motors.len();
    if count > N {
        return Err(Error::Config(ConfigError::TooManyMotors { count, max: N }));
    }

    let task_rate = config.engine.task_rate();
    engine.init(task_rate);
    info!("Stepper engine started, task rate {} ms", task_rate.value());

    let settings = ConnectSettings::from_config(config);
    let mut bank = ActuatorBank::new();
    let mut report = BindReport::default();

    for (index, motor) in config.motors.iter().enumerate() {
        let slot = match engine.connect(index, motor, &settings) {
            Ok(actuator) => {
                info!(
                    "Connected stepper #{} (STEP pin {} DIR pin {})",
                    index,
                    motor.step_pin,
                    motor.dir_pin
                );
                Slot::Bound(actuator)
            }
            Err(reason) => {
                let failure = BindError {
                    index,
                    step_pin: motor.step_pin,
                    dir_pin: motor.dir_pin,
                    reason,
                };
                warn!(
                    "Failed to connect stepper #{} (STEP pin {} DIR pin {})",
                    index,
                    motor.step_pin,
                    motor.dir_pin
                );
                // Capacity matches the bank, which was checked above.
                let _ = report.failures.push(failure);
                Slot::Unbound
            }
        };

        // Length was checked against N above.
        let _ = bank.push(slot);
    }

    if bank.bound_count() == 0 {
        warn!("No stepper bound; the cycle will run without motion");
    }

    Ok((bank, report))
}
