//! Configuration validation.

use heapless::Vec;

use crate::error::{ConfigError, Error, Result};

use super::system::MAX_MOTORS;
use super::SystemConfig;

/// Upper bound for the engine task rate and the poll interval, in ms.
const MAX_CADENCE_MS: u32 = 50;

/// Upper bound for the STEP pulse width, in us.
const MAX_PULSE_US: u8 = 50;

/// Validate a system configuration.
///
/// Checks:
/// - At least one motor is configured
/// - The leg length is non-zero
/// - Speed and acceleration are positive and finite
/// - Engine task rate and poll interval are within 1-50 ms
/// - STEP pulse width is within 1-50 us
/// - No pin is assigned twice (STEP, DIR, shared enable)
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    if config.motors.is_empty() {
        return Err(Error::Config(ConfigError::NoMotors));
    }

    validate_cycle(config)?;

    let task_rate = config.engine.task_rate_ms;
    if task_rate == 0 || task_rate as u32 > MAX_CADENCE_MS {
        return Err(Error::Config(ConfigError::InvalidTaskRate(task_rate)));
    }

    let pulse = config.engine.step_pulse_us;
    if pulse == 0 || pulse > MAX_PULSE_US {
        return Err(Error::Config(ConfigError::InvalidPulseWidth(pulse)));
    }

    validate_pins(config)
}

fn validate_cycle(config: &SystemConfig) -> Result<()> {
    let cycle = &config.cycle;

    if cycle.leg_steps == 0 {
        return Err(Error::Config(ConfigError::ZeroLegLength));
    }

    let speed = cycle.speed_hz.value();
    if !speed.is_finite() || speed <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidSpeed(speed)));
    }

    let accel = cycle.acceleration.value();
    if !accel.is_finite() || accel <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidAcceleration(accel)));
    }

    if cycle.poll_interval_ms == 0 || cycle.poll_interval_ms > MAX_CADENCE_MS {
        return Err(Error::Config(ConfigError::InvalidPollInterval(
            cycle.poll_interval_ms,
        )));
    }

    Ok(())
}

fn validate_pins(config: &SystemConfig) -> Result<()> {
    let mut seen: Vec<u8, { 2 * MAX_MOTORS }> = Vec::new();

    for motor in config.motors.iter() {
        for pin in [motor.step_pin, motor.dir_pin] {
            if seen.contains(&pin) {
                return Err(Error::Config(ConfigError::DuplicatePin(pin)));
            }
            // Capacity is two pins per motor.
            let _ = seen.push(pin);
        }
    }

    // The enable line is shared by every driver, so it only has to stay
    // clear of the STEP/DIR pins.
    if let Some(enable) = config.enable {
        if seen.contains(&enable.pin) {
            return Err(Error::Config(ConfigError::DuplicatePin(enable.pin)));
        }
    }

    Ok(())
}
