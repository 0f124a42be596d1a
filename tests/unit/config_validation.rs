//! Unit tests for configuration validation.

use stepper_lockstep::config::{validate_config, EnableConfig, MotorConfig, SystemConfig};
use stepper_lockstep::error::{ConfigError, Error};
use stepper_lockstep::StepsPerSec;

fn bench() -> SystemConfig {
    let mut motors = heapless::Vec::new();
    motors.push(MotorConfig::new(15, 14)).unwrap();
    motors.push(MotorConfig::new(17, 18)).unwrap();
    motors.push(MotorConfig::new(21, 20)).unwrap();
    SystemConfig::with_motors(motors)
}

/// Test that the default bench configuration validates.
#[test]
fn test_bench_config_valid() {
    assert!(validate_config(&bench()).is_ok());
}

/// Test that an empty motor list is rejected.
#[test]
fn test_no_motors() {
    let config = SystemConfig::with_motors(heapless::Vec::new());

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::NoMotors))
    );
}

/// Test that a zero leg length is rejected.
#[test]
fn test_zero_leg_length() {
    let mut config = bench();
    config.cycle.leg_steps = 0;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::ZeroLegLength))
    );
}

/// Test that negative legs are allowed (first leg runs in reverse).
#[test]
fn test_negative_leg_length_valid() {
    let mut config = bench();
    config.cycle.leg_steps = -1000;

    assert!(validate_config(&config).is_ok());
}

/// Test that non-positive or non-finite speeds are rejected.
#[test]
fn test_invalid_speed() {
    for speed in [0.0, -4000.0, f32::INFINITY] {
        let mut config = bench();
        config.cycle.speed_hz = StepsPerSec(speed);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSpeed(_)))
        ));
    }
}

/// Test that NaN acceleration is rejected.
#[test]
fn test_invalid_acceleration() {
    let mut config = bench();
    config.cycle.acceleration.0 = f32::NAN;

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidAcceleration(_)))
    ));
}

/// Test the engine task rate and poll interval bounds.
#[test]
fn test_cadence_bounds() {
    let mut config = bench();
    config.engine.task_rate_ms = 0;
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidTaskRate(0)))
    );

    let mut config = bench();
    config.cycle.poll_interval_ms = 51;
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidPollInterval(51)))
    );

    let mut config = bench();
    config.cycle.poll_interval_ms = 50;
    assert!(validate_config(&config).is_ok());
}

/// Test that a pin shared between two motors is rejected.
#[test]
fn test_duplicate_pin() {
    let mut config = bench();
    config.motors[2].dir_pin = 17;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DuplicatePin(17)))
    );
}

/// Test that the enable line may not reuse a STEP/DIR pin.
#[test]
fn test_enable_pin_collision() {
    let mut config = bench();
    config.enable = Some(EnableConfig {
        pin: 14,
        low_active: false,
        auto_enable: true,
    });

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DuplicatePin(14)))
    );

    config.enable = Some(EnableConfig {
        pin: 16,
        low_active: false,
        auto_enable: true,
    });
    assert!(validate_config(&config).is_ok());
}
