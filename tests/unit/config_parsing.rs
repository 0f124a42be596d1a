//! Unit tests for TOML configuration parsing.

use stepper_lockstep::config::{load_config, parse_config, SystemConfig, MAX_MOTORS};
use stepper_lockstep::{Millis, StepsPerSec, StepsPerSecSquared};

/// Test parsing the three-motor bench configuration from TOML.
#[test]
fn test_parse_bench_config() {
    let toml_str = r#"
[engine]
task_rate_ms = 1
step_pulse_us = 2

[cycle]
leg_steps = 1000
pause_ms = 1000
poll_interval_ms = 1
speed_hz = 4000.0
acceleration = 16000.0

[[motors]]
step_pin = 15
dir_pin = 14

[[motors]]
step_pin = 17
dir_pin = 18

[[motors]]
step_pin = 21
dir_pin = 20
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.motor_count(), 3);
    assert_eq!(config.engine.task_rate(), Millis(1));
    assert_eq!(config.engine.step_pulse_us, 2);
    assert_eq!(config.cycle.leg_steps, 1000);
    assert_eq!(config.cycle.pause(), Millis(1000));
    assert_eq!(config.cycle.poll_interval(), Millis(1));
    assert_eq!(config.cycle.speed_hz, StepsPerSec(4000.0));
    assert_eq!(config.cycle.acceleration, StepsPerSecSquared(16000.0));

    let third = config.motor(2).expect("Motor not found");
    assert_eq!(third.step_pin, 21);
    assert_eq!(third.dir_pin, 20);
}

/// Sections left out fall back to the bench defaults.
#[test]
fn test_defaults() {
    let toml_str = r#"
[[motors]]
step_pin = 15
dir_pin = 14
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let motor = config.motor(0).unwrap();

    assert_eq!(config.cycle.leg_steps, 1000);
    assert_eq!(config.cycle.pause_ms, 1000);
    assert_eq!(config.cycle.poll_interval_ms, 1);
    assert_eq!(config.engine.task_rate_ms, 1);
    assert!(config.enable.is_none());
    assert!(motor.dir_high_counts_up);
    assert_eq!(motor.dir_change_delay_us, 200);
    assert_eq!(motor.label(), "");
}

/// Motor order in the file is slot order.
#[test]
fn test_named_motors_keep_order() {
    let toml_str = r#"
[[motors]]
name = "left"
step_pin = 15
dir_pin = 14

[[motors]]
name = "right"
step_pin = 17
dir_pin = 18
dir_high_counts_up = false
"#;

    let config = parse_config(toml_str).unwrap();
    let (index, right) = config.motor_named("right").expect("Motor not found");

    assert_eq!(index, 1);
    assert!(!right.dir_high_counts_up);
    assert_eq!(config.motor_named("left").unwrap().0, 0);
    assert!(config.motor_named("middle").is_none());
}

/// Test parsing the shared enable line.
#[test]
fn test_parse_enable() {
    let toml_str = r#"
[enable]
pin = 16
low_active = true
auto_enable = false

[[motors]]
step_pin = 15
dir_pin = 14
"#;

    let config = parse_config(toml_str).unwrap();
    let enable = config.enable.expect("enable section missing");

    assert_eq!(enable.pin, 16);
    assert!(enable.low_active);
    assert!(!enable.auto_enable);
}

/// More motors than the list can hold is a parse error.
#[test]
fn test_too_many_motors_rejected() {
    let mut toml_str = String::new();
    for i in 0..=MAX_MOTORS as u8 {
        toml_str.push_str(&format!(
            "[[motors]]\nstep_pin = {}\ndir_pin = {}\n\n",
            2 * i,
            2 * i + 1
        ));
    }

    assert!(parse_config(&toml_str).is_err());
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("stepper_lockstep_load_test.toml");
    std::fs::write(
        &path,
        "[cycle]\nleg_steps = -250\n\n[[motors]]\nstep_pin = 15\ndir_pin = 14\n",
    )
    .unwrap();

    let config = load_config(&path).expect("Failed to load config");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.cycle.leg_steps, -250);
    assert_eq!(config.motor_count(), 1);
}
