//! Example: Simulated lock-step cycle.
//!
//! This example demonstrates how to:
//! - Load a motor bank from TOML
//! - Bind it through the software engine, with one motor on a missing pin
//! - Run the alternating cycle until a few legs have completed
//!
//! Run with: `cargo run --example simulated_cycle --features std`

use core::convert::Infallible;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use stepper_lockstep::{
    bind_bank,
    config::MAX_MOTORS,
    engine::PinSource,
    error::{BindFailure, Result},
    parse_config, MotionScheduler, OperatingSystemClock, PollLoop, SoftEngine, SystemClock,
    Transition,
};

/// Output pin with nothing behind it.
#[derive(Debug)]
struct VirtualPin;

impl ErrorType for VirtualPin {
    type Error = Infallible;
}

impl OutputPin for VirtualPin {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        Ok(())
    }
}

/// A 30-pin header where each pin can be claimed once.
#[derive(Debug, Default)]
struct VirtualHeader {
    claimed: u32,
}

impl VirtualHeader {
    fn take(&mut self, pin: u8) -> core::result::Result<(), BindFailure> {
        if pin >= 30 {
            return Err(BindFailure::InvalidPin);
        }
        if self.claimed & (1 << pin) != 0 {
            return Err(BindFailure::PinUnavailable);
        }
        self.claimed |= 1 << pin;
        Ok(())
    }
}

impl PinSource for VirtualHeader {
    type Step = VirtualPin;
    type Dir = VirtualPin;
    type Enable = VirtualPin;

    fn claim(
        &mut self,
        step_pin: u8,
        dir_pin: u8,
    ) -> core::result::Result<(VirtualPin, VirtualPin), BindFailure> {
        self.take(step_pin)?;
        self.take(dir_pin)?;
        Ok((VirtualPin, VirtualPin))
    }

    fn claim_enable(&mut self, pin: u8) -> core::result::Result<VirtualPin, BindFailure> {
        self.take(pin)?;
        Ok(VirtualPin)
    }
}

/// Cooperative yield backed by a thread sleep.
#[derive(Clone)]
struct Sleep;

impl DelayNs for Sleep {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }
}

fn main() -> Result<()> {
    println!("=== Simulated Lock-Step Cycle ===\n");

    let toml_content = r#"
[engine]
task_rate_ms = 1
step_pulse_us = 2

[cycle]
leg_steps = 400
pause_ms = 250
poll_interval_ms = 1
speed_hz = 4000.0
acceleration = 16000.0

[enable]
pin = 16

[[motors]]
name = "left"
step_pin = 15
dir_pin = 14

[[motors]]
name = "middle"
step_pin = 17
dir_pin = 18

# Not on the header: this slot stays unbound
[[motors]]
name = "right"
step_pin = 41
dir_pin = 20
"#;

    let config = parse_config(toml_content)?;
    println!(
        "Loaded {} motors, leg {} steps, pause {} ms",
        config.motor_count(),
        config.cycle.leg_steps,
        config.cycle.pause_ms
    );

    let mut engine = SoftEngine::new(VirtualHeader::default(), Sleep, MAX_MOTORS);
    let (bank, report) = bind_bank::<_, MAX_MOTORS>(&mut engine, &config)?;

    for failure in report.failures() {
        let name = config
            .motor(failure.index)
            .map(|m| m.label())
            .unwrap_or("?");
        println!("  slot {} ({}): {}", failure.index, name, failure);
    }
    println!("Bound {} of {} slots\n", bank.bound_count(), bank.len());

    let scheduler = MotionScheduler::from_config(bank, &config);
    let mut poll_loop = PollLoop::new(
        scheduler,
        OperatingSystemClock::new(),
        Sleep,
        config.cycle.poll_interval(),
    );

    while poll_loop.scheduler().legs_started() < 4 || !poll_loop.scheduler().is_paused() {
        let transition = poll_loop.tick_with(|bank, now| {
            engine.service(bank, now);
        });

        match transition {
            Some(Transition::LegStarted { steps }) => {
                println!(
                    "[{:>6} ms] leg {} started: {:+} steps",
                    poll_loop.clock().now().millis(),
                    poll_loop.scheduler().legs_started(),
                    steps
                );
            }
            Some(Transition::PauseStarted { until }) => {
                println!(
                    "[{:>6} ms] all idle, pausing until {} ms",
                    poll_loop.clock().now().millis(),
                    until.millis()
                );
            }
            None => {}
        }
    }

    println!("\nFinal positions:");
    for (index, slot) in poll_loop.scheduler().bank().slots().iter().enumerate() {
        match slot.actuator() {
            Some(actuator) => println!("  slot {}: {} steps", index, actuator.current_position().value()),
            None => println!("  slot {}: unbound", index),
        }
    }

    Ok(())
}
