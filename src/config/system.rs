//! System configuration - root configuration structure.

use heapless::Vec;
use serde::Deserialize;

use super::motor::MotorConfig;
use super::units::{Millis, StepsPerSec, StepsPerSecSquared};

/// Maximum number of motors a configuration can list.
pub const MAX_MOTORS: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemConfig {
    /// Pulse engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Motion cycle settings.
    #[serde(default)]
    pub cycle: CycleConfig,

    /// Optional enable (sleep) line shared by all drivers.
    #[serde(default)]
    pub enable: Option<EnableConfig>,

    /// Motors in slot order.
    pub motors: Vec<MotorConfig, MAX_MOTORS>,
}

/// `[engine]` section.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Period of the engine's maintenance task. Also bounds how far behind
    /// schedule a late service may catch up.
    #[serde(default = "default_task_rate_ms")]
    pub task_rate_ms: u8,

    /// STEP high time in microseconds.
    #[serde(default = "default_step_pulse_us")]
    pub step_pulse_us: u8,
}

fn default_task_rate_ms() -> u8 {
    1
}

fn default_step_pulse_us() -> u8 {
    2
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            task_rate_ms: default_task_rate_ms(),
            step_pulse_us: default_step_pulse_us(),
        }
    }
}

impl EngineConfig {
    /// Maintenance task period.
    #[inline]
    pub fn task_rate(&self) -> Millis {
        Millis(self.task_rate_ms as u32)
    }

    /// STEP high time in nanoseconds.
    #[inline]
    pub fn step_pulse_ns(&self) -> u32 {
        self.step_pulse_us as u32 * 1_000
    }
}

/// `[cycle]` section.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CycleConfig {
    /// Signed magnitude of each leg. The first leg moves by this amount.
    #[serde(default = "default_leg_steps")]
    pub leg_steps: i32,

    /// Pause between legs.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u32,

    /// Cooperative yield between scheduler polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u32,

    /// Cruise step rate for every motor.
    #[serde(default = "default_speed_hz")]
    pub speed_hz: StepsPerSec,

    /// Acceleration for every motor.
    #[serde(default = "default_acceleration")]
    pub acceleration: StepsPerSecSquared,
}

fn default_leg_steps() -> i32 {
    1000
}

fn default_pause_ms() -> u32 {
    1000
}

fn default_poll_interval_ms() -> u32 {
    1
}

fn default_speed_hz() -> StepsPerSec {
    StepsPerSec(4000.0)
}

fn default_acceleration() -> StepsPerSecSquared {
    StepsPerSecSquared(16000.0)
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            leg_steps: default_leg_steps(),
            pause_ms: default_pause_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            speed_hz: default_speed_hz(),
            acceleration: default_acceleration(),
        }
    }
}

impl CycleConfig {
    /// Pause between legs.
    #[inline]
    pub fn pause(&self) -> Millis {
        Millis(self.pause_ms)
    }

    /// Yield between polls.
    #[inline]
    pub fn poll_interval(&self) -> Millis {
        Millis(self.poll_interval_ms)
    }
}

/// `[enable]` section.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EnableConfig {
    /// Enable (sleep) pin number.
    pub pin: u8,

    /// Drivers are enabled by a low level.
    #[serde(default)]
    pub low_active: bool,

    /// Let the engine wake the drivers for each move.
    #[serde(default = "default_auto_enable")]
    pub auto_enable: bool,
}

fn default_auto_enable() -> bool {
    true
}

impl SystemConfig {
    /// Create a configuration with default engine and cycle settings.
    pub fn with_motors(motors: Vec<MotorConfig, MAX_MOTORS>) -> Self {
        Self {
            engine: EngineConfig::default(),
            cycle: CycleConfig::default(),
            enable: None,
            motors,
        }
    }

    /// Get a motor configuration by slot index.
    pub fn motor(&self, index: usize) -> Option<&MotorConfig> {
        self.motors.get(index)
    }

    /// Find a motor by name.
    pub fn motor_named(&self, name: &str) -> Option<(usize, &MotorConfig)> {
        self.motors
            .iter()
            .enumerate()
            .find(|(_, m)| m.name.as_ref().map(|n| n.as_str()) == Some(name))
    }

    /// Number of configured motors.
    pub fn motor_count(&self) -> usize {
        self.motors.len()
    }
}
