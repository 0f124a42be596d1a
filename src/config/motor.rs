//! Per-motor pin configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// One `[[motors]]` entry. Position in the list is the slot index.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotorConfig {
    /// Optional human-readable name (max 32 chars).
    #[serde(default)]
    pub name: Option<String<32>>,

    /// STEP output pin number.
    pub step_pin: u8,

    /// DIR output pin number.
    pub dir_pin: u8,

    /// DIR high means the position counts up.
    #[serde(default = "default_dir_high_counts_up")]
    pub dir_high_counts_up: bool,

    /// Settle time after a DIR change before the first step, in microseconds.
    #[serde(default = "default_dir_change_delay_us")]
    pub dir_change_delay_us: u32,
}

fn default_dir_high_counts_up() -> bool {
    true
}

fn default_dir_change_delay_us() -> u32 {
    200
}

impl MotorConfig {
    /// Create a motor entry with default polarity and settle time.
    pub fn new(step_pin: u8, dir_pin: u8) -> Self {
        Self {
            name: None,
            step_pin,
            dir_pin,
            dir_high_counts_up: default_dir_high_counts_up(),
            dir_change_delay_us: default_dir_change_delay_us(),
        }
    }

    /// Name for diagnostics, empty if unnamed.
    pub fn label(&self) -> &str {
        self.name.as_ref().map(|n| n.as_str()).unwrap_or("")
    }
}
