//! Error types for stepper-lockstep.
//!
//! Errors only arise while loading configuration and bringing actuators up.
//! The steady-state scheduler has no error path.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-lockstep operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// An actuator slot could not be bound to its hardware
    Bind(BindError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// No motors configured
    NoMotors,
    /// More motors configured than the bank can hold
    TooManyMotors {
        /// Number of motors in the configuration
        count: usize,
        /// Bank capacity
        max: usize,
    },
    /// Leg length of zero steps
    ZeroLegLength,
    /// Invalid speed (must be finite and > 0)
    InvalidSpeed(f32),
    /// Invalid acceleration (must be finite and > 0)
    InvalidAcceleration(f32),
    /// Engine task rate out of range (1-50 ms)
    InvalidTaskRate(u8),
    /// Poll interval out of range (1-50 ms)
    InvalidPollInterval(u32),
    /// STEP pulse width out of range (1-50 us)
    InvalidPulseWidth(u8),
    /// A pin is assigned more than once
    DuplicatePin(u8),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Why an engine refused to bind an actuator slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindFailure {
    /// The STEP or DIR pin is not available to the engine
    PinUnavailable,
    /// The engine has no free pulse-generation channel left
    ResourcesExhausted,
    /// The pin number does not exist on this target
    InvalidPin,
}

/// A failed actuator bind, reported during bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BindError {
    /// Slot index in configuration order
    pub index: usize,
    /// Configured STEP pin
    pub step_pin: u8,
    /// Configured DIR pin
    pub dir_pin: u8,
    /// Failure reason
    pub reason: BindFailure,
}

/// Reference engine errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Pin operation failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Bind(e) => write!(f, "Bind error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::NoMotors => write!(f, "No motors configured"),
            ConfigError::TooManyMotors { count, max } => {
                write!(f, "{} motors configured, at most {} supported", count, max)
            }
            ConfigError::ZeroLegLength => write!(f, "Leg length must be non-zero"),
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed: {}. Must be > 0", v),
            ConfigError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidTaskRate(v) => {
                write!(f, "Invalid engine task rate: {} ms. Must be 1-50", v)
            }
            ConfigError::InvalidPollInterval(v) => {
                write!(f, "Invalid poll interval: {} ms. Must be 1-50", v)
            }
            ConfigError::InvalidPulseWidth(v) => {
                write!(f, "Invalid step pulse width: {} us. Must be 1-50", v)
            }
            ConfigError::DuplicatePin(pin) => write!(f, "Pin {} is assigned more than once", pin),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for BindFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindFailure::PinUnavailable => write!(f, "pin unavailable"),
            BindFailure::ResourcesExhausted => write!(f, "no free channel"),
            BindFailure::InvalidPin => write!(f, "invalid pin"),
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "motor #{} (STEP pin {}, DIR pin {}): {}",
            self.index, self.step_pin, self.dir_pin, self.reason
        )
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<BindError> for Error {
    fn from(e: BindError) -> Self {
        Error::Bind(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for BindError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
