//! Monotonic time for the scheduler.
//!
//! The scheduler works on a wrapping millisecond counter, the same width a
//! microcontroller tick counter has. Deadlines are compared by signed
//! distance so they keep working across the wrap.

use core::time::Duration;

use crate::config::units::Millis;

/// Millisecond timestamp from a wrapping monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp(pub u32);

impl Timestamp {
    /// Create a timestamp from a raw millisecond count.
    #[inline]
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    /// Truncate an elapsed duration to the wrapping millisecond counter.
    #[inline]
    pub fn from_elapsed(elapsed: Duration) -> Self {
        Self(elapsed.as_millis() as u32)
    }

    /// Raw millisecond count.
    #[inline]
    pub const fn millis(self) -> u32 {
        self.0
    }

    /// The timestamp `delay` after this one, wrapping at the counter limit.
    #[inline]
    pub const fn after(self, delay: Millis) -> Self {
        Self(self.0.wrapping_add(delay.0))
    }

    /// Whether `deadline` has been reached at this timestamp.
    ///
    /// Valid while the two are less than half the counter range (~24.8 days) apart.
    #[inline]
    pub const fn has_reached(self, deadline: Timestamp) -> bool {
        (self.0.wrapping_sub(deadline.0) as i32) >= 0
    }

    /// Signed milliseconds from `earlier` to `self`.
    #[inline]
    pub const fn since(self, earlier: Timestamp) -> i32 {
        self.0.wrapping_sub(earlier.0) as i32
    }
}

/// Something which records the elapsed real time.
///
/// This uses shared references because it may be shared between multiple
/// components at any one time.
pub trait SystemClock {
    /// The amount of time that has passed since a clock-specific reference
    /// point (e.g. device startup).
    fn elapsed(&self) -> Duration;

    /// Current time on the wrapping millisecond counter.
    fn now(&self) -> Timestamp {
        Timestamp::from_elapsed(self.elapsed())
    }
}

impl<C: SystemClock> SystemClock for &C {
    fn elapsed(&self) -> Duration {
        (*self).elapsed()
    }
}

/// A monotonically non-decreasing clock backed by the operating system.
///
/// Requires the `std` feature.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingSystemClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl OperatingSystemClock {
    /// Start a clock at the current instant.
    pub fn new() -> OperatingSystemClock {
        OperatingSystemClock::default()
    }
}

#[cfg(feature = "std")]
impl SystemClock for OperatingSystemClock {
    fn elapsed(&self) -> Duration {
        self.created_at.elapsed()
    }
}

#[cfg(feature = "std")]
impl Default for OperatingSystemClock {
    fn default() -> OperatingSystemClock {
        OperatingSystemClock {
            created_at: std::time::Instant::now(),
        }
    }
}
