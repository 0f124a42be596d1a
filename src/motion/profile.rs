//! Motion profile calculation.
//!
//! Trapezoidal step-rate profiles with independent acceleration and
//! deceleration rates, expressed directly in steps.

use libm::sqrtf;

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Position counts up (positive step count).
    Forward,
    /// Position counts down (negative step count).
    Reverse,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// Get the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Current phase of motion execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Accelerating from rest toward cruise velocity.
    Accelerating,
    /// Moving at constant cruise velocity.
    Cruising,
    /// Decelerating from cruise velocity to rest.
    Decelerating,
    /// Motion complete.
    Complete,
}

/// Computed motion profile for a move (asymmetric trapezoidal).
#[derive(Debug, Clone)]
pub struct MotionProfile {
    /// Total steps to move (absolute value).
    pub total_steps: u32,

    /// Direction of motion.
    pub direction: Direction,

    /// Steps in acceleration phase.
    pub accel_steps: u32,

    /// Steps in cruise phase (constant velocity).
    pub cruise_steps: u32,

    /// Steps in deceleration phase.
    pub decel_steps: u32,

    /// Cruise step interval (nanoseconds) - at max velocity.
    pub cruise_interval_ns: u32,

    /// Cruise velocity in steps/sec.
    pub max_velocity: f32,

    /// Acceleration rate in steps/sec².
    pub accel_rate: f32,

    /// Deceleration rate in steps/sec².
    pub decel_rate: f32,
}

impl MotionProfile {
    /// Create an asymmetric trapezoidal motion profile.
    ///
    /// # Arguments
    ///
    /// * `total_steps` - Signed step count (positive = forward, negative = reverse)
    /// * `max_velocity` - Maximum velocity in steps/sec
    /// * `acceleration` - Acceleration rate in steps/sec²
    /// * `deceleration` - Deceleration rate in steps/sec²
    pub fn asymmetric_trapezoidal(
        total_steps: i64,
        max_velocity: f32,
        acceleration: f32,
        deceleration: f32,
    ) -> Self {
        let direction = Direction::from_steps(total_steps);
        let steps = total_steps.unsigned_abs().min(u32::MAX as u64) as u32;

        if steps == 0 || max_velocity <= 0.0 || acceleration <= 0.0 || deceleration <= 0.0 {
            return Self::zero();
        }

        // Distance to reach cruise: d = v² / 2a
        let accel_distance = max_velocity * max_velocity / (2.0 * acceleration);
        let decel_distance = max_velocity * max_velocity / (2.0 * deceleration);

        let (accel_steps, cruise_steps, decel_steps) =
            if accel_distance + decel_distance >= steps as f32 {
                // Triangle profile: split the move where the two ramps meet
                let ratio = deceleration / (acceleration + deceleration);
                let accel_steps = (steps as f32 * ratio) as u32;
                let decel_steps = steps.saturating_sub(accel_steps);
                (accel_steps, 0u32, decel_steps)
            } else {
                let accel_steps = accel_distance as u32;
                let decel_steps = decel_distance as u32;
                let cruise_steps = steps.saturating_sub(accel_steps + decel_steps);
                (accel_steps, cruise_steps, decel_steps)
            };

        Self {
            total_steps: steps,
            direction,
            accel_steps,
            cruise_steps,
            decel_steps,
            cruise_interval_ns: (1_000_000_000.0 / max_velocity) as u32,
            max_velocity,
            accel_rate: acceleration,
            decel_rate: deceleration,
        }
    }

    /// Create a symmetric trapezoidal profile (same accel and decel).
    pub fn symmetric_trapezoidal(total_steps: i64, max_velocity: f32, acceleration: f32) -> Self {
        Self::asymmetric_trapezoidal(total_steps, max_velocity, acceleration, acceleration)
    }

    /// Create a zero-length profile (no motion).
    pub fn zero() -> Self {
        Self {
            total_steps: 0,
            direction: Direction::Forward,
            accel_steps: 0,
            cruise_steps: 0,
            decel_steps: 0,
            cruise_interval_ns: u32::MAX,
            max_velocity: 0.0,
            accel_rate: 0.0,
            decel_rate: 0.0,
        }
    }

    /// Check if this is a zero-length profile.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.total_steps == 0
    }

    /// Signed displacement of the whole profile.
    #[inline]
    pub fn displacement(&self) -> i64 {
        self.total_steps as i64 * self.direction.sign()
    }

    /// Get the phase at a given step number.
    pub fn phase_at(&self, step: u32) -> MotionPhase {
        if step >= self.total_steps {
            MotionPhase::Complete
        } else if step < self.accel_steps {
            MotionPhase::Accelerating
        } else if step < self.accel_steps + self.cruise_steps {
            MotionPhase::Cruising
        } else {
            MotionPhase::Decelerating
        }
    }

    /// Interval in nanoseconds between step `step` and the one after it.
    ///
    /// The step rate is the lowest of the cruise rate, the rate reachable
    /// after `step + 1` steps of acceleration (v = sqrt(2·a·n)) and the rate
    /// that can still be shed over the remaining steps.
    pub fn interval_at(&self, step: u32) -> u32 {
        if step >= self.total_steps {
            return u32::MAX;
        }

        let from_start = (step + 1) as f32;
        let to_end = (self.total_steps - step) as f32;

        let velocity = self
            .max_velocity
            .min(sqrtf(2.0 * self.accel_rate * from_start))
            .min(sqrtf(2.0 * self.decel_rate * to_end));

        (1_000_000_000.0 / velocity) as u32
    }

    /// Estimate total duration of the motion profile in seconds.
    ///
    /// This is an approximation based on the trapezoidal profile phases.
    pub fn estimated_duration_secs(&self) -> f32 {
        if self.total_steps == 0 {
            return 0.0;
        }

        // Peak velocity actually reached (lower than cruise on a triangle)
        let peak = if self.cruise_steps == 0 {
            sqrtf(2.0 * self.accel_rate * self.accel_steps as f32).min(self.max_velocity)
        } else {
            self.max_velocity
        };

        if peak <= 0.0 {
            return 0.0;
        }

        // v = a·t for each ramp, d / v for the cruise
        let accel_time = peak / self.accel_rate;
        let cruise_time = self.cruise_steps as f32 / peak;
        let decel_time = peak / self.decel_rate;

        accel_time + cruise_time + decel_time
    }
}
