//! Motion execution - walks a profile one step at a time.

use super::profile::{MotionPhase, MotionProfile};

/// Runtime state during motion execution.
#[derive(Debug, Clone)]
pub struct MotionExecutor {
    /// The computed profile being executed.
    profile: MotionProfile,

    /// Steps emitted so far.
    current_step: u32,

    /// Current phase of motion.
    phase: MotionPhase,
}

impl MotionExecutor {
    /// Create a new executor for a motion profile.
    pub fn new(profile: MotionProfile) -> Self {
        let phase = if profile.is_zero() {
            MotionPhase::Complete
        } else {
            MotionPhase::Accelerating
        };

        Self {
            profile,
            current_step: 0,
            phase,
        }
    }

    /// Check if motion is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == MotionPhase::Complete
    }

    /// Get the current step number.
    #[inline]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Get the total number of steps.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.profile.total_steps
    }

    /// Get steps remaining.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.profile.total_steps.saturating_sub(self.current_step)
    }

    /// Get the current phase.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Interval from the step about to be emitted to the one after it.
    #[inline]
    pub fn current_interval_ns(&self) -> u32 {
        self.profile.interval_at(self.current_step)
    }

    /// Get the motion profile.
    #[inline]
    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    /// Record one emitted step.
    ///
    /// Returns `true` if more steps follow, `false` once the profile is done.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }

        self.current_step += 1;
        self.phase = self.profile.phase_at(self.current_step);

        !self.is_complete()
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.profile.total_steps == 0 {
            1.0
        } else {
            self.current_step as f32 / self.profile.total_steps as f32
        }
    }
}
