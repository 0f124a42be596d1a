//! Lock-step motion cycle.
//!
//! [`MotionScheduler`] drives every slot of an [`ActuatorBank`] through an
//! endless cycle of equal, alternating legs. Each leg is issued to all slots
//! within one [`poll`](MotionScheduler::poll) call, and every transition waits
//! on a full barrier: no actuator may still be moving.
//!
//! ```text
//!            deadline reached, all idle
//!   Paused ─────────────────────────────▶ Moving
//!      ▲      issue ±leg to every slot      │
//!      │                                    │ all idle
//!      └────────────────────────────────────┘
//!             deadline = now + pause
//! ```

mod state;

pub use state::{CycleSettings, Phase, Transition};

use crate::actuator::{Actuator, ActuatorBank};
use crate::config::SystemConfig;
use crate::motion::Direction;
use crate::time::Timestamp;

/// Alternating-leg scheduler over a bank of `N` actuator slots.
///
/// `poll` never blocks and performs at most one transition per call. It has
/// no error path: unbound slots are inert and a bank with no live actuator
/// still cycles.
#[derive(Debug)]
pub struct MotionScheduler<A, const N: usize> {
    bank: ActuatorBank<A, N>,
    settings: CycleSettings,
    phase: Phase,
    next_direction: Direction,
    legs_started: u32,
}

impl<A: Actuator, const N: usize> MotionScheduler<A, N> {
    /// Create a scheduler that starts the first forward leg on the first poll
    /// at which every actuator is idle.
    pub fn new(bank: ActuatorBank<A, N>, settings: CycleSettings) -> Self {
        Self {
            bank,
            settings,
            phase: Phase::Paused { until: None },
            next_direction: Direction::Forward,
            legs_started: 0,
        }
    }

    /// Create a scheduler using the `[cycle]` section of `config`.
    pub fn from_config(bank: ActuatorBank<A, N>, config: &SystemConfig) -> Self {
        Self::new(bank, CycleSettings::from_config(config))
    }

    /// Advance the cycle at `now`.
    ///
    /// Returns the transition taken, or `None` if the barrier or the pause
    /// deadline held the scheduler where it was.
    pub fn poll(&mut self, now: Timestamp) -> Option<Transition> {
        match self.phase {
            Phase::Paused { until } => {
                let due = until.map_or(true, |deadline| now.has_reached(deadline));
                if !due || self.bank.any_in_motion() {
                    return None;
                }

                let steps = match self.next_direction {
                    Direction::Forward => self.settings.leg_steps,
                    Direction::Reverse => self.settings.leg_steps.saturating_neg(),
                };

                // All slots in one burst, in slot order
                self.bank.issue_all(steps);

                self.next_direction = self.next_direction.opposite();
                self.phase = Phase::Moving;
                self.legs_started = self.legs_started.wrapping_add(1);

                info!(
                    "Leg {} started: {} steps at {} ms",
                    self.legs_started,
                    steps,
                    now.millis()
                );
                Some(Transition::LegStarted { steps })
            }
            Phase::Moving => {
                if self.bank.any_in_motion() {
                    return None;
                }

                let until = now.after(self.settings.pause);
                self.phase = Phase::Paused { until: Some(until) };

                debug!("All actuators idle, pausing until {} ms", until.millis());
                Some(Transition::PauseStarted { until })
            }
        }
    }

    /// True iff at least one slot reports a move in flight.
    #[inline]
    pub fn any_actuator_in_motion(&self) -> bool {
        self.bank.any_in_motion()
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the scheduler is waiting to start a leg.
    #[inline]
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    /// Direction of the next leg.
    #[inline]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Number of legs issued so far.
    #[inline]
    pub fn legs_started(&self) -> u32 {
        self.legs_started
    }

    /// Cycle parameters.
    #[inline]
    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    /// The driven bank.
    #[inline]
    pub fn bank(&self) -> &ActuatorBank<A, N> {
        &self.bank
    }

    /// The driven bank, for engine maintenance.
    ///
    /// Issuing moves through this reference bypasses the barrier.
    #[inline]
    pub fn bank_mut(&mut self) -> &mut ActuatorBank<A, N> {
        &mut self.bank
    }

    /// Give back the bank.
    pub fn into_bank(self) -> ActuatorBank<A, N> {
        self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Millis;

    /// Actuator whose completion the test controls.
    #[derive(Debug, Default)]
    struct Scripted {
        moving: bool,
        moves: std::vec::Vec<i32>,
    }

    impl Actuator for Scripted {
        fn issue_relative_move(&mut self, steps: i32) {
            assert!(!self.moving, "move issued while in flight");
            self.moving = true;
            self.moves.push(steps);
        }

        fn is_in_motion(&self) -> bool {
            self.moving
        }
    }

    fn scheduler(bound: usize) -> MotionScheduler<Scripted, 4> {
        let mut bank = ActuatorBank::new();
        for _ in 0..bound {
            bank.push_bound(Scripted::default()).unwrap();
        }
        MotionScheduler::new(bank, CycleSettings::new(1000, Millis(1000)))
    }

    fn finish_all(s: &mut MotionScheduler<Scripted, 4>) {
        for a in s.bank_mut().bound_mut() {
            a.moving = false;
        }
    }

    #[test]
    fn test_first_poll_starts_forward_leg() {
        let mut s = scheduler(3);
        assert_eq!(s.phase(), Phase::Paused { until: None });

        assert_eq!(
            s.poll(Timestamp(0)),
            Some(Transition::LegStarted { steps: 1000 })
        );
        assert_eq!(s.phase(), Phase::Moving);
        assert_eq!(s.next_direction(), Direction::Reverse);
        assert!(s.bank().bound().all(|a| a.is_in_motion()));
    }

    #[test]
    fn test_barrier_holds_moving() {
        let mut s = scheduler(2);
        s.poll(Timestamp(0));

        s.bank_mut().get_mut(0).unwrap().moving = false;
        assert_eq!(s.poll(Timestamp(300)), None);
        assert_eq!(s.phase(), Phase::Moving);

        s.bank_mut().get_mut(1).unwrap().moving = false;
        assert_eq!(
            s.poll(Timestamp(400)),
            Some(Transition::PauseStarted {
                until: Timestamp(1400)
            })
        );
    }

    #[test]
    fn test_pause_then_reverse() {
        let mut s = scheduler(1);
        s.poll(Timestamp(0));
        finish_all(&mut s);
        s.poll(Timestamp(250));

        assert_eq!(s.poll(Timestamp(1249)), None);
        assert_eq!(
            s.poll(Timestamp(1250)),
            Some(Transition::LegStarted { steps: -1000 })
        );
        assert_eq!(s.bank().get(0).unwrap().moves, [1000, -1000]);
        assert_eq!(s.legs_started(), 2);
    }

    #[test]
    fn test_straggler_blocks_leg_after_deadline() {
        let mut s = scheduler(2);
        s.poll(Timestamp(0));
        finish_all(&mut s);
        s.poll(Timestamp(10));

        // Something restarted an actuator behind the scheduler's back
        s.bank_mut().get_mut(1).unwrap().moving = true;
        assert_eq!(s.poll(Timestamp(5000)), None);
        assert!(s.is_paused());

        finish_all(&mut s);
        assert_eq!(
            s.poll(Timestamp(5001)),
            Some(Transition::LegStarted { steps: -1000 })
        );
    }

    #[test]
    fn test_repeated_polls_same_instant() {
        let mut s = scheduler(2);
        assert!(s.poll(Timestamp(0)).is_some());
        assert_eq!(s.poll(Timestamp(0)), None);
        assert_eq!(s.poll(Timestamp(0)), None);
        assert_eq!(s.legs_started(), 1);
    }

    #[test]
    fn test_empty_bank_still_alternates() {
        let mut s = scheduler(0);
        assert!(s.bank_mut().push_unbound());

        assert_eq!(
            s.poll(Timestamp(0)),
            Some(Transition::LegStarted { steps: 1000 })
        );
        // Nothing is moving, so the next poll starts the pause
        assert!(s.poll(Timestamp(1)).is_some());
        assert_eq!(
            s.poll(Timestamp(1001)),
            Some(Transition::LegStarted { steps: -1000 })
        );
    }

    #[test]
    fn test_deadline_across_wrap() {
        let mut s = scheduler(1);
        s.poll(Timestamp(u32::MAX - 1500));
        finish_all(&mut s);

        let start = Timestamp(u32::MAX - 500);
        assert_eq!(
            s.poll(start),
            Some(Transition::PauseStarted {
                until: Timestamp(499)
            })
        );
        assert_eq!(s.poll(Timestamp(u32::MAX)), None);
        assert_eq!(s.poll(Timestamp(498)), None);
        assert!(s.poll(Timestamp(499)).is_some());
    }

    #[test]
    fn test_negative_leg_length() {
        let mut bank: ActuatorBank<Scripted, 4> = ActuatorBank::new();
        bank.push_bound(Scripted::default()).unwrap();
        let mut s = MotionScheduler::new(bank, CycleSettings::new(-200, Millis(0)));

        s.poll(Timestamp(0));
        finish_all(&mut s);
        s.poll(Timestamp(1));
        s.poll(Timestamp(1));
        assert_eq!(s.bank().get(0).unwrap().moves, [-200, 200]);
    }
}
