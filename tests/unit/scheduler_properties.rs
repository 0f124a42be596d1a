//! Property tests for the lock-step scheduler.

use proptest::prelude::*;
use stepper_lockstep::{
    ActuatorBank, CycleSettings, Millis, MotionScheduler, Slot, Timestamp, Transition,
};

use super::support::{tick_bank, SimActuator};

const CAPACITY: usize = 8;

type Scheduler = MotionScheduler<SimActuator, CAPACITY>;

fn scheduler(durations: &[u32], leg_steps: i32, pause: u32) -> Scheduler {
    let mut bank = ActuatorBank::new();
    for &ticks in durations {
        bank.push_bound(SimActuator::with_leg_ticks(ticks)).unwrap();
    }
    MotionScheduler::new(bank, CycleSettings::new(leg_steps, Millis(pause)))
}

/// One simulated poll: the engine advances, time advances, the scheduler polls.
struct Event {
    at: Timestamp,
    in_motion_before: bool,
    transition: Option<Transition>,
}

fn simulate(s: &mut Scheduler, start: u32, gaps: &[u32]) -> Vec<Event> {
    let mut now = start;
    let mut events = Vec::with_capacity(gaps.len());
    for &gap in gaps {
        tick_bank(s.bank_mut());
        now = now.wrapping_add(gap);
        let in_motion_before = s.any_actuator_in_motion();
        let transition = s.poll(Timestamp(now));
        events.push(Event {
            at: Timestamp(now),
            in_motion_before,
            transition,
        });
    }
    events
}

fn leg_steps() -> impl Strategy<Value = i32> {
    prop_oneof![-5000i32..=-1, 1i32..=5000]
}

proptest! {
    /// Legs alternate in sign, starting with the configured leg.
    #[test]
    fn legs_alternate_from_first(
        durations in prop::collection::vec(1u32..20, 1..=CAPACITY),
        leg in leg_steps(),
        pause in 0u32..50,
        gaps in prop::collection::vec(1u32..10, 1..400),
    ) {
        let mut s = scheduler(&durations, leg, pause);
        let events = simulate(&mut s, 0, &gaps);

        let legs: Vec<i32> = events
            .iter()
            .filter_map(|e| match e.transition {
                Some(Transition::LegStarted { steps }) => Some(steps),
                _ => None,
            })
            .collect();

        for (i, steps) in legs.iter().enumerate() {
            let expected = if i % 2 == 0 { leg } else { -leg };
            prop_assert_eq!(*steps, expected);
        }

        for actuator in s.bank().bound() {
            prop_assert_eq!(&actuator.legs, &legs);
            let expected_position = if legs.len() % 2 == 1 { leg as i64 } else { 0 };
            prop_assert_eq!(actuator.position, expected_position);
        }
        prop_assert_eq!(s.legs_started() as usize, legs.len());
    }

    /// A leg is only ever issued when nothing in the bank is moving, and
    /// transitions strictly alternate between leg and pause.
    #[test]
    fn no_overlapping_legs(
        durations in prop::collection::vec(1u32..30, 1..=CAPACITY),
        pause in 0u32..20,
        gaps in prop::collection::vec(1u32..5, 1..400),
    ) {
        let mut s = scheduler(&durations, 100, pause);
        let events = simulate(&mut s, 0, &gaps);

        let mut expect_leg = true;
        for e in &events {
            match e.transition {
                Some(Transition::LegStarted { .. }) => {
                    prop_assert!(!e.in_motion_before);
                    prop_assert!(expect_leg);
                    expect_leg = false;
                }
                Some(Transition::PauseStarted { .. }) => {
                    prop_assert!(!e.in_motion_before);
                    prop_assert!(!expect_leg);
                    expect_leg = true;
                }
                None => {}
            }
        }
    }

    /// No leg starts before the pause that precedes it has elapsed, even
    /// when the counter wraps in between.
    #[test]
    fn pause_lower_bound(
        durations in prop::collection::vec(1u32..10, 1..=4),
        pause in 1u32..200,
        start in prop_oneof![0u32..1000, (u32::MAX - 2000)..=u32::MAX],
        gaps in prop::collection::vec(1u32..7, 1..600),
    ) {
        let mut s = scheduler(&durations, 100, pause);
        let events = simulate(&mut s, start, &gaps);

        let mut paused_at: Option<Timestamp> = None;
        for e in &events {
            match e.transition {
                Some(Transition::PauseStarted { until }) => {
                    prop_assert_eq!(until.since(e.at), pause as i32);
                    paused_at = Some(e.at);
                }
                Some(Transition::LegStarted { .. }) => {
                    if let Some(t) = paused_at.take() {
                        prop_assert!(e.at.since(t) >= pause as i32);
                    }
                }
                None => {}
            }
        }
    }

    /// Polling again at the same instant with nothing changed takes no
    /// further transition.
    #[test]
    fn repeated_polls_idempotent(
        durations in prop::collection::vec(1u32..10, 1..=4),
        pause in 1u32..50,
        gaps in prop::collection::vec(1u32..5, 1..200),
        repeats in 1usize..5,
    ) {
        let mut s = scheduler(&durations, 100, pause);
        let mut now = 0u32;

        for &gap in &gaps {
            tick_bank(s.bank_mut());
            now += gap;
            s.poll(Timestamp(now));
            let phase = s.phase();
            let legs = s.legs_started();

            for _ in 0..repeats {
                prop_assert_eq!(s.poll(Timestamp(now)), None);
            }
            prop_assert_eq!(s.phase(), phase);
            prop_assert_eq!(s.legs_started(), legs);
        }
    }

    /// An unbound slot anywhere in the bank changes nothing for the others.
    #[test]
    fn placeholder_transparent(
        durations in prop::collection::vec(1u32..20, 1..CAPACITY),
        placeholder_at in 0usize..CAPACITY,
        leg in leg_steps(),
        pause in 0u32..30,
        gaps in prop::collection::vec(1u32..5, 1..300),
    ) {
        let mut plain = scheduler(&durations, leg, pause);

        let placeholder_at = placeholder_at.min(durations.len());
        let mut bank: ActuatorBank<SimActuator, CAPACITY> = ActuatorBank::new();
        for (i, &ticks) in durations.iter().enumerate() {
            if i == placeholder_at {
                prop_assert!(bank.push_unbound());
            }
            bank.push_bound(SimActuator::with_leg_ticks(ticks)).unwrap();
        }
        if placeholder_at == durations.len() {
            prop_assert!(bank.push_unbound());
        }
        let mut degraded = MotionScheduler::new(bank, CycleSettings::new(leg, Millis(pause)));

        let a: Vec<_> = simulate(&mut plain, 0, &gaps).into_iter().map(|e| e.transition).collect();
        let b: Vec<_> = simulate(&mut degraded, 0, &gaps).into_iter().map(|e| e.transition).collect();
        prop_assert_eq!(a, b);

        prop_assert!(matches!(degraded.bank().slot(placeholder_at), Some(Slot::Unbound)));
        let plain_positions: Vec<i64> = plain.bank().bound().map(|x| x.position).collect();
        let degraded_positions: Vec<i64> = degraded.bank().bound().map(|x| x.position).collect();
        prop_assert_eq!(plain_positions, degraded_positions);
    }
}
