//! Fixed-cadence poll loop.
//!
//! [`PollLoop`] reads the clock, polls the scheduler once and then yields for
//! the configured poll interval through an embedded-hal [`DelayNs`]. On a
//! microcontroller the delay is the cooperative yield to the rest of the
//! firmware; on a host it is a sleep.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::actuator::{Actuator, ActuatorBank};
use crate::config::units::Millis;
use crate::scheduler::{MotionScheduler, Transition};
use crate::time::{SystemClock, Timestamp};

/// Drives a [`MotionScheduler`] at a fixed cadence.
pub struct PollLoop<A, C, D, const N: usize> {
    scheduler: MotionScheduler<A, N>,
    clock: C,
    delay: D,
    poll_interval: Millis,
}

impl<A, C, D, const N: usize> PollLoop<A, C, D, N>
where
    A: Actuator,
    C: SystemClock,
    D: DelayNs,
{
    /// Create a loop yielding `poll_interval` between polls.
    pub fn new(scheduler: MotionScheduler<A, N>, clock: C, delay: D, poll_interval: Millis) -> Self {
        Self {
            scheduler,
            clock,
            delay,
            poll_interval,
        }
    }

    /// Poll once, then yield.
    pub fn tick(&mut self) -> Option<Transition> {
        self.tick_with(|_, _| {})
    }

    /// Run `engine_task` over the bank, poll once, then yield.
    ///
    /// `engine_task` gets the elapsed clock time. It is where a software
    /// engine emits due steps.
    pub fn tick_with<F>(&mut self, mut engine_task: F) -> Option<Transition>
    where
        F: FnMut(&mut ActuatorBank<A, N>, Duration),
    {
        let elapsed = self.clock.elapsed();
        engine_task(self.scheduler.bank_mut(), elapsed);

        let transition = self.scheduler.poll(Timestamp::from_elapsed(elapsed));

        self.delay.delay_ms(self.poll_interval.value());
        transition
    }

    /// Poll forever.
    pub fn run(&mut self) -> ! {
        self.run_with(|_, _| {})
    }

    /// Run `engine_task` and poll forever.
    pub fn run_with<F>(&mut self, mut engine_task: F) -> !
    where
        F: FnMut(&mut ActuatorBank<A, N>, Duration),
    {
        info!(
            "Poll loop running every {} ms over {} slots",
            self.poll_interval.value(),
            self.scheduler.bank().len()
        );

        loop {
            self.tick_with(&mut engine_task);
        }
    }

    /// The scheduler being driven.
    pub fn scheduler(&self) -> &MotionScheduler<A, N> {
        &self.scheduler
    }

    /// The scheduler being driven.
    pub fn scheduler_mut(&mut self) -> &mut MotionScheduler<A, N> {
        &mut self.scheduler
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Yield between polls.
    pub fn poll_interval(&self) -> Millis {
        self.poll_interval
    }

    /// Break the loop back into its parts.
    pub fn into_parts(self) -> (MotionScheduler<A, N>, C, D) {
        (self.scheduler, self.clock, self.delay)
    }
}
