//! Ordered, fixed-capacity actuator collection.

use heapless::Vec;

use super::{Actuator, Slot};

/// The ordered set of actuator slots driven by one scheduler.
///
/// Slot order is configuration order, which is also the order moves are
/// issued in. `N` is the capacity; unbound slots count toward it.
#[derive(Debug)]
pub struct ActuatorBank<A, const N: usize> {
    slots: Vec<Slot<A>, N>,
}

impl<A, const N: usize> Default for ActuatorBank<A, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, const N: usize> ActuatorBank<A, N> {
    /// Create an empty bank.
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a slot.
    ///
    /// # Errors
    ///
    /// Returns the slot back if the bank is full.
    pub fn push(&mut self, slot: Slot<A>) -> Result<(), Slot<A>> {
        self.slots.push(slot)
    }

    /// Append a live actuator.
    ///
    /// # Errors
    ///
    /// Returns the actuator back if the bank is full.
    pub fn push_bound(&mut self, actuator: A) -> Result<(), A> {
        if self.slots.is_full() {
            return Err(actuator);
        }
        let _ = self.slots.push(Slot::Bound(actuator));
        Ok(())
    }

    /// Append a placeholder slot.
    ///
    /// Returns `false` if the bank is full.
    pub fn push_unbound(&mut self) -> bool {
        self.slots.push(Slot::Unbound).is_ok()
    }

    /// Number of slots, bound or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the bank has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of live actuators.
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_bound()).count()
    }

    /// Slot at `index`.
    #[inline]
    pub fn slot(&self, index: usize) -> Option<&Slot<A>> {
        self.slots.get(index)
    }

    /// Live actuator at `index`, if bound.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&A> {
        self.slots.get(index).and_then(Slot::actuator)
    }

    /// Live actuator at `index`, if bound.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut A> {
        self.slots.get_mut(index).and_then(Slot::actuator_mut)
    }

    /// All slots in order.
    pub fn slots(&self) -> &[Slot<A>] {
        &self.slots
    }

    /// Live actuators in slot order.
    pub fn bound(&self) -> impl Iterator<Item = &A> {
        self.slots.iter().filter_map(Slot::actuator)
    }

    /// Live actuators in slot order.
    pub fn bound_mut(&mut self) -> impl Iterator<Item = &mut A> {
        self.slots.iter_mut().filter_map(Slot::actuator_mut)
    }
}

impl<A: Actuator, const N: usize> ActuatorBank<A, N> {
    /// True if at least one actuator reports a move in flight.
    ///
    /// Reads every slot on each call; nothing is cached.
    pub fn any_in_motion(&self) -> bool {
        self.slots.iter().any(|s| s.is_in_motion())
    }

    /// Issue the same relative move to every slot, in slot order.
    pub fn issue_all(&mut self, steps: i32) {
        for slot in self.slots.iter_mut() {
            slot.issue_relative_move(steps);
        }
    }
}
