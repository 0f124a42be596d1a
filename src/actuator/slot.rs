//! A bank slot that is either a bound actuator or an inert placeholder.

use super::Actuator;

/// One entry of an [`ActuatorBank`](super::ActuatorBank).
///
/// A slot whose actuator failed to bind stays in the bank as `Unbound` so
/// indices keep matching the configuration. `Unbound` ignores moves and is
/// never in motion.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<A> {
    /// A live actuator.
    Bound(A),
    /// Placeholder for an actuator that could not be bound.
    Unbound,
}

impl<A> Slot<A> {
    /// Whether this slot holds a live actuator.
    #[inline]
    pub fn is_bound(&self) -> bool {
        matches!(self, Slot::Bound(_))
    }

    /// The live actuator, if any.
    #[inline]
    pub fn actuator(&self) -> Option<&A> {
        match self {
            Slot::Bound(a) => Some(a),
            Slot::Unbound => None,
        }
    }

    /// The live actuator, if any.
    #[inline]
    pub fn actuator_mut(&mut self) -> Option<&mut A> {
        match self {
            Slot::Bound(a) => Some(a),
            Slot::Unbound => None,
        }
    }
}

impl<A> From<Option<A>> for Slot<A> {
    fn from(actuator: Option<A>) -> Self {
        match actuator {
            Some(a) => Slot::Bound(a),
            None => Slot::Unbound,
        }
    }
}

impl<A: Actuator> Actuator for Slot<A> {
    #[inline]
    fn issue_relative_move(&mut self, steps: i32) {
        if let Slot::Bound(a) = self {
            a.issue_relative_move(steps);
        }
    }

    #[inline]
    fn is_in_motion(&self) -> bool {
        match self {
            Slot::Bound(a) => a.is_in_motion(),
            Slot::Unbound => false,
        }
    }
}
