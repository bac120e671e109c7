//! Transition table types.

use crate::core::{Handler, Symbol};

/// Key of the transition table: an event raised while in a source state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionKey<E: Symbol, S: Symbol> {
    pub event: E,
    pub state: S,
}

impl<E: Symbol, S: Symbol> TransitionKey<E, S> {
    pub fn new(event: E, state: S) -> Self {
        Self { event, state }
    }
}

/// Registered behavior for one transition key.
///
/// Registration rejects empty candidate lists, so entries built through
/// [`Fsm`](crate::Fsm) always have one. The first candidate is the default
/// next state used when there is no handler. An entry without candidates
/// has no default, and a handler on it may pick any state of the machine.
#[derive(Debug)]
pub struct TransitionEntry<S: Symbol> {
    handler: Option<Handler<S>>,
    candidates: Vec<S>,
}

impl<S: Symbol> TransitionEntry<S> {
    pub(crate) fn new(handler: Option<Handler<S>>, candidates: Vec<S>) -> Self {
        Self {
            handler,
            candidates,
        }
    }

    pub fn handler(&self) -> Option<&Handler<S>> {
        self.handler.as_ref()
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Allowed next states in registration order.
    pub fn candidates(&self) -> &[S] {
        &self.candidates
    }

    /// State taken when the transition has no handler.
    pub fn default_next(&self) -> Option<&S> {
        self.candidates.first()
    }

    /// Check whether a handler's result is one of the allowed next states.
    pub fn allows(&self, state: &S) -> bool {
        self.candidates.contains(state)
    }
}

/// A committed state change, as reported to callbacks and callers.
#[derive(Clone, Debug, PartialEq)]
pub struct StateChange<E: Symbol, S: Symbol> {
    pub event: E,
    pub from: S,
    pub to: S,
}

impl<E: Symbol, S: Symbol> StateChange<E, S> {
    /// True when the machine stayed where it was ("remaining in" rather
    /// than "moving to").
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

/// Outcome of a successfully raised event.
#[derive(Clone, Debug, PartialEq)]
pub enum RaiseOutcome<E: Symbol, S: Symbol> {
    /// A registered transition was taken.
    Transitioned(StateChange<E, S>),

    /// No transition is registered for the event in the current state;
    /// the event was accepted and the state is unchanged.
    Unhandled,
}

impl<E: Symbol, S: Symbol> RaiseOutcome<E, S> {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, RaiseOutcome::Transitioned(_))
    }

    pub fn change(&self) -> Option<&StateChange<E, S>> {
        match self {
            RaiseOutcome::Transitioned(change) => Some(change),
            RaiseOutcome::Unhandled => None,
        }
    }
}
