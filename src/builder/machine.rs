//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{Handler, Symbol};
use crate::engine::{Fsm, FsmError};

struct PendingTransition<E: Symbol, S: Symbol> {
    event: E,
    from: S,
    handler: Option<Handler<S>>,
    candidates: Vec<S>,
}

/// Builder for constructing machines with a fluent API.
///
/// Unlike [`Fsm::new`], which always returns a machine and marks it invalid
/// when the configuration is wrong, `build` fails fast with every problem.
///
/// # Example
///
/// ```rust
/// use fsm_table::builder::FsmBuilder;
///
/// let fsm = FsmBuilder::new()
///     .name("turnstile")
///     .events(["coin", "push"].map(String::from))
///     .states(["Locked", "Unlocked"].map(String::from))
///     .initial("Locked".to_string())
///     .transition("coin".into(), "Locked".into(), ["Unlocked".to_string()])
///     .transition("push".into(), "Unlocked".into(), ["Locked".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(fsm.transition_count(), 2);
/// ```
pub struct FsmBuilder<E: Symbol, S: Symbol> {
    name: Option<String>,
    events: Vec<E>,
    states: Vec<S>,
    initial: Option<S>,
    history_limit: Option<usize>,
    transitions: Vec<PendingTransition<E, S>>,
}

impl<E: Symbol, S: Symbol> FsmBuilder<E, S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            events: Vec::new(),
            states: Vec::new(),
            initial: None,
            history_limit: None,
            transitions: Vec::new(),
        }
    }

    /// Set the display name (optional).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add events to the vocabulary.
    pub fn events<I: IntoIterator<Item = E>>(mut self, events: I) -> Self {
        self.events.extend(events);
        self
    }

    /// Add states to the vocabulary.
    pub fn states<I: IntoIterator<Item = S>>(mut self, states: I) -> Self {
        self.states.extend(states);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Cap the machine's history at `limit` records (optional).
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Add a transition without handler; the first candidate is taken.
    pub fn transition<I>(mut self, event: E, from: S, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.transitions.push(PendingTransition {
            event,
            from,
            handler: None,
            candidates: candidates.into_iter().collect(),
        });
        self
    }

    /// Add a transition whose next state is chosen by `handler`.
    pub fn guarded<F, I>(mut self, event: E, from: S, handler: F, candidates: I) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
    {
        self.transitions.push(PendingTransition {
            event,
            from,
            handler: Some(Handler::new(handler)),
            candidates: candidates.into_iter().collect(),
        });
        self
    }

    /// Build the machine.
    ///
    /// Returns an error if the initial state is missing, the vocabularies are
    /// invalid, or any transition is rejected.
    pub fn build(self) -> Result<Fsm<E, S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut fsm = match self.name {
            Some(name) => Fsm::named(name, self.events, self.states, initial),
            None => Fsm::new(self.events, self.states, initial),
        };

        if !fsm.is_valid() {
            return Err(FsmError::Configuration(fsm.config_errors().to_vec()).into());
        }

        if let Some(limit) = self.history_limit {
            fsm = fsm.with_history_limit(limit);
        }

        for pending in self.transitions {
            fsm.register_transition(
                pending.event,
                pending.from,
                pending.handler,
                pending.candidates,
            )?;
        }

        Ok(fsm)
    }
}

impl<E: Symbol, S: Symbol> Default for FsmBuilder<E, S> {
    fn default() -> Self {
        Self::new()
    }
}
