//! Table-driven state machine.

use crate::core::{
    violations, ConfigError, Handler, StateHistory, Symbol, SymbolKind, TransitionRecord,
    Vocabulary,
};
use crate::engine::dump;
use crate::engine::error::FsmError;
use crate::engine::transition::{RaiseOutcome, StateChange, TransitionEntry, TransitionKey};
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use stillwater::validation::Validation;

/// Number of transitions a machine keeps in its history unless told otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Finite state machine over a fixed vocabulary of events and states.
///
/// The machine is validated once at construction. An invalid machine is
/// permanently inert: every registration and every raised event fails with
/// [`FsmError::InvalidMachine`] and nothing is mutated.
///
/// Committed transitions are kept in a [`StateHistory`] capped at
/// [`DEFAULT_HISTORY_LIMIT`] records; see [`Fsm::with_history_limit`].
///
/// # Example
///
/// ```rust
/// use fsm_table::Fsm;
///
/// let mut fsm = Fsm::new(vec![1, 2, 3], vec![11, 22, 33], 11);
/// assert!(fsm.is_valid());
///
/// fsm.register_default(1, 11, 22).unwrap();
/// fsm.raise_event(&1).unwrap();
/// assert_eq!(fsm.current_state(), &22);
/// ```
pub struct Fsm<E: Symbol, S: Symbol> {
    name: Option<String>,
    events: Vocabulary<E>,
    states: Vocabulary<S>,
    current: S,
    transitions: HashMap<TransitionKey<E, S>, TransitionEntry<S>>,
    history: StateHistory<E, S>,
    config_errors: Vec<ConfigError>,
}

impl<E: Symbol, S: Symbol> Fsm<E, S> {
    /// Create a machine from its vocabularies and initial state.
    ///
    /// Never fails; check [`Fsm::is_valid`] or use
    /// [`FsmBuilder`](crate::builder::FsmBuilder) to get a `Result`.
    pub fn new<IE, IS>(events: IE, states: IS, initial: S) -> Self
    where
        IE: IntoIterator<Item = E>,
        IS: IntoIterator<Item = S>,
    {
        Self::build(None, events, states, initial)
    }

    /// Create a machine with a display name.
    pub fn named<IE, IS>(name: impl Into<String>, events: IE, states: IS, initial: S) -> Self
    where
        IE: IntoIterator<Item = E>,
        IS: IntoIterator<Item = S>,
    {
        Self::build(Some(name.into()), events, states, initial)
    }

    fn build<IE, IS>(name: Option<String>, events: IE, states: IS, initial: S) -> Self
    where
        IE: IntoIterator<Item = E>,
        IS: IntoIterator<Item = S>,
    {
        let events: Vec<E> = events.into_iter().collect();
        let states: Vec<S> = states.into_iter().collect();
        let initial_known = states.contains(&initial);

        let events = Vocabulary::validate(SymbolKind::Event, events);
        let states = Vocabulary::validate(SymbolKind::State, states);

        let mut fsm = Self {
            name,
            events: Vocabulary::empty(),
            states: Vocabulary::empty(),
            current: initial,
            transitions: HashMap::new(),
            history: StateHistory::with_limit(DEFAULT_HISTORY_LIMIT),
            config_errors: Vec::new(),
        };

        match (events, states) {
            (Validation::Success(events), Validation::Success(states)) if initial_known => {
                fsm.events = events;
                fsm.states = states;
            }
            (events, states) => {
                let mut errors = violations(events);
                errors.extend(violations(states));
                if !initial_known {
                    errors.push(ConfigError::UnknownInitialState {
                        label: fsm.current.label(),
                    });
                }
                tracing::warn!(
                    "Machine '{}' is invalid and will reject all operations: {} problem(s)",
                    fsm.display_name(),
                    errors.len()
                );
                fsm.config_errors = errors;
            }
        }

        fsm
    }

    /// Keep at most `limit` committed transitions, dropping the oldest.
    ///
    /// A limit of zero turns recording off.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history.set_limit(Some(limit));
        self
    }

    /// Keep every committed transition for the lifetime of the machine.
    pub fn with_unbounded_history(mut self) -> Self {
        self.history.set_limit(None);
        self
    }

    /// Whether construction succeeded. Fixed for the lifetime of the machine.
    pub fn is_valid(&self) -> bool {
        self.config_errors.is_empty()
    }

    /// Every problem found at construction; empty for a valid machine.
    pub fn config_errors(&self) -> &[ConfigError] {
        &self.config_errors
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Event vocabulary. Empty on an invalid machine.
    pub fn events(&self) -> &Vocabulary<E> {
        &self.events
    }

    /// State vocabulary. Empty on an invalid machine.
    pub fn states(&self) -> &Vocabulary<S> {
        &self.states
    }

    /// Current state.
    ///
    /// On an invalid machine this is the initial state given at construction
    /// and carries no guarantee of being meaningful.
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Most recent committed transitions, up to the history limit.
    pub fn history(&self) -> &StateHistory<E, S> {
        &self.history
    }

    /// Forget recorded transitions. The current state is not affected.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Look up the entry registered for `event` in `state`.
    pub fn transition(&self, event: &E, state: &S) -> Option<&TransitionEntry<S>> {
        self.transitions
            .get(&TransitionKey::new(event.clone(), state.clone()))
    }

    /// Number of registered transition keys.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Register the transition taken when `event` is raised in `from`.
    ///
    /// Checks, in order: the machine is valid, `candidates` is not empty,
    /// `event` and `from` are known, and every candidate is a known state.
    /// On any failure the table is left untouched. A later registration for
    /// the same `(event, from)` replaces this one.
    ///
    /// Without a handler the machine always moves to the first candidate.
    pub fn register_transition<I>(
        &mut self,
        event: E,
        from: S,
        handler: Option<Handler<S>>,
        candidates: I,
    ) -> Result<(), FsmError>
    where
        I: IntoIterator<Item = S>,
    {
        self.ensure_valid()?;

        let candidates: Vec<S> = candidates.into_iter().collect();
        if candidates.is_empty() {
            return Err(FsmError::EmptyCandidates {
                event: event.label(),
                state: from.label(),
            });
        }

        self.ensure_event(&event)?;
        self.ensure_state(&from)?;
        for candidate in &candidates {
            self.ensure_state(candidate)?;
        }

        tracing::debug!(
            "Machine '{}': on '{}' in '{}' -> {} candidate(s){}",
            self.display_name(),
            event.label(),
            from.label(),
            candidates.len(),
            if handler.is_some() { " with handler" } else { "" }
        );

        self.transitions.insert(
            TransitionKey::new(event, from),
            TransitionEntry::new(handler, candidates),
        );
        Ok(())
    }

    /// Register an unconditional transition from `from` to `to`.
    pub fn register_default(&mut self, event: E, from: S, to: S) -> Result<(), FsmError> {
        self.register_transition(event, from, None, [to])
    }

    /// Register a transition whose next state is chosen by `handler` among
    /// `candidates`.
    pub fn register_handler<F, I>(
        &mut self,
        event: E,
        from: S,
        handler: F,
        candidates: I,
    ) -> Result<(), FsmError>
    where
        F: Fn() -> S + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
    {
        self.register_transition(event, from, Some(Handler::new(handler)), candidates)
    }

    /// Raise an event against the current state.
    ///
    /// See [`Fsm::raise_event_with`].
    pub fn raise_event(&mut self, event: &E) -> Result<RaiseOutcome<E, S>, FsmError> {
        self.raise_event_with(event, |_, _, _| {})
    }

    /// Raise an event and get notified of the resulting state change.
    ///
    /// - No entry for `(event, current)`: the event is accepted and the state
    ///   is unchanged ([`RaiseOutcome::Unhandled`]).
    /// - Entry without handler: move to the entry's first candidate.
    /// - Entry with handler: run it; its result must be one of the entry's
    ///   candidates, otherwise [`FsmError::IllegalTransition`] is returned and
    ///   the state is unchanged.
    ///
    /// `on_state_changed(event, previous, next)` runs only after a transition
    /// has been committed, including self-transitions.
    pub fn raise_event_with<F>(
        &mut self,
        event: &E,
        on_state_changed: F,
    ) -> Result<RaiseOutcome<E, S>, FsmError>
    where
        F: FnOnce(&E, &S, &S),
    {
        self.ensure_valid()?;
        self.ensure_event(event)?;

        let next = {
            let Some(entry) = self.transition(event, &self.current) else {
                tracing::trace!(
                    "Machine '{}': no transition on '{}' in '{}'",
                    self.display_name(),
                    event.label(),
                    self.current.label()
                );
                return Ok(RaiseOutcome::Unhandled);
            };

            match entry.handler() {
                None => match entry.default_next() {
                    Some(default) => default.clone(),
                    None => return Ok(RaiseOutcome::Unhandled),
                },
                Some(handler) => {
                    let candidate = handler.next_state();
                    if !self.accepts(entry, &candidate) {
                        tracing::warn!(
                            "Machine '{}': handler on '{}' in '{}' returned '{}', not an allowed next state",
                            self.display_name(),
                            event.label(),
                            self.current.label(),
                            candidate.label()
                        );
                        return Err(FsmError::IllegalTransition {
                            event: event.label(),
                            from: self.current.label(),
                            to: candidate.label(),
                        });
                    }
                    candidate
                }
            }
        };

        let change = self.commit(event, next);
        on_state_changed(&change.event, &change.from, &change.to);
        Ok(RaiseOutcome::Transitioned(change))
    }

    /// Validate a handler result against the entry's candidates, or against
    /// the state vocabulary when the entry has none.
    fn accepts(&self, entry: &TransitionEntry<S>, candidate: &S) -> bool {
        if entry.candidates().is_empty() {
            self.states.contains(candidate)
        } else {
            entry.allows(candidate)
        }
    }

    fn commit(&mut self, event: &E, next: S) -> StateChange<E, S> {
        let previous = std::mem::replace(&mut self.current, next);

        tracing::debug!(
            "Machine '{}': '{}' moved '{}' -> '{}'",
            self.display_name(),
            event.label(),
            previous.label(),
            self.current.label()
        );

        self.history.push(TransitionRecord {
            event: event.clone(),
            from: previous.clone(),
            to: self.current.clone(),
            timestamp: Utc::now(),
        });

        StateChange {
            event: event.clone(),
            from: previous,
            to: self.current.clone(),
        }
    }

    /// Render a human-readable report of the machine.
    ///
    /// Symbols are printed with [`Symbol::label`].
    pub fn dump(&self) -> String {
        dump::render(self, &|e: &E| e.label(), &|s: &S| s.label())
    }

    /// Render the report with custom symbol formatters.
    pub fn dump_with<FE, FS>(&self, event_fmt: FE, state_fmt: FS) -> String
    where
        FE: Fn(&E) -> String,
        FS: Fn(&S) -> String,
    {
        dump::render(self, &event_fmt, &state_fmt)
    }

    /// Render the report with a custom event formatter; states use
    /// [`Symbol::label`].
    pub fn dump_events_with<FE>(&self, event_fmt: FE) -> String
    where
        FE: Fn(&E) -> String,
    {
        dump::render(self, &event_fmt, &|s: &S| s.label())
    }

    /// Render the report with a custom state formatter; events use
    /// [`Symbol::label`].
    pub fn dump_states_with<FS>(&self, state_fmt: FS) -> String
    where
        FS: Fn(&S) -> String,
    {
        dump::render(self, &|e: &E| e.label(), &state_fmt)
    }

    fn ensure_valid(&self) -> Result<(), FsmError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(FsmError::InvalidMachine)
        }
    }

    fn ensure_event(&self, event: &E) -> Result<(), FsmError> {
        if self.events.contains(event) {
            Ok(())
        } else {
            Err(FsmError::UnknownEvent {
                event: event.label(),
            })
        }
    }

    fn ensure_state(&self, state: &S) -> Result<(), FsmError> {
        if self.states.contains(state) {
            Ok(())
        } else {
            Err(FsmError::UnknownState {
                state: state.label(),
            })
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl<E: Symbol, S: Symbol> fmt::Display for Fsm<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

impl<E: Symbol, S: Symbol> fmt::Debug for Fsm<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("name", &self.name)
            .field("valid", &self.is_valid())
            .field("current", &self.current)
            .field("transitions", &self.transitions.len())
            .field("history", &self.history.len())
            .finish()
    }
}
