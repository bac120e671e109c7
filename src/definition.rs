//! Machine definitions loaded from configuration.
//!
//! Definitions use a JSON DSL:
//!
//! ```json
//! {
//!   "name": "turnstile",
//!   "events": ["Insert Coin", "Push Turnstile"],
//!   "states": ["Locked", "UNLOCKED"],
//!   "initial": "Locked",
//!   "transitions": [
//!     {"event": "Insert Coin", "from": "Locked", "to": "UNLOCKED"},
//!     {"event": "Push Turnstile", "from": "UNLOCKED", "to": ["Locked"]}
//!   ]
//! }
//! ```
//!
//! `to` is a single state or a list of candidate states. Handlers are code and
//! cannot be part of a definition; attach them after loading with
//! [`Fsm::register_handler`], which replaces the loaded entry for that key.
//!
//! An optional `"history_limit"` caps the loaded machine's history.
//!
//! Only this module requires event and state types to implement serde.

use crate::core::Symbol;
use crate::engine::{Fsm, FsmError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One or more candidate next states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NextStates<S: Symbol> {
    One(S),
    Many(Vec<S>),
}

impl<S: Symbol> NextStates<S> {
    pub fn into_vec(self) -> Vec<S> {
        match self {
            NextStates::One(state) => vec![state],
            NextStates::Many(states) => states,
        }
    }
}

/// A handler-less transition in a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionDefinition<E: Symbol, S: Symbol> {
    /// Event that triggers this transition.
    pub event: E,

    /// Source state.
    pub from: S,

    /// Candidate next states; the first one is taken.
    pub to: NextStates<S>,
}

/// Raw machine definition as stored in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de>, S: Deserialize<'de>"))]
pub struct FsmDefinition<E: Symbol, S: Symbol> {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Event vocabulary in declaration order.
    pub events: Vec<E>,

    /// State vocabulary in declaration order.
    pub states: Vec<S>,

    /// Initial state.
    pub initial: S,

    /// History retention limit; the engine default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,

    /// Transitions.
    #[serde(default)]
    pub transitions: Vec<TransitionDefinition<E, S>>,
}

impl<E, S> FsmDefinition<E, S>
where
    E: Symbol + DeserializeOwned,
    S: Symbol + DeserializeOwned,
{
    /// Parses a definition from JSON text.
    pub fn from_json(json: &str) -> Result<Self, FsmError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a definition from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, FsmError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl<E, S> FsmDefinition<E, S>
where
    E: Symbol + Serialize,
    S: Symbol + Serialize,
{
    /// Serializes the definition back to JSON.
    pub fn to_json(&self) -> Result<String, FsmError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<E: Symbol, S: Symbol> FsmDefinition<E, S> {
    /// Builds the machine and registers every transition.
    ///
    /// Fails with [`FsmError::Configuration`] on invalid vocabularies, or with
    /// the first rejected transition.
    pub fn into_fsm(self) -> Result<Fsm<E, S>, FsmError> {
        let mut fsm = match self.name {
            Some(name) => Fsm::named(name, self.events, self.states, self.initial),
            None => Fsm::new(self.events, self.states, self.initial),
        };

        if !fsm.is_valid() {
            return Err(FsmError::Configuration(fsm.config_errors().to_vec()));
        }

        if let Some(limit) = self.history_limit {
            fsm = fsm.with_history_limit(limit);
        }

        for transition in self.transitions {
            fsm.register_transition(
                transition.event,
                transition.from,
                None,
                transition.to.into_vec(),
            )?;
        }

        tracing::debug!(
            "Loaded machine '{}' with {} transition(s)",
            fsm.name().unwrap_or("<unnamed>"),
            fsm.transition_count()
        );

        Ok(fsm)
    }
}
