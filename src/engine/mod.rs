//! The state machine engine.
//!
//! # Key Concepts
//!
//! - **Transition table**: entries keyed by `(event, state)`, each holding an
//!   optional handler and a non-empty list of allowed next states
//! - **Raising events**: looks up the entry for the current state, validates the
//!   handler's choice and commits atomically
//! - **Dump**: a textual report of vocabularies, current state and table

mod dump;
mod error;
mod machine;
mod transition;

pub use error::FsmError;
pub use machine::{Fsm, DEFAULT_HISTORY_LIMIT};
pub use transition::{RaiseOutcome, StateChange, TransitionEntry, TransitionKey};
