//! fsm-table: a generic table-driven finite state machine engine
//!
//! A machine is declared over a closed vocabulary of events and states. Legal
//! moves are registered per `(event, state)` pair with a list of candidate
//! next states, optionally guarded by a handler that picks one of them at
//! runtime. Events are then raised one at a time.
//!
//! # Core Concepts
//!
//! - **Symbol**: events and states are plain values implementing `Symbol`
//! - **Vocabulary**: validated once at construction; a bad configuration makes
//!   the machine permanently inert instead of failing later
//! - **Transition table**: last registration for a key wins
//! - **Atomic raise**: a rejected handler result leaves the state untouched
//!
//! # Example
//!
//! ```rust
//! use fsm_table::{Fsm, RaiseOutcome};
//!
//! let mut fsm = Fsm::named(
//!     "turnstile",
//!     ["Insert Coin", "Push Turnstile"].map(String::from),
//!     ["Locked", "UNLOCKED"].map(String::from),
//!     "Locked".to_string(),
//! );
//!
//! fsm.register_default("Insert Coin".into(), "Locked".into(), "UNLOCKED".into())
//!     .unwrap();
//! fsm.register_default("Push Turnstile".into(), "UNLOCKED".into(), "Locked".into())
//!     .unwrap();
//!
//! fsm.raise_event_with(&"Insert Coin".to_string(), |event, from, to| {
//!     println!("{event}: {from} -> {to}");
//! })
//! .unwrap();
//! assert_eq!(fsm.current_state(), "UNLOCKED");
//!
//! fsm.raise_event(&"Push Turnstile".to_string()).unwrap();
//! let outcome = fsm.raise_event(&"Push Turnstile".to_string()).unwrap();
//! assert_eq!(outcome, RaiseOutcome::Unhandled);
//! assert_eq!(fsm.current_state(), "Locked");
//!
//! println!("{}", fsm.dump());
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, FsmBuilder};
pub use crate::core::{ConfigError, Handler, StateHistory, Symbol, TransitionRecord, Vocabulary};
pub use definition::FsmDefinition;
pub use engine::{
    Fsm, FsmError, RaiseOutcome, StateChange, TransitionEntry, DEFAULT_HISTORY_LIMIT,
};
