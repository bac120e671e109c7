//! Core building blocks shared by the engine.
//!
//! This module contains the value-level pieces of a machine:
//! - Event and state values via the `Symbol` trait
//! - Validated vocabularies
//! - Handlers that choose a next state at runtime
//! - Transition history

mod handler;
mod history;
mod symbol;
mod vocabulary;

pub use handler::Handler;
pub use history::{StateHistory, TransitionRecord};
pub use symbol::Symbol;
pub use vocabulary::{ConfigError, SymbolKind, Vocabulary, VocabularyValidation};

pub(crate) use vocabulary::violations;
