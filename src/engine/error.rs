//! Engine error types.

use crate::core::ConfigError;
use thiserror::Error;

/// Errors returned by engine operations.
///
/// Every error is recoverable: a failed call leaves the machine exactly as it
/// was before the call.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("machine configuration is invalid; all operations are disabled")]
    InvalidMachine,

    #[error("invalid machine configuration: {}", join(.0))]
    Configuration(Vec<ConfigError>),

    #[error("unknown event '{event}'")]
    UnknownEvent { event: String },

    #[error("unknown state '{state}'")]
    UnknownState { state: String },

    #[error("transition on '{event}' from '{state}' declares no next states")]
    EmptyCandidates { event: String, state: String },

    #[error("illegal transition on '{event}' from '{from}' to '{to}'")]
    IllegalTransition {
        event: String,
        from: String,
        to: String,
    },

    #[error("invalid machine definition: {0}")]
    Definition(#[from] serde_json::Error),
}

impl FsmError {
    /// Returns whether this error is a permanent configuration failure
    /// rather than a rejected call against a healthy machine.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FsmError::InvalidMachine | FsmError::Configuration(_) | FsmError::Definition(_)
        )
    }
}

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
