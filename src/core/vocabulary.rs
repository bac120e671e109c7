//! Validated vocabularies of events and states.
//!
//! A vocabulary is the fixed, ordered set of values an engine accepts for one
//! symbol kind. Validation accumulates every violated rule instead of stopping
//! at the first one, so a malformed configuration is reported in a single pass.

use super::symbol::Symbol;
use std::collections::HashSet;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Which vocabulary a configuration problem belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Event,
    State,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Event => f.write_str("event"),
            SymbolKind::State => f.write_str("state"),
        }
    }
}

/// Problems found while validating a machine's vocabularies.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{kind} vocabulary is empty")]
    EmptyVocabulary { kind: SymbolKind },

    #[error("{kind} vocabulary has a blank value at position {index}")]
    BlankSymbol { kind: SymbolKind, index: usize },

    #[error("{kind} vocabulary declares '{label}' more than once")]
    DuplicateSymbol { kind: SymbolKind, label: String },

    #[error("initial state '{label}' is not in the state vocabulary")]
    UnknownInitialState { label: String },
}

/// Result of validating a vocabulary, carrying ALL violations on failure.
pub type VocabularyValidation<T> = Validation<Vocabulary<T>, NonEmptyVec<ConfigError>>;

/// Ordered, duplicate-free, non-empty set of symbols.
///
/// Order is the declaration order and is preserved for dumps.
///
/// # Example
///
/// ```rust
/// use fsm_table::core::{SymbolKind, Vocabulary};
///
/// let states = Vocabulary::validate(SymbolKind::State, vec![11, 22, 33]);
/// assert!(states.is_success());
///
/// let broken = Vocabulary::validate(SymbolKind::State, vec![11, 11]);
/// assert!(broken.is_failure());
/// ```
#[derive(Clone, Debug)]
pub struct Vocabulary<T: Symbol> {
    symbols: Vec<T>,
    members: HashSet<T>,
}

impl<T: Symbol> Vocabulary<T> {
    /// An empty vocabulary. Nothing is a member of it.
    pub fn empty() -> Self {
        Self {
            symbols: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Validate a declared list of symbols.
    ///
    /// Rules: the list is non-empty, contains no blank values and no
    /// duplicates. Every broken rule is reported.
    pub fn validate(kind: SymbolKind, symbols: Vec<T>) -> VocabularyValidation<T> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        if symbols.is_empty() {
            checks.push(Validation::fail(ConfigError::EmptyVocabulary { kind }));
        }

        for (index, symbol) in symbols.iter().enumerate() {
            if symbol.is_blank() {
                checks.push(Validation::fail(ConfigError::BlankSymbol { kind, index }));
            }
        }

        {
            let mut seen = HashSet::new();
            let mut reported = HashSet::new();
            for symbol in &symbols {
                if !seen.insert(symbol) && reported.insert(symbol) {
                    checks.push(Validation::fail(ConfigError::DuplicateSymbol {
                        kind,
                        label: symbol.label(),
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(move |_| {
            let members = symbols.iter().cloned().collect();
            Self { symbols, members }
        })
    }

    /// Check membership by exact equality.
    pub fn contains(&self, symbol: &T) -> bool {
        self.members.contains(symbol)
    }

    /// Symbols in declaration order.
    pub fn as_slice(&self) -> &[T] {
        &self.symbols
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<T: Symbol> Default for Vocabulary<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Flatten a validation outcome into its list of violations.
pub(crate) fn violations<T>(validation: Validation<T, NonEmptyVec<ConfigError>>) -> Vec<ConfigError> {
    match validation {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}
