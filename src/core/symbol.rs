//! Core Symbol trait for event and state values.
//!
//! Events and states are opaque identifiers drawn from a fixed vocabulary.
//! The engine only needs to compare, hash, clone and print them.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for values usable as events or states.
///
/// # Required Traits
///
/// - `Clone`: symbols are copied into the transition table and history
/// - `Eq` + `Hash`: membership and table lookup are by exact equality
/// - `Debug`: symbols must be debuggable for diagnostics
/// - `Send` + `Sync`: machines can move across threads
///
/// Serialization is not required. Loading a machine from a
/// [`FsmDefinition`](crate::definition::FsmDefinition) or serializing a
/// [`StateHistory`](crate::core::StateHistory) additionally needs serde.
///
/// # Example
///
/// ```rust
/// use fsm_table::core::Symbol;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl Symbol for Door {
///     fn label(&self) -> String {
///         match self {
///             Self::Open => "Open".to_string(),
///             Self::Closed => "Closed".to_string(),
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.label(), "Open");
/// assert!(!Door::Closed.is_blank());
/// ```
pub trait Symbol: Clone + Eq + Hash + Debug + Send + Sync {
    /// Best-effort text projection used by dumps and error messages.
    ///
    /// Default implementation uses the `Debug` representation.
    fn label(&self) -> String {
        format!("{:?}", self)
    }

    /// Check if this value is blank and therefore not allowed in a vocabulary.
    ///
    /// Only textual symbols can be blank. Default implementation returns `false`.
    fn is_blank(&self) -> bool {
        false
    }
}

/// Characters treated as blank in textual symbols.
fn is_blank_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{0b}' | '\u{0c}' | '\0')
}

impl Symbol for String {
    fn label(&self) -> String {
        self.clone()
    }

    fn is_blank(&self) -> bool {
        self.chars().all(is_blank_char)
    }
}

impl Symbol for &'static str {
    fn label(&self) -> String {
        (*self).to_string()
    }

    fn is_blank(&self) -> bool {
        self.chars().all(is_blank_char)
    }
}

impl Symbol for char {
    fn label(&self) -> String {
        self.to_string()
    }

    fn is_blank(&self) -> bool {
        is_blank_char(*self)
    }
}

impl Symbol for bool {
    fn label(&self) -> String {
        self.to_string()
    }
}

macro_rules! integer_symbol {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Symbol for $ty {
                fn label(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_symbol!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
