//! Transition handlers that compute the next state at runtime.
//!
//! A handler is a zero-argument computation attached to a transition entry.
//! When the entry's event is raised in its source state, the handler decides
//! which of the registered candidate states the machine moves to.

use super::symbol::Symbol;
use std::fmt;

/// Computation that picks the next state for a transition.
///
/// Handlers may capture external context (counters, flags, shared data).
/// They must be thread-safe (Send + Sync) so an engine can be moved to
/// another thread or shared behind a lock.
///
/// # Example
///
/// ```rust
/// use fsm_table::core::Handler;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let paid = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&paid);
/// let handler = Handler::new(move || {
///     if flag.load(Ordering::SeqCst) {
///         "Unlocked".to_string()
///     } else {
///         "Locked".to_string()
///     }
/// });
///
/// assert_eq!(handler.next_state(), "Locked");
/// paid.store(true, Ordering::SeqCst);
/// assert_eq!(handler.next_state(), "Unlocked");
/// ```
pub struct Handler<S: Symbol> {
    compute: Box<dyn Fn() -> S + Send + Sync>,
}

impl<S: Symbol> Handler<S> {
    /// Create a handler from a closure.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        Handler {
            compute: Box::new(compute),
        }
    }

    /// Create a handler that always yields the same state.
    ///
    /// ```rust
    /// use fsm_table::core::Handler;
    ///
    /// let handler = Handler::constant(7_u32);
    /// assert_eq!(handler.next_state(), 7);
    /// ```
    pub fn constant(state: S) -> Self
    where
        S: 'static,
    {
        Self::new(move || state.clone())
    }

    /// Run the handler and return its candidate next state.
    ///
    /// The result is not validated here; the engine checks it against the
    /// transition's candidate list before committing.
    pub fn next_state(&self) -> S {
        (self.compute)()
    }
}

impl<S: Symbol> fmt::Debug for Handler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler {...}")
    }
}
