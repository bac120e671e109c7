//! Transition history tracking.
//!
//! Every transition an engine commits is recorded here in order, so callers
//! can inspect the path a machine took without wiring their own callbacks.
//!
//! A history may carry a retention limit. Once it is reached the oldest
//! record is dropped for every new one, so a long-running machine keeps a
//! bounded window of its most recent transitions.

use super::symbol::Symbol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use fsm_table::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     event: "Insert Coin".to_string(),
///     from: "Locked".to_string(),
///     to: "Unlocked".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_self_transition());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<E: Symbol, S: Symbol> {
    /// The event that was raised
    pub event: E,
    /// The state the machine was in
    pub from: S,
    /// The state the machine moved to
    pub to: S,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

impl<E: Symbol, S: Symbol> TransitionRecord<E, S> {
    /// True when the machine remained in the same state.
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of committed transitions.
///
/// `StateHistory::new()` keeps everything; [`StateHistory::with_limit`] keeps
/// at most `limit` records and evicts from the front.
///
/// # Example
///
/// ```rust
/// use fsm_table::core::{StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.push(TransitionRecord {
///     event: 1_u8,
///     from: 11_u8,
///     to: 22_u8,
///     timestamp: Utc::now(),
/// });
/// history.push(TransitionRecord {
///     event: 2_u8,
///     from: 22_u8,
///     to: 33_u8,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&11, &22, &33]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<E: Symbol, S: Symbol> {
    transitions: VecDeque<TransitionRecord<E, S>>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    evicted: u64,
}

impl<E: Symbol, S: Symbol> Default for StateHistory<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Symbol, S: Symbol> StateHistory<E, S> {
    /// Create a new empty history without a retention limit.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
            evicted: 0,
        }
    }

    /// Create a history that retains at most `limit` records.
    ///
    /// A limit of zero records nothing.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(64)),
            limit: Some(limit),
            evicted: 0,
        }
    }

    /// Retention limit, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Change the retention limit, evicting the oldest records if the
    /// history is already longer.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.evict();
    }

    /// Number of records dropped to honour the limit since creation or the
    /// last [`StateHistory::clear`].
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Append a transition, dropping the oldest one if the limit is reached.
    pub fn push(&mut self, record: TransitionRecord<E, S>) {
        self.transitions.push_back(record);
        self.evict();
    }

    /// Forget every record. The limit is kept.
    pub fn clear(&mut self) {
        self.transitions.clear();
        self.evicted = 0;
    }

    fn evict(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        while self.transitions.len() > limit {
            self.transitions.pop_front();
            self.evicted += 1;
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition, then the
    /// `to` state of each transition. Once records have been evicted the path
    /// starts mid-run rather than at the machine's initial state. Empty when
    /// nothing is retained.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for record in &self.transitions {
            path.push(&record.to);
        }
        path
    }

    /// Time between the oldest retained and the last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Retained transitions in commit order.
    pub fn transitions(&self) -> &VecDeque<TransitionRecord<E, S>> {
        &self.transitions
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&TransitionRecord<E, S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event: &str, from: &str, to: &str) -> TransitionRecord<String, String> {
        TransitionRecord {
            event: event.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<String, String> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn push_appends_in_order() {
        let mut history = StateHistory::new();
        history.push(record("coin", "Locked", "Unlocked"));
        history.push(record("push", "Unlocked", "Locked"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.transitions()[0].event, "coin");
        assert_eq!(history.last().map(|r| r.event.as_str()), Some("push"));
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.push(record("coin", "Locked", "Unlocked"));
        history.push(record("push", "Unlocked", "Locked"));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], "Locked");
        assert_eq!(path[1], "Unlocked");
        assert_eq!(path[2], "Locked");
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.push(record("coin", "Locked", "Unlocked"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.push(record("push", "Unlocked", "Locked"));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut history = StateHistory::new();
        history.push(record("coin", "Locked", "Unlocked"));

        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn self_transition_is_detected() {
        assert!(record("wait", "Idle", "Idle").is_self_transition());
        assert!(!record("go", "Idle", "Busy").is_self_transition());
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::new();
        history.push(record("coin", "Locked", "Unlocked"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<String, String> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.transitions(), deserialized.transitions());
        assert_eq!(deserialized.limit(), None);
    }

    #[test]
    fn limit_drops_oldest_records() {
        let mut history = StateHistory::with_limit(2);
        history.push(record("coin", "Locked", "Unlocked"));
        history.push(record("push", "Unlocked", "Locked"));
        history.push(record("coin", "Locked", "Unlocked"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.evicted(), 1);
        assert_eq!(history.transitions()[0].event, "push");
        // Path now starts at the oldest retained record.
        assert_eq!(history.get_path(), vec!["Unlocked", "Locked", "Unlocked"]);
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.push(record("coin", "Locked", "Unlocked"));

        assert!(history.is_empty());
        assert_eq!(history.evicted(), 1);
        assert!(history.get_path().is_empty());
    }

    #[test]
    fn lowering_limit_trims_immediately() {
        let mut history = StateHistory::new();
        for _ in 0..5 {
            history.push(record("tick", "A", "A"));
        }

        history.set_limit(Some(3));

        assert_eq!(history.len(), 3);
        assert_eq!(history.limit(), Some(3));
        assert_eq!(history.evicted(), 2);
    }

    #[test]
    fn clear_keeps_limit() {
        let mut history = StateHistory::with_limit(4);
        history.push(record("coin", "Locked", "Unlocked"));
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(4));
        history.push(record("push", "Unlocked", "Locked"));
        assert_eq!(history.get_path(), vec!["Unlocked", "Locked"]);
    }

    #[test]
    fn limit_survives_serialization() {
        let mut history = StateHistory::with_limit(1);
        history.push(record("coin", "Locked", "Unlocked"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<String, String> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.limit(), Some(1));
        assert_eq!(deserialized.len(), 1);
    }
}
