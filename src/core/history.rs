//! State transition history tracking.
//!
//! The engine can keep an ordered log of every accepted transition. The log
//! is optional and may be bounded, in which case the oldest records are
//! dropped first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Whether an accepted transition changed the state or cycled on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Left one state and entered another.
    Changed,
    /// Resolved back to the state the machine was already in.
    Cycled,
}

/// Record of a single accepted transition.
///
/// `event` is `None` when the transition came from a direct
/// [`set_state`](crate::machine::Fsm::set_state) call rather than a dispatch.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "idle",
///     to: "running",
///     event: Some("start"),
///     kind: TransitionKind::Changed,
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_cycle());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S, E> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that triggered the transition, if any
    pub event: Option<E>,
    pub kind: TransitionKind,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl<S, E> TransitionRecord<S, E> {
    pub fn is_cycle(&self) -> bool {
        self.kind == TransitionKind::Cycled
    }
}

/// Ordered history of accepted transitions.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{StateHistory, TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
///
/// history.record(TransitionRecord {
///     from: "idle",
///     to: "running",
///     event: Some("start"),
///     kind: TransitionKind::Changed,
///     timestamp: Utc::now(),
/// });
/// history.record(TransitionRecord {
///     from: "running",
///     to: "done",
///     event: Some("finish"),
///     kind: TransitionKind::Changed,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&"idle", &"running", &"done"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S, E> {
    records: VecDeque<TransitionRecord<S, E>>,
    #[serde(default)]
    limit: Option<usize>,
}

impl<S, E> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> StateHistory<S, E> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            limit: None,
        }
    }

    /// Create a history that keeps at most `limit` records.
    ///
    /// A limit of zero keeps nothing.
    ///
    /// ```rust
    /// use switchyard::core::{StateHistory, TransitionKind, TransitionRecord};
    /// use chrono::Utc;
    ///
    /// let mut history = StateHistory::bounded(1);
    /// for (from, to) in [(1, 2), (2, 3)] {
    ///     history.record(TransitionRecord {
    ///         from,
    ///         to,
    ///         event: None::<()>,
    ///         kind: TransitionKind::Changed,
    ///         timestamp: Utc::now(),
    ///     });
    /// }
    /// assert_eq!(history.len(), 1);
    /// assert_eq!(history.get_path(), vec![&2, &3]);
    /// ```
    pub fn bounded(limit: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(limit.min(64)),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a record, evicting the oldest one if the limit is reached.
    pub fn record(&mut self, record: TransitionRecord<S, E>) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.records.len() >= limit {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` state of the
    /// oldest retained record, then the `to` state of each record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Calculate total duration from first to last retained record.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.front(), self.records.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Iterate over retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord<S, E>> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<S, E>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
