//! Transition history of a running workflow.
//!
//! History is immutable: `record` returns a new history with the
//! transition appended.

use crate::core::TransitionInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single completed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being left
    pub from: String,
    /// The state being entered
    pub to: String,
    /// The event that fired
    pub event: String,
    /// When the new state was committed
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Record `info` as happening now.
    pub fn now(info: &TransitionInfo<'_>) -> Self {
        Self {
            from: info.from.to_string(),
            to: info.to.to_string(),
            event: info.event.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of transitions taken by one workflow instance.
///
/// # Example
///
/// ```rust
/// use flowspec::engine::{StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(TransitionRecord {
///     from: "draft".to_string(),
///     to: "review".to_string(),
///     event: "submit".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["draft", "review"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<TransitionRecord>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then each `to`.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
