//! Options for declaring an event.

use crate::core::{Action, Guard, HookResult, Meta};
use serde_json::Value;
use std::sync::Arc;

/// Fluent options for [`crate::builder::StateScope::event`].
///
/// The target is required; declaring an event without one fails with
/// [`crate::builder::DefinitionError::MissingTarget`].
///
/// # Example
///
/// ```rust
/// use flowspec::builder::EventOptions;
///
/// struct Review {
///     approvals: u32,
/// }
///
/// let options = EventOptions::<Review>::transitions_to("approved")
///     .when(|r| r.approvals >= 2)
///     .with_meta("weight", 8);
///
/// assert_eq!(options.target(), Some("approved"));
/// ```
pub struct EventOptions<C> {
    pub(crate) target: Option<String>,
    pub(crate) condition: Option<Guard<C>>,
    pub(crate) meta: Meta,
    pub(crate) action: Option<Action<C>>,
}

impl<C> EventOptions<C> {
    /// Options with nothing set. A target must still be supplied.
    pub fn new() -> Self {
        Self {
            target: None,
            condition: None,
            meta: Meta::new(),
            action: None,
        }
    }

    /// Options targeting `target`.
    pub fn transitions_to(target: impl Into<String>) -> Self {
        Self::new().to(target)
    }

    /// Alias of [`EventOptions::transitions_to`].
    pub fn transition_to(target: impl Into<String>) -> Self {
        Self::transitions_to(target)
    }

    /// Set the target state (required).
    pub fn to(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set an explicit guard. Overrides any handler-derived guard.
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.condition = Some(guard);
        self
    }

    /// Set an explicit guard using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Guard::new(predicate));
        self
    }

    /// Replace the event metadata.
    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Insert a single metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Set the action run when the event fires.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut C) -> HookResult + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

impl<C> Default for EventOptions<C> {
    fn default() -> Self {
        Self::new()
    }
}
