//! Guard predicates for gating event transitions.
//!
//! A guard is evaluated against the execution context (the host object
//! attempting the transition). An event whose guard returns `false` is
//! skipped during resolution in favor of later alternatives under the same
//! event name.

use std::fmt;
use std::sync::Arc;

/// Shared predicate that decides whether an event is eligible for a context.
///
/// Guards are cheap to clone; clones share the same predicate.
///
/// # Example
///
/// ```rust
/// use flowspec::core::Guard;
///
/// struct Order {
///     total: u32,
/// }
///
/// let large = Guard::new(|order: &Order| order.total > 1_000);
///
/// assert!(large.check(&Order { total: 5_000 }));
/// assert!(!large.check(&Order { total: 10 }));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate over the context.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against a context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
