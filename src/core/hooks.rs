//! Callable types attached to states, events and specifications.
//!
//! The core stores these callables but never invokes them; they are run by
//! an execution engine such as [`crate::engine::Workflow`].

use std::error::Error;
use std::sync::Arc;

/// Error type returned by user callables.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Result type returned by user callables.
pub type HookResult = Result<(), BoxError>;

/// Opaque key/value metadata carried for renderers and engines.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Entry or exit hook for a single state.
pub type Hook<C> = Arc<dyn Fn(&mut C) -> HookResult + Send + Sync>;

/// Action run when an event fires.
pub type Action<C> = Arc<dyn Fn(&mut C) -> HookResult + Send + Sync>;

/// Specification-wide hook run around every transition.
pub type TransitionHook<C> =
    Arc<dyn Fn(&mut C, &TransitionInfo<'_>) -> HookResult + Send + Sync>;

/// Specification-wide error hook. Receives the failure of any other callable.
pub type ErrorHook<C> =
    Arc<dyn Fn(&mut C, &TransitionInfo<'_>, &(dyn Error + Send + Sync)) + Send + Sync>;

/// Describes the transition in progress when a specification-wide hook runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionInfo<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub event: &'a str,
}
