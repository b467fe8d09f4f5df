//! Errors raised when relating states of a specification.

use thiserror::Error;

/// Errors from comparing or looking up states by name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnknownStateError {
    #[error("state '{name}' does not exist")]
    UnknownState { name: String },

    #[error("state '{name}' belongs to a different specification")]
    ForeignState { name: String },
}

/// Stage of a transition at which a user callable failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    BeforeTransition,
    Action,
    OnTransition,
    OnExit,
    OnEntry,
    AfterTransition,
}

impl HookStage {
    /// Whether the current state has already changed when this stage runs.
    pub fn is_after_commit(self) -> bool {
        matches!(self, Self::OnEntry | Self::AfterTransition)
    }
}

impl std::fmt::Display for HookStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::BeforeTransition => "before_transition",
            Self::Action => "action",
            Self::OnTransition => "on_transition",
            Self::OnExit => "on_exit",
            Self::OnEntry => "on_entry",
            Self::AfterTransition => "after_transition",
        };
        f.write_str(label)
    }
}

/// Errors from resolving and executing transitions.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("event '{event}' is not applicable in state '{state}'")]
    NotApplicable { state: String, event: String },

    #[error("every guard blocked event '{event}' in state '{state}'")]
    GuardedOut { state: String, event: String },

    #[error("specification declares no states")]
    EmptySpecification,

    #[error("state '{state}' is not declared in the specification")]
    UnknownState { state: String },

    #[error("event '{event}' from '{from}' targets undeclared state '{target}'")]
    UnknownTarget {
        from: String,
        event: String,
        target: String,
    },

    #[error("{stage} failed during '{event}' from '{from}' to '{to}': {source}")]
    HookFailed {
        stage: HookStage,
        from: String,
        to: String,
        event: String,
        #[source]
        source: super::hooks::BoxError,
    },
}
