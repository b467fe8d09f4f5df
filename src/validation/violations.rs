//! Structural problems found in a workflow graph.

use thiserror::Error;

/// A single problem reported by [`crate::builder::Specification::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphViolation {
    #[error("specification declares no states")]
    NoStates,

    #[error("event '{event}' in state '{state}' targets undeclared state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("state '{state}' is not reachable from the initial state")]
    Unreachable { state: String },
}
