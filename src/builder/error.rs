//! Definition errors raised while declaring a specification.

use thiserror::Error;

/// Errors that abort construction of a specification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("missing 'transitions_to' in workflow event definition for '{event}'")]
    MissingTarget { event: String },
}
