//! Diagram rendering errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when writing a diagram.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output file could not be written
    #[error("failed to write diagram to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
