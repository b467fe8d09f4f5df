//! Diagram rendering for workflow specifications.
//!
//! Produces Graphviz DOT text from a finished specification. Node and edge
//! placement can be influenced through state and event metadata, e.g. a
//! higher `weight` on the typical path of the workflow.

mod dot;
pub mod error;
mod options;

pub use dot::{to_dot, write_dot};
pub use error::RenderError;
pub use options::{DiagramOptions, Orientation};
