//! Flowspec: declarative specifications for finite-state workflows
//!
//! A workflow is declared as a graph of named states connected by named,
//! guarded events. Several events may share a name on one state; the first
//! one (in declaration order) whose guard passes wins. The finished
//! [`Specification`] is read-only and can be shared by any number of
//! workflow instances.
//!
//! # Core Concepts
//!
//! - **Specification**: the declared graph plus workflow-wide hooks
//! - **State**: a node owning its ordered outgoing events
//! - **Event**: a named edge to a target state, optionally guarded
//! - **Handler**: an optional per-state type supplying default hooks and guards
//!
//! # Example
//!
//! ```rust
//! use flowspec::builder::{EventOptions, Specification};
//! use flowspec::engine::Workflow;
//!
//! #[derive(Default)]
//! struct Task {
//!     failed: bool,
//! }
//!
//! let spec = Specification::<Task>::build(|wf| {
//!     wf.state("pending")
//!         .event("finish", EventOptions::transitions_to("failed").when(|t: &Task| t.failed))?
//!         .event("finish", EventOptions::transitions_to("done"))?;
//!     wf.state("done");
//!     wf.state("failed");
//!     Ok(())
//! })
//! .unwrap();
//!
//! let mut task = Task::default();
//! let mut workflow = Workflow::new(&spec).unwrap();
//! workflow.fire("finish", &mut task).unwrap();
//!
//! assert_eq!(workflow.current_state().name(), "done");
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod render;
pub mod validation;

// Re-export commonly used types
pub use crate::builder::{DefinitionError, EventOptions, Specification, SpecificationBuilder};
pub use crate::core::{Event, EventCollection, Guard, State, StateHandler, TransitionError};
pub use crate::engine::{StepResult, Workflow};
