//! Reference execution engine for workflow specifications.
//!
//! The engine drives one context through a [`crate::builder::Specification`]:
//! it resolves events with first-match-wins, runs the declared hooks in a
//! fixed order, and records each committed transition.
//!
//! # Example
//!
//! ```rust
//! use flowspec::builder::{EventOptions, Specification};
//! use flowspec::engine::{StepResult, Workflow};
//!
//! #[derive(Default)]
//! struct Job {
//!     attempts: u32,
//! }
//!
//! let spec = Specification::<Job>::build(|wf| {
//!     wf.state("queued").event(
//!         "run",
//!         EventOptions::transitions_to("running").action(|job: &mut Job| {
//!             job.attempts += 1;
//!             Ok(())
//!         }),
//!     )?;
//!     wf.state("running");
//!     Ok(())
//! })
//! .unwrap();
//!
//! let mut job = Job::default();
//! let mut workflow = Workflow::new(&spec).unwrap();
//! let result = workflow.fire("run", &mut job).unwrap();
//!
//! assert!(matches!(result, StepResult::Transitioned { .. }));
//! assert_eq!(job.attempts, 1);
//! assert_eq!(workflow.current_state().name(), "running");
//! ```

mod history;
mod workflow;

pub use crate::core::{HookStage, TransitionError};
pub use history::{StateHistory, TransitionRecord};
pub use workflow::{StepResult, Workflow};
