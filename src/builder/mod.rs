//! Declaration API for building workflow specifications.
//!
//! A specification is declared by a closure that receives a
//! [`SpecificationBuilder`]. Each call to [`SpecificationBuilder::state`]
//! returns a [`StateScope`], the explicit "current state" that events,
//! hooks and handlers attach to.
//!
//! # Example
//!
//! ```rust
//! use flowspec::builder::{EventOptions, Specification};
//!
//! struct Ticket {
//!     assignee: Option<String>,
//! }
//!
//! let spec = Specification::<Ticket>::build(|wf| {
//!     wf.state("open")
//!         .event(
//!             "start",
//!             EventOptions::transitions_to("in_progress").when(|t: &Ticket| t.assignee.is_some()),
//!         )?
//!         .event("close", EventOptions::transitions_to("closed"))?;
//!     wf.state("in_progress")
//!         .event("finish", EventOptions::transitions_to("closed"))?;
//!     wf.state("closed");
//!     Ok(())
//! })
//! .unwrap();
//!
//! let open = spec.state("open").unwrap();
//! let ticket = Ticket { assignee: None };
//! assert_eq!(open.resolve("close", &ticket).unwrap().target(), "closed");
//! assert!(open.resolve("start", &ticket).is_err());
//! ```

pub mod error;
pub mod graph;
pub mod scope;
pub mod specification;
pub mod transition;

pub use error::DefinitionError;
pub use graph::StateGraph;
pub use scope::StateScope;
pub use specification::{Specification, SpecificationBuilder};
pub use transition::EventOptions;
