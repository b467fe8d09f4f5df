//! Core workflow graph types.
//!
//! This module contains the data model built by [`crate::builder`]:
//! - [`State`] nodes owning an ordered [`EventCollection`]
//! - [`Event`] edges with optional [`Guard`] predicates
//! - Handler capability traits used to derive default hooks and guards
//! - First-match transition resolution via [`State::resolve`]

mod error;
mod event;
mod event_collection;
mod guard;
mod handler;
mod hooks;
mod state;

pub use error::{HookStage, TransitionError, UnknownStateError};
pub use event::Event;
pub use event_collection::EventCollection;
pub use guard::Guard;
pub use handler::{EntryHandler, ExitHandler, GuardHandler, StateHandler};
pub use hooks::{
    Action, BoxError, ErrorHook, Hook, HookResult, Meta, TransitionHook, TransitionInfo,
};
pub use state::{EventListing, State};
