//! Capability interfaces for state handlers.
//!
//! A handler is an external type associated with a state. It can supply a
//! default entry hook, a default exit hook, and default guards for events
//! leaving the state. Each capability is optional: a handler opts in by
//! returning `Some(self)` from the matching accessor.
//!
//! # Example
//!
//! ```rust
//! use flowspec::core::{BoxError, EntryHandler, GuardHandler, StateHandler};
//!
//! struct Invoice {
//!     paid: bool,
//!     reminders: u32,
//! }
//!
//! struct AwaitingPayment;
//!
//! impl StateHandler<Invoice> for AwaitingPayment {
//!     fn name(&self) -> &str {
//!         "AwaitingPayment"
//!     }
//!
//!     fn entry(&self) -> Option<&dyn EntryHandler<Invoice>> {
//!         Some(self)
//!     }
//!
//!     fn guards(&self) -> Option<&dyn GuardHandler<Invoice>> {
//!         Some(self)
//!     }
//! }
//!
//! impl EntryHandler<Invoice> for AwaitingPayment {
//!     fn on_entry(&self, invoice: &mut Invoice) -> Result<(), BoxError> {
//!         invoice.reminders += 1;
//!         Ok(())
//!     }
//! }
//!
//! impl GuardHandler<Invoice> for AwaitingPayment {
//!     fn guards_target(&self, target: &str) -> bool {
//!         target == "settled"
//!     }
//!
//!     fn can_transition_to(&self, invoice: &Invoice, _target: &str) -> bool {
//!         invoice.paid
//!     }
//! }
//! ```

use super::hooks::HookResult;

/// A handler attached to a state.
pub trait StateHandler<C>: Send + Sync {
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Entry capability. `None` leaves the state's entry hook untouched.
    fn entry(&self) -> Option<&dyn EntryHandler<C>> {
        None
    }

    /// Exit capability. `None` leaves the state's exit hook untouched.
    fn exit(&self) -> Option<&dyn ExitHandler<C>> {
        None
    }

    /// Guard capability used to derive default event guards.
    fn guards(&self) -> Option<&dyn GuardHandler<C>> {
        None
    }
}

/// Behavior run when the execution engine enters the handler's state.
pub trait EntryHandler<C>: Send + Sync {
    fn on_entry(&self, context: &mut C) -> HookResult;
}

/// Behavior run when the execution engine leaves the handler's state.
pub trait ExitHandler<C>: Send + Sync {
    fn on_exit(&self, context: &mut C) -> HookResult;
}

/// Default guards for events leaving the handler's state.
pub trait GuardHandler<C>: Send + Sync {
    /// Whether this handler defines a predicate for transitions to `target`.
    ///
    /// Targets without a predicate get no derived guard at all.
    fn guards_target(&self, target: &str) -> bool;

    /// Evaluate the predicate for `target`. `false` fails the guard.
    fn can_transition_to(&self, context: &C, target: &str) -> bool;
}
