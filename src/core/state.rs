//! Workflow states: graph nodes owning their outgoing events.

use super::error::{TransitionError, UnknownStateError};
use super::event::Event;
use super::event_collection::EventCollection;
use super::handler::StateHandler;
use super::hooks::{Hook, Meta};
use crate::builder::Specification;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A named node of a workflow graph.
///
/// States are created by [`crate::builder::SpecificationBuilder::state`] and
/// owned by exactly one [`Specification`]. A state remembers the id of its
/// owner, which is how [`State::compare`] refuses states of another
/// specification.
pub struct State<C> {
    pub(crate) name: String,
    pub(crate) spec_id: Uuid,
    pub(crate) meta: Meta,
    pub(crate) events: EventCollection<C>,
    pub(crate) on_entry: Option<Hook<C>>,
    pub(crate) on_exit: Option<Hook<C>>,
    pub(crate) handler: Option<Arc<dyn StateHandler<C>>>,
}

/// One presentation entry per distinct event name of a state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventListing<'a> {
    pub display_name: Cow<'a, str>,
    pub event: &'a str,
}

impl<C> State<C> {
    pub(crate) fn new(name: impl Into<String>, spec_id: Uuid, meta: Meta) -> Self {
        Self {
            name: name.into(),
            spec_id,
            meta,
            events: EventCollection::new(),
            on_entry: None,
            on_exit: None,
            handler: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn events(&self) -> &EventCollection<C> {
        &self.events
    }

    pub fn on_entry(&self) -> Option<&Hook<C>> {
        self.on_entry.as_ref()
    }

    pub fn on_exit(&self) -> Option<&Hook<C>> {
        self.on_exit.as_ref()
    }

    pub fn handler(&self) -> Option<&Arc<dyn StateHandler<C>>> {
        self.handler.as_ref()
    }

    /// Id of the owning specification.
    pub fn spec_id(&self) -> Uuid {
        self.spec_id
    }

    /// Compare this state with `other` by declaration order in `spec`.
    ///
    /// Earlier-declared states are `Less`. Fails if `spec` does not own this
    /// state or if either name is not declared.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flowspec::builder::{EventOptions, Specification};
    /// use std::cmp::Ordering;
    ///
    /// let spec = Specification::<()>::build(|wf| {
    ///     wf.state("draft").event("submit", EventOptions::transitions_to("review"))?;
    ///     wf.state("review");
    ///     Ok(())
    /// })
    /// .unwrap();
    ///
    /// let draft = spec.state("draft").unwrap();
    /// assert_eq!(draft.compare("review", &spec), Ok(Ordering::Less));
    /// assert!(draft.compare("published", &spec).is_err());
    /// ```
    pub fn compare(
        &self,
        other: &str,
        spec: &Specification<C>,
    ) -> Result<Ordering, UnknownStateError> {
        if self.spec_id != spec.id() {
            return Err(UnknownStateError::ForeignState {
                name: self.name.clone(),
            });
        }
        spec.compare_states(&self.name, other)
    }

    /// Resolve `event` against `context` using first-match-wins.
    ///
    /// Alternatives declared under the same name are tried in declaration
    /// order; the first whose guard is absent or passes is returned.
    pub fn resolve(&self, event: &str, context: &C) -> Result<&Event<C>, TransitionError> {
        if !self.events.contains(event) {
            return Err(TransitionError::NotApplicable {
                state: self.name.clone(),
                event: event.to_string(),
            });
        }

        self.events
            .first_eligible(event, context)
            .ok_or_else(|| TransitionError::GuardedOut {
                state: self.name.clone(),
                event: event.to_string(),
            })
    }

    /// Presentation listing of the events leaving this state.
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn events_list(&self) -> impl Iterator<Item = EventListing<'_>> + Clone + '_ {
        self.events.iter().filter_map(|(name, events)| {
            events.first().map(|first| EventListing {
                display_name: first.display_name(),
                event: name,
            })
        })
    }
}

impl<C> fmt::Display for State<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<C> fmt::Debug for State<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("meta", &self.meta)
            .field("events", &self.events)
            .field("on_entry", &self.on_entry.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("handler", &self.handler.as_ref().map(|h| h.name().to_string()))
            .finish()
    }
}
