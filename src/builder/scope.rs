//! Declarations scoped to a single state.

use crate::builder::error::DefinitionError;
use crate::builder::transition::EventOptions;
use crate::core::{Event, Guard, HookResult, Meta, State, StateHandler};
use std::sync::Arc;
use tracing::debug;

/// The state currently being declared.
///
/// Returned by [`crate::builder::SpecificationBuilder::state`]; events,
/// hooks and the handler declared through it attach to that state only.
pub struct StateScope<'a, C> {
    state: &'a mut State<C>,
}

impl<'a, C: 'static> StateScope<'a, C> {
    pub(crate) fn new(state: &'a mut State<C>) -> Self {
        Self { state }
    }

    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// Replace the metadata of this state.
    pub fn meta(&mut self, meta: Meta) -> &mut Self {
        self.state.meta = meta;
        self
    }

    /// Attach a handler to this state.
    ///
    /// When the handler exposes an entry or exit capability, the matching
    /// hook is derived from it; hooks for absent capabilities are left as
    /// they were. Events declared after this call may derive their guards
    /// from the handler.
    pub fn handler<H>(&mut self, handler: H) -> &mut Self
    where
        H: StateHandler<C> + 'static,
    {
        let handler: Arc<dyn StateHandler<C>> = Arc::new(handler);

        if handler.entry().is_some() {
            let entry = Arc::clone(&handler);
            self.state.on_entry = Some(Arc::new(move |context: &mut C| {
                entry.entry().map_or(Ok(()), |h| h.on_entry(context))
            }));
        }

        if handler.exit().is_some() {
            let exit = Arc::clone(&handler);
            self.state.on_exit = Some(Arc::new(move |context: &mut C| {
                exit.exit().map_or(Ok(()), |h| h.on_exit(context))
            }));
        }

        debug!(
            state = %self.state.name,
            handler = handler.name(),
            entry = handler.entry().is_some(),
            exit = handler.exit().is_some(),
            "attached state handler"
        );

        self.state.handler = Some(handler);
        self
    }

    /// Declare an event leaving this state.
    ///
    /// Repeating a name appends another alternative. Without an explicit
    /// guard, a guard is derived from the state's handler if it guards the
    /// target.
    pub fn event(
        &mut self,
        name: impl Into<String>,
        options: EventOptions<C>,
    ) -> Result<&mut Self, DefinitionError> {
        let name = name.into();
        let Some(target) = options.target else {
            return Err(DefinitionError::MissingTarget { event: name });
        };

        let condition = match options.condition {
            Some(explicit) => Some(explicit),
            None => self.derived_guard(&target),
        };

        debug!(
            state = %self.state.name,
            event = %name,
            target = %target,
            guarded = condition.is_some(),
            "declared event"
        );

        self.state.events.push(Event::new(
            name,
            target,
            condition,
            options.meta,
            options.action,
        ));
        Ok(self)
    }

    /// Set the entry hook, replacing any handler-derived one.
    pub fn on_entry<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut C) -> HookResult + Send + Sync + 'static,
    {
        self.state.on_entry = Some(Arc::new(hook));
        self
    }

    /// Set the exit hook, replacing any handler-derived one.
    pub fn on_exit<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut C) -> HookResult + Send + Sync + 'static,
    {
        self.state.on_exit = Some(Arc::new(hook));
        self
    }

    fn derived_guard(&self, target: &str) -> Option<Guard<C>> {
        let handler = self.state.handler.as_ref()?;
        if !handler.guards()?.guards_target(target) {
            return None;
        }

        let handler = Arc::clone(handler);
        let target = target.to_string();
        Some(Guard::new(move |context: &C| {
            handler
                .guards()
                .is_some_and(|g| g.can_transition_to(context, &target))
        }))
    }
}
