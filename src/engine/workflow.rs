//! A reference execution engine driving one context through a specification.

use crate::builder::Specification;
use crate::core::{Event, HookResult, HookStage, State, TransitionError, TransitionInfo};
use crate::engine::history::{StateHistory, TransitionRecord};
use std::error::Error;
use std::fmt;
use tracing::{debug, info, warn};

/// Result of firing an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The workflow moved to a new state
    Transitioned { from: String, to: String },

    /// A callable failed and the error was handed to `on_error`
    Recovered {
        stage: HookStage,
        reason: String,
        current: String,
    },
}

/// One workflow instance: a current state plus its history.
///
/// A `Workflow` borrows its specification, so many instances can share one
/// specification. Each instance is driven by a single caller at a time.
pub struct Workflow<'s, C> {
    spec: &'s Specification<C>,
    current: &'s State<C>,
    history: StateHistory,
}

impl<'s, C> Workflow<'s, C> {
    /// Start in the specification's initial state.
    pub fn new(spec: &'s Specification<C>) -> Result<Self, TransitionError> {
        let current = spec
            .initial_state()
            .ok_or(TransitionError::EmptySpecification)?;
        Ok(Self::at(spec, current))
    }

    /// Start in a given declared state, e.g. one restored by the host.
    pub fn resume(spec: &'s Specification<C>, state: &str) -> Result<Self, TransitionError> {
        let current = spec
            .state(state)
            .ok_or_else(|| TransitionError::UnknownState {
                state: state.to_string(),
            })?;
        Ok(Self::at(spec, current))
    }

    fn at(spec: &'s Specification<C>, current: &'s State<C>) -> Self {
        Self {
            spec,
            current,
            history: StateHistory::new(),
        }
    }

    pub fn spec(&self) -> &'s Specification<C> {
        self.spec
    }

    pub fn current_state(&self) -> &'s State<C> {
        self.current
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Whether no events leave the current state.
    pub fn is_terminal(&self) -> bool {
        self.current.events().is_empty()
    }

    /// Whether `event` would resolve from the current state. Runs guards only.
    pub fn can_fire(&self, event: &str, context: &C) -> bool {
        self.current.resolve(event, context).is_ok()
    }

    /// Fire `event` against `context`.
    ///
    /// Runs, in order: `before_transition`, the event action,
    /// `on_transition`, the current state's exit hook, then commits the new
    /// state and runs its entry hook and `after_transition`. A failing
    /// callable stops the sequence; the error goes to `on_error` when one is
    /// declared and is returned otherwise.
    pub fn fire(&mut self, event: &str, context: &mut C) -> Result<StepResult, TransitionError> {
        let spec = self.spec;
        let from = self.current;
        let chosen = from.resolve(event, context)?;
        let to = spec
            .state(chosen.target())
            .ok_or_else(|| TransitionError::UnknownTarget {
                from: from.name().to_string(),
                event: event.to_string(),
                target: chosen.target().to_string(),
            })?;
        let info = TransitionInfo {
            from: from.name(),
            to: to.name(),
            event,
        };

        debug!(from = info.from, to = info.to, event = info.event, "firing event");

        let outcome = self.before_commit(from, chosen, &info, context).and_then(|()| {
            self.commit(to, &info);
            self.after_commit(to, &info, context)
        });

        match outcome {
            Ok(()) => Ok(StepResult::Transitioned {
                from: info.from.to_string(),
                to: info.to.to_string(),
            }),
            Err(error) => self.recover(error, &info, context),
        }
    }

    fn before_commit(
        &self,
        from: &State<C>,
        event: &Event<C>,
        info: &TransitionInfo<'_>,
        context: &mut C,
    ) -> Result<(), TransitionError> {
        if let Some(hook) = self.spec.before_transition() {
            at_stage(HookStage::BeforeTransition, info, hook(context, info))?;
        }
        if let Some(action) = event.action() {
            at_stage(HookStage::Action, info, action(context))?;
        }
        if let Some(hook) = self.spec.on_transition() {
            at_stage(HookStage::OnTransition, info, hook(context, info))?;
        }
        if let Some(hook) = from.on_exit() {
            at_stage(HookStage::OnExit, info, hook(context))?;
        }
        Ok(())
    }

    fn commit(&mut self, to: &'s State<C>, info: &TransitionInfo<'_>) {
        self.current = to;
        self.history = self.history.record(TransitionRecord::now(info));
        info!(from = info.from, to = info.to, event = info.event, "transitioned");
    }

    fn after_commit(
        &self,
        to: &State<C>,
        info: &TransitionInfo<'_>,
        context: &mut C,
    ) -> Result<(), TransitionError> {
        if let Some(hook) = to.on_entry() {
            at_stage(HookStage::OnEntry, info, hook(context))?;
        }
        if let Some(hook) = self.spec.after_transition() {
            at_stage(HookStage::AfterTransition, info, hook(context, info))?;
        }
        Ok(())
    }

    fn recover(
        &self,
        error: TransitionError,
        info: &TransitionInfo<'_>,
        context: &mut C,
    ) -> Result<StepResult, TransitionError> {
        let stage = match &error {
            TransitionError::HookFailed { stage, .. } => *stage,
            _ => return Err(error),
        };
        let Some(on_error) = self.spec.on_error() else {
            return Err(error);
        };

        warn!(
            stage = %stage,
            event = info.event,
            current = self.current.name(),
            error = %error,
            "transition callable failed, routing to on_error"
        );
        let failure: &(dyn Error + Send + Sync) = &error;
        on_error(context, info, failure);

        Ok(StepResult::Recovered {
            stage,
            reason: error.to_string(),
            current: self.current.name().to_string(),
        })
    }
}

fn at_stage(
    stage: HookStage,
    info: &TransitionInfo<'_>,
    result: HookResult,
) -> Result<(), TransitionError> {
    result.map_err(|source| TransitionError::HookFailed {
        stage,
        from: info.from.to_string(),
        to: info.to.to_string(),
        event: info.event.to_string(),
        source,
    })
}

impl<C> fmt::Debug for Workflow<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("spec_id", &self.spec.id())
            .field("current", &self.current.name())
            .field("history", &self.history)
            .finish()
    }
}
