//! The workflow specification and the builder that declares it.

use crate::builder::error::DefinitionError;
use crate::builder::graph::{state_graph, StateGraph};
use crate::builder::scope::StateScope;
use crate::core::{
    ErrorHook, HookResult, Meta, State, TransitionHook, TransitionInfo, UnknownStateError,
};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// A complete workflow graph plus specification-wide hooks.
///
/// Built once by [`Specification::new`] and read-only afterwards. States
/// are kept in declaration order; a name index provides lookup.
///
/// # Example
///
/// ```rust
/// use flowspec::builder::{EventOptions, Specification};
///
/// struct Article;
///
/// let spec = Specification::<Article>::build(|wf| {
///     wf.state("new")
///         .event("approve", EventOptions::transitions_to("approved"))?;
///     wf.state("approved");
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(spec.initial_state().map(|s| s.name()), Some("new"));
/// assert_eq!(spec.state_names(), vec!["new", "approved"]);
/// ```
pub struct Specification<C> {
    id: Uuid,
    meta: Meta,
    states: Vec<State<C>>,
    index: HashMap<String, usize>,
    graph: StateGraph,
    initial: Option<String>,
    before_transition: Option<TransitionHook<C>>,
    after_transition: Option<TransitionHook<C>>,
    on_transition: Option<TransitionHook<C>>,
    on_error: Option<ErrorHook<C>>,
}

impl<C: 'static> Specification<C> {
    /// Evaluate `declare` against a fresh builder and return the finished
    /// specification.
    ///
    /// Any error returned by `declare` aborts construction.
    pub fn new<F>(meta: Meta, declare: F) -> Result<Self, DefinitionError>
    where
        F: FnOnce(&mut SpecificationBuilder<C>) -> Result<(), DefinitionError>,
    {
        let mut builder = SpecificationBuilder::new(meta);
        declare(&mut builder)?;
        Ok(builder.finish())
    }

    /// Same as [`Specification::new`] with empty metadata.
    pub fn build<F>(declare: F) -> Result<Self, DefinitionError>
    where
        F: FnOnce(&mut SpecificationBuilder<C>) -> Result<(), DefinitionError>,
    {
        Self::new(Meta::new(), declare)
    }
}

impl<C> Specification<C> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// States in declaration order.
    pub fn states(&self) -> &[State<C>] {
        &self.states
    }

    pub fn state(&self, name: &str) -> Option<&State<C>> {
        self.index.get(name).map(|&position| &self.states[position])
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The first state declared, if any.
    pub fn initial_state(&self) -> Option<&State<C>> {
        self.initial.as_deref().and_then(|name| self.state(name))
    }

    /// State names in declaration order.
    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.name()).collect()
    }

    /// The state graph, built once when the specification is finished.
    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// Position of `name` in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Compare two declared states by declaration order.
    pub fn compare_states(&self, a: &str, b: &str) -> Result<Ordering, UnknownStateError> {
        let unknown = |name: &str| UnknownStateError::UnknownState {
            name: name.to_string(),
        };
        let left = self.position(a).ok_or_else(|| unknown(a))?;
        let right = self.position(b).ok_or_else(|| unknown(b))?;
        Ok(left.cmp(&right))
    }

    pub fn before_transition(&self) -> Option<&TransitionHook<C>> {
        self.before_transition.as_ref()
    }

    pub fn after_transition(&self) -> Option<&TransitionHook<C>> {
        self.after_transition.as_ref()
    }

    pub fn on_transition(&self) -> Option<&TransitionHook<C>> {
        self.on_transition.as_ref()
    }

    pub fn on_error(&self) -> Option<&ErrorHook<C>> {
        self.on_error.as_ref()
    }
}

impl<C> fmt::Debug for Specification<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("id", &self.id)
            .field("meta", &self.meta)
            .field("initial", &self.initial)
            .field("states", &self.states)
            .finish_non_exhaustive()
    }
}

/// Receives declarations while a [`Specification`] is being built.
pub struct SpecificationBuilder<C> {
    id: Uuid,
    meta: Meta,
    states: Vec<State<C>>,
    initial: Option<String>,
    before_transition: Option<TransitionHook<C>>,
    after_transition: Option<TransitionHook<C>>,
    on_transition: Option<TransitionHook<C>>,
    on_error: Option<ErrorHook<C>>,
}

impl<C: 'static> SpecificationBuilder<C> {
    fn new(meta: Meta) -> Self {
        Self {
            id: Uuid::new_v4(),
            meta,
            states: Vec::new(),
            initial: None,
            before_transition: None,
            after_transition: None,
            on_transition: None,
            on_error: None,
        }
    }

    /// Declare a state and make it the current scope.
    ///
    /// The first state declared becomes the initial state. Declaring a name
    /// again replaces the earlier state, discarding its events, and moves it
    /// to the end of the declaration order.
    ///
    /// Every state declaration also replaces the specification metadata
    /// with the state's metadata (empty here).
    pub fn state(&mut self, name: impl Into<String>) -> StateScope<'_, C> {
        self.state_with_meta(name, Meta::new())
    }

    /// Declare a state with metadata, which also becomes the specification
    /// metadata. See [`SpecificationBuilder::state`].
    pub fn state_with_meta(&mut self, name: impl Into<String>, meta: Meta) -> StateScope<'_, C> {
        let name = name.into();

        if self.states.is_empty() {
            self.initial = Some(name.clone());
        }

        if let Some(previous) = self.states.iter().position(|s| s.name() == name) {
            warn!(
                state = %name,
                previous_position = previous,
                "state redeclared, replacing earlier definition"
            );
            self.states.remove(previous);
        }

        debug!(state = %name, position = self.states.len(), "declared state");
        self.meta = meta.clone();
        self.states.push(State::new(name, self.id, meta));

        let current = self.states.len() - 1;
        StateScope::new(&mut self.states[current])
    }

    /// Replace the specification metadata.
    pub fn meta(&mut self, meta: Meta) -> &mut Self {
        self.meta = meta;
        self
    }

    /// Hook run before the action of every transition. Last one wins.
    pub fn before_transition<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut C, &TransitionInfo<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.before_transition = Some(Arc::new(hook));
        self
    }

    /// Hook run after every completed transition. Last one wins.
    pub fn after_transition<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut C, &TransitionInfo<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.after_transition = Some(Arc::new(hook));
        self
    }

    /// Hook run on every transition, before the state changes. Last one wins.
    pub fn on_transition<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut C, &TransitionInfo<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.on_transition = Some(Arc::new(hook));
        self
    }

    /// Hook receiving failures of every other callable. Last one wins.
    pub fn on_error<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut C, &TransitionInfo<'_>, &(dyn Error + Send + Sync)) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    fn finish(self) -> Specification<C> {
        let index: HashMap<String, usize> = self
            .states
            .iter()
            .enumerate()
            .map(|(position, state)| (state.name().to_string(), position))
            .collect();
        let graph = state_graph(&self.states, &index);

        debug!(
            spec_id = %self.id,
            states = self.states.len(),
            edges = graph.edge_count(),
            initial = ?self.initial,
            "built workflow specification"
        );

        Specification {
            id: self.id,
            meta: self.meta,
            states: self.states,
            index,
            graph,
            initial: self.initial,
            before_transition: self.before_transition,
            after_transition: self.after_transition,
            on_transition: self.on_transition,
            on_error: self.on_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::EventOptions;
    use crate::core::{
        BoxError, EntryHandler, ExitHandler, GuardHandler, StateHandler, TransitionError,
    };
    use serde_json::json;

    #[derive(Default)]
    struct Order {
        paid: bool,
        log: Vec<String>,
    }

    #[test]
    fn first_declared_state_is_initial() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("cart");
            wf.state("checkout");
            wf.state("paid");
            Ok(())
        })
        .unwrap();

        assert_eq!(spec.initial_state().map(|s| s.name()), Some("cart"));
        assert_eq!(spec.state_names(), vec!["cart", "checkout", "paid"]);
    }

    #[test]
    fn empty_specification_has_no_initial_state() {
        let spec = Specification::<Order>::build(|_| Ok(())).unwrap();

        assert!(spec.initial_state().is_none());
        assert!(spec.state_names().is_empty());
    }

    #[test]
    fn redeclared_state_moves_to_new_position() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("a").event("go", EventOptions::transitions_to("b"))?;
            wf.state("b");
            wf.state("a");
            Ok(())
        })
        .unwrap();

        assert_eq!(spec.state_names(), vec!["b", "a"]);
        assert!(spec.state("a").unwrap().events().is_empty());
        assert_eq!(spec.compare_states("b", "a"), Ok(Ordering::Less));
    }

    #[test]
    fn missing_target_aborts_construction() {
        let result = Specification::<Order>::build(|wf| {
            wf.state("cart").event("checkout", EventOptions::new())?;
            wf.state("checkout");
            Ok(())
        });

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::MissingTarget {
                event: "checkout".to_string()
            }
        );
    }

    #[test]
    fn repeated_event_names_keep_declaration_order() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("pending")
                .event("finish", EventOptions::transitions_to("failed").when(|_| false))?
                .event("finish", EventOptions::transitions_to("done"))?;
            wf.state("done");
            wf.state("failed");
            Ok(())
        })
        .unwrap();

        let pending = spec.state("pending").unwrap();
        let targets: Vec<_> = pending
            .events()
            .get("finish")
            .iter()
            .map(|e| e.target())
            .collect();
        assert_eq!(targets, vec!["failed", "done"]);

        let picked = pending.resolve("finish", &Order::default()).unwrap();
        assert_eq!(picked.target(), "done");
    }

    #[test]
    fn approve_example_resolves() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("new")
                .event("approve", EventOptions::transitions_to("approved"))?;
            wf.state("approved");
            Ok(())
        })
        .unwrap();
        let order = Order::default();

        let new = spec.initial_state().unwrap();
        assert_eq!(new.resolve("approve", &order).unwrap().target(), "approved");

        let approved = spec.state("approved").unwrap();
        assert!(matches!(
            approved.resolve("approve", &order),
            Err(TransitionError::NotApplicable { .. })
        ));
    }

    #[test]
    fn compare_follows_declaration_order() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("draft");
            wf.state("review");
            wf.state("published");
            Ok(())
        })
        .unwrap();
        let review = spec.state("review").unwrap();

        assert_eq!(review.compare("draft", &spec), Ok(Ordering::Greater));
        assert_eq!(review.compare("review", &spec), Ok(Ordering::Equal));
        assert_eq!(review.compare("published", &spec), Ok(Ordering::Less));
        assert_eq!(
            review.compare("archived", &spec),
            Err(UnknownStateError::UnknownState {
                name: "archived".to_string()
            })
        );
    }

    #[test]
    fn compare_rejects_states_of_other_specifications() {
        let declare = |wf: &mut SpecificationBuilder<Order>| -> Result<(), DefinitionError> {
            wf.state("draft");
            wf.state("review");
            Ok(())
        };
        let first = Specification::build(declare).unwrap();
        let second = Specification::build(declare).unwrap();

        let draft = first.state("draft").unwrap();
        assert!(matches!(
            draft.compare("review", &second),
            Err(UnknownStateError::ForeignState { .. })
        ));
    }

    #[test]
    fn specification_hooks_last_declaration_wins() {
        let spec = Specification::<Order>::build(|wf| {
            wf.before_transition(|o, _| {
                o.log.push("first".to_string());
                Ok(())
            });
            wf.before_transition(|o, _| {
                o.log.push("second".to_string());
                Ok(())
            });
            wf.state("only");
            Ok(())
        })
        .unwrap();
        let mut order = Order::default();
        let info = TransitionInfo {
            from: "only",
            to: "only",
            event: "noop",
        };

        (spec.before_transition().unwrap())(&mut order, &info).unwrap();
        assert_eq!(order.log, vec!["second".to_string()]);
        assert!(spec.after_transition().is_none());
        assert!(spec.on_transition().is_none());
        assert!(spec.on_error().is_none());
    }

    #[test]
    fn state_declarations_replace_specification_meta() {
        let mut spec_meta = Meta::new();
        spec_meta.insert("title".to_string(), json!("orders"));
        let mut state_meta = Meta::new();
        state_meta.insert("shape".to_string(), json!("box"));

        let boxed = Specification::<Order>::new(spec_meta.clone(), |wf| {
            wf.state_with_meta("cart", state_meta.clone());
            Ok(())
        })
        .unwrap();

        assert_eq!(boxed.meta(), &state_meta);
        assert_eq!(
            boxed.state("cart").unwrap().meta().get("shape"),
            Some(&json!("box"))
        );

        let plain = Specification::<Order>::new(spec_meta.clone(), |wf| {
            wf.state_with_meta("cart", state_meta.clone());
            wf.state("paid");
            Ok(())
        })
        .unwrap();

        assert!(plain.meta().is_empty());
        assert_eq!(plain.state("cart").unwrap().meta(), &state_meta);
    }

    #[test]
    fn explicit_meta_after_states_wins() {
        let mut spec_meta = Meta::new();
        spec_meta.insert("title".to_string(), json!("orders"));

        let spec = Specification::<Order>::build(|wf| {
            wf.state("cart");
            wf.meta(spec_meta.clone());
            Ok(())
        })
        .unwrap();

        assert_eq!(spec.meta(), &spec_meta);
    }

    #[test]
    fn constructor_meta_survives_without_states() {
        let mut spec_meta = Meta::new();
        spec_meta.insert("title".to_string(), json!("orders"));

        let spec = Specification::<Order>::new(spec_meta.clone(), |_| Ok(())).unwrap();

        assert_eq!(spec.meta(), &spec_meta);
    }

    struct PaymentHandler;

    impl StateHandler<Order> for PaymentHandler {
        fn name(&self) -> &str {
            "PaymentHandler"
        }

        fn entry(&self) -> Option<&dyn EntryHandler<Order>> {
            Some(self)
        }

        fn guards(&self) -> Option<&dyn GuardHandler<Order>> {
            Some(self)
        }
    }

    impl EntryHandler<Order> for PaymentHandler {
        fn on_entry(&self, order: &mut Order) -> Result<(), BoxError> {
            order.log.push("handler entry".to_string());
            Ok(())
        }
    }

    impl GuardHandler<Order> for PaymentHandler {
        fn guards_target(&self, target: &str) -> bool {
            target == "paid"
        }

        fn can_transition_to(&self, order: &Order, _target: &str) -> bool {
            order.paid
        }
    }

    struct ExitOnly;

    impl StateHandler<Order> for ExitOnly {
        fn name(&self) -> &str {
            "ExitOnly"
        }

        fn exit(&self) -> Option<&dyn ExitHandler<Order>> {
            Some(self)
        }
    }

    impl ExitHandler<Order> for ExitOnly {
        fn on_exit(&self, order: &mut Order) -> Result<(), BoxError> {
            order.log.push("exit".to_string());
            Ok(())
        }
    }

    #[test]
    fn handler_derives_guard_for_guarded_target() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("awaiting_payment")
                .handler(PaymentHandler)
                .event("pay", EventOptions::transitions_to("paid"))?
                .event("cancel", EventOptions::transitions_to("cancelled"))?;
            wf.state("paid");
            wf.state("cancelled");
            Ok(())
        })
        .unwrap();
        let state = spec.state("awaiting_payment").unwrap();

        let pay = &state.events().get("pay")[0];
        assert!(pay.condition().is_some());
        assert!(!pay.is_eligible(&Order::default()));
        assert!(pay.is_eligible(&Order {
            paid: true,
            log: Vec::new()
        }));

        let cancel = &state.events().get("cancel")[0];
        assert!(cancel.condition().is_none());
    }

    #[test]
    fn explicit_guard_overrides_handler_guard() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("awaiting_payment")
                .handler(PaymentHandler)
                .event("pay", EventOptions::transitions_to("paid").when(|_| true))?;
            wf.state("paid");
            Ok(())
        })
        .unwrap();

        let pay = &spec.state("awaiting_payment").unwrap().events().get("pay")[0];
        assert!(pay.is_eligible(&Order::default()));
    }

    #[test]
    fn events_declared_before_handler_get_no_derived_guard() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("awaiting_payment")
                .event("pay", EventOptions::transitions_to("paid"))?
                .handler(PaymentHandler);
            wf.state("paid");
            Ok(())
        })
        .unwrap();

        let pay = &spec.state("awaiting_payment").unwrap().events().get("pay")[0];
        assert!(pay.condition().is_none());
    }

    #[test]
    fn handler_derives_only_capable_hooks() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("awaiting_payment").handler(PaymentHandler);
            wf.state("shipping").handler(ExitOnly);
            Ok(())
        })
        .unwrap();

        let awaiting = spec.state("awaiting_payment").unwrap();
        assert!(awaiting.on_entry().is_some());
        assert!(awaiting.on_exit().is_none());
        assert_eq!(awaiting.handler().map(|h| h.name()), Some("PaymentHandler"));

        let shipping = spec.state("shipping").unwrap();
        assert!(shipping.on_entry().is_none());
        assert!(shipping.on_exit().is_some());

        let mut order = Order::default();
        (awaiting.on_entry().unwrap())(&mut order).unwrap();
        (shipping.on_exit().unwrap())(&mut order).unwrap();
        assert_eq!(order.log, vec!["handler entry".to_string(), "exit".to_string()]);
    }

    #[test]
    fn explicit_hooks_override_handler_hooks() {
        let spec = Specification::<Order>::build(|wf| {
            wf.state("awaiting_payment")
                .handler(PaymentHandler)
                .on_entry(|o| {
                    o.log.push("explicit entry".to_string());
                    Ok(())
                });
            Ok(())
        })
        .unwrap();
        let mut order = Order::default();

        let state = spec.state("awaiting_payment").unwrap();
        (state.on_entry().unwrap())(&mut order).unwrap();
        assert_eq!(order.log, vec!["explicit entry".to_string()]);
    }
}
