//! Graph checks over a finished specification.

use crate::builder::Specification;
use crate::validation::violations::GraphViolation;
use petgraph::graph::NodeIndex;
use petgraph::visit::Bfs;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Accumulated result of validating a specification.
pub type GraphValidation = Validation<(), NonEmptyVec<GraphViolation>>;

impl<C> Specification<C> {
    /// Check the graph, accumulating ALL violations.
    ///
    /// Construction never validates targets; call this to catch undeclared
    /// targets and unreachable states before handing the specification to
    /// an engine.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flowspec::builder::{EventOptions, Specification};
    ///
    /// let spec = Specification::<()>::build(|wf| {
    ///     wf.state("draft").event("submit", EventOptions::transitions_to("reveiw"))?;
    ///     wf.state("review");
    ///     Ok(())
    /// })
    /// .unwrap();
    ///
    /// assert!(spec.validate().is_failure());
    /// ```
    pub fn validate(&self) -> GraphValidation {
        let Some(initial) = self.initial_state() else {
            return Validation::fail(GraphViolation::NoStates);
        };

        let mut checks: Vec<GraphValidation> = Vec::new();

        for state in self.states() {
            for event in state.events().events() {
                let check = if self.contains_state(event.target()) {
                    Validation::success(())
                } else {
                    Validation::fail(GraphViolation::UnknownTarget {
                        state: state.name().to_string(),
                        event: event.name().to_string(),
                        target: event.target().to_string(),
                    })
                };
                checks.push(check);
            }
        }

        let reachable = self.reachable_from(initial.name());
        for state in self.states() {
            let check = if reachable.contains(state.name()) {
                Validation::success(())
            } else {
                Validation::fail(GraphViolation::Unreachable {
                    state: state.name().to_string(),
                })
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Names of declared states reachable from `start`, ignoring guards.
    pub fn reachable_from(&self, start: &str) -> HashSet<&str> {
        let mut seen = HashSet::new();
        let Some(position) = self.position(start) else {
            return seen;
        };

        let graph = self.graph();
        let mut bfs = Bfs::new(graph, NodeIndex::new(position));
        while let Some(node) = bfs.next(graph) {
            if let Some(state) = self.state(&graph[node]) {
                seen.insert(state.name());
            }
        }

        seen
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{EventOptions, Specification};
    use crate::validation::GraphViolation;
    use stillwater::validation::Validation;

    struct Loan;

    #[test]
    fn connected_graph_is_valid() {
        let spec = Specification::<Loan>::build(|wf| {
            wf.state("applied")
                .event("approve", EventOptions::transitions_to("approved"))?
                .event("reject", EventOptions::transitions_to("rejected"))?;
            wf.state("approved");
            wf.state("rejected");
            Ok(())
        })
        .unwrap();

        assert!(spec.validate().is_success());
    }

    #[test]
    fn empty_specification_reports_no_states() {
        let spec = Specification::<Loan>::build(|_| Ok(())).unwrap();

        match spec.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.iter().any(|e| *e == GraphViolation::NoStates));
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let spec = Specification::<Loan>::build(|wf| {
            wf.state("applied")
                .event("approve", EventOptions::transitions_to("aproved"))?
                .event("escalate", EventOptions::transitions_to("committee"))?;
            wf.state("approved");
            wf.state("archived");
            Ok(())
        })
        .unwrap();

        match spec.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 4);

                let unknown_targets = errors
                    .iter()
                    .filter(|e| matches!(e, GraphViolation::UnknownTarget { .. }))
                    .count();
                let unreachable = errors
                    .iter()
                    .filter(|e| matches!(e, GraphViolation::Unreachable { .. }))
                    .count();

                assert_eq!(unknown_targets, 2);
                assert_eq!(unreachable, 2);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn reachability_ignores_guards() {
        let spec = Specification::<Loan>::build(|wf| {
            wf.state("applied")
                .event("approve", EventOptions::transitions_to("approved").when(|_| false))?;
            wf.state("approved")
                .event("disburse", EventOptions::transitions_to("disbursed"))?;
            wf.state("disbursed");
            wf.state("orphan");
            Ok(())
        })
        .unwrap();

        let reachable = spec.reachable_from("applied");
        assert!(reachable.contains("approved"));
        assert!(reachable.contains("disbursed"));
        assert!(!reachable.contains("orphan"));
        assert!(spec.reachable_from("missing").is_empty());
    }

    #[test]
    fn reachability_skips_undeclared_targets_and_handles_cycles() {
        let spec = Specification::<Loan>::build(|wf| {
            wf.state("applied")
                .event("review", EventOptions::transitions_to("reviewing"))?
                .event("lose", EventOptions::transitions_to("limbo"))?;
            wf.state("reviewing")
                .event("reopen", EventOptions::transitions_to("applied"))?;
            Ok(())
        })
        .unwrap();

        let reachable = spec.reachable_from("reviewing");

        assert_eq!(reachable.len(), 2);
        assert!(reachable.contains("applied"));
        assert!(!reachable.contains("limbo"));
    }
}
