//! Directed graph view of a specification.

use crate::core::State;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// States as nodes, events as edges.
///
/// Node `i` is the `i`-th declared state and carries its name. Targets that
/// were never declared get a node of their own after the declared states.
/// Edge weights are the position of the event within
/// [`crate::core::EventCollection::events`] of the source state.
pub type StateGraph = DiGraph<String, usize>;

pub(crate) fn state_graph<C>(states: &[State<C>], index: &HashMap<String, usize>) -> StateGraph {
    let mut graph = StateGraph::new();
    for state in states {
        graph.add_node(state.name().to_string());
    }

    let mut undeclared: HashMap<&str, NodeIndex> = HashMap::new();
    for (position, state) in states.iter().enumerate() {
        for (ordinal, event) in state.events().events().enumerate() {
            let target = match index.get(event.target()) {
                Some(&target) => NodeIndex::new(target),
                None => *undeclared
                    .entry(event.target())
                    .or_insert_with(|| graph.add_node(event.target().to_string())),
            };
            graph.add_edge(NodeIndex::new(position), target, ordinal);
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use crate::builder::{EventOptions, Specification};
    use petgraph::visit::EdgeRef;

    #[test]
    fn nodes_follow_declaration_order() {
        let spec = Specification::<()>::build(|wf| {
            wf.state("draft")
                .event("submit", EventOptions::transitions_to("review"))?
                .event("submit", EventOptions::transitions_to("rejected"))?;
            wf.state("review");
            wf.state("rejected");
            Ok(())
        })
        .unwrap();
        let graph = spec.graph();

        let names: Vec<_> = graph.node_weights().map(String::as_str).collect();
        assert_eq!(names, vec!["draft", "review", "rejected"]);

        let edges: Vec<_> = graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
            .collect();
        assert_eq!(edges, vec![(0, 1, 0), (0, 2, 1)]);
    }

    #[test]
    fn undeclared_targets_share_one_node() {
        let spec = Specification::<()>::build(|wf| {
            wf.state("a")
                .event("x", EventOptions::transitions_to("ghost"))?
                .event("y", EventOptions::transitions_to("ghost"))?;
            Ok(())
        })
        .unwrap();
        let graph = spec.graph();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph[petgraph::graph::NodeIndex::new(1)], "ghost");
    }
}
