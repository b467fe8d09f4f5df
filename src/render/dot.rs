//! Graphviz DOT output for workflow specifications.

use crate::builder::{Specification, StateGraph};
use crate::core::Meta;
use crate::render::error::RenderError;
use crate::render::options::DiagramOptions;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const DOT_CONFIG: &[Config] = &[
    Config::GraphContentOnly,
    Config::NodeNoLabel,
    Config::EdgeNoLabel,
];

/// Render `spec` as a DOT digraph.
///
/// Nodes are numbered in declaration order and default to `width=1`,
/// `height=1`, `shape=ellipse` and a label of the state name; state
/// metadata overrides these. Each event becomes an edge carrying its
/// metadata and a label of the event name. Undeclared targets still get a
/// node, so typos show up in the picture.
///
/// # Example
///
/// ```rust
/// use flowspec::builder::{EventOptions, Specification};
/// use flowspec::render::{to_dot, DiagramOptions};
///
/// let spec = Specification::<()>::build(|wf| {
///     wf.state("new")
///         .event("approve", EventOptions::transitions_to("approved").with_meta("weight", 8))?;
///     wf.state("approved");
///     Ok(())
/// })
/// .unwrap();
///
/// let dot = to_dot(&spec, &DiagramOptions::for_workflow("articles"));
/// assert!(dot.starts_with("digraph \"articles_workflow\" {"));
/// assert!(dot.contains("0 -> 1"));
/// assert!(dot.contains("label = \"approve\""));
/// ```
pub fn to_dot<C>(spec: &Specification<C>, options: &DiagramOptions) -> String {
    let graph = spec.graph();
    let edge_attributes = |graph: &StateGraph, edge: EdgeReference<'_, usize>| {
        event_attributes(spec, &graph[edge.source()], *edge.weight(), options)
    };
    let node_attributes = |_: &StateGraph, (_, name): (NodeIndex, &String)| {
        state_attributes(spec, name, options)
    };
    let dot = Dot::with_attr_getters(graph, DOT_CONFIG, &edge_attributes, &node_attributes);

    format!(
        "digraph {:?} {{\n    graph [ rankdir = {:?}, ratio = {:?} ]\n{dot}}}\n",
        options.name,
        options.orientation.rankdir(),
        options.ratio
    )
}

/// Write the DOT rendering to `<path>/<name>.dot` and return the file path.
///
/// Turning the file into an image is left to the Graphviz `dot` binary.
pub fn write_dot<C>(
    spec: &Specification<C>,
    options: &DiagramOptions,
) -> Result<PathBuf, RenderError> {
    let file = options.path.join(format!("{}.dot", options.name));
    fs::write(&file, to_dot(spec, options)).map_err(|source| RenderError::Write {
        path: file.clone(),
        source,
    })?;

    let image = options.path.join(format!("{}.{}", options.name, options.format));
    let command = format!(
        "dot -T{} -o '{}' '{}'",
        options.format,
        image.display(),
        file.display()
    );
    info!(file = %file.display(), command = %command, "wrote workflow diagram");
    Ok(file)
}

fn state_attributes<C>(spec: &Specification<C>, name: &str, options: &DiagramOptions) -> String {
    let mut attrs = vec![
        ("label".to_string(), name.to_string()),
        ("width".to_string(), "1".to_string()),
        ("height".to_string(), "1".to_string()),
        ("shape".to_string(), "ellipse".to_string()),
    ];
    if let Some(state) = spec.state(name) {
        merge_meta(&mut attrs, state.meta());
    }
    set(&mut attrs, "fontname", options.font.clone());
    attributes(&attrs)
}

fn event_attributes<C>(
    spec: &Specification<C>,
    source: &str,
    ordinal: usize,
    options: &DiagramOptions,
) -> String {
    let mut attrs = Vec::new();
    let event = spec
        .state(source)
        .and_then(|state| state.events().events().nth(ordinal));
    if let Some(event) = event {
        merge_meta(&mut attrs, event.meta());
        set(&mut attrs, "label", event.name().to_string());
    }
    set(&mut attrs, "fontname", options.font.clone());
    attributes(&attrs)
}

fn merge_meta(attrs: &mut Vec<(String, String)>, meta: &Meta) {
    for (key, value) in meta {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        set(attrs, key, value);
    }
}

fn set(attrs: &mut Vec<(String, String)>, key: &str, value: String) {
    match attrs.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => entry.1 = value,
        None => attrs.push((key.to_string(), value)),
    }
}

// Values are written as Rust string literals, which DOT reads as quoted IDs.
fn attributes(attrs: &[(String, String)]) -> String {
    let mut list = attrs
        .iter()
        .map(|(key, value)| format!("{key} = {value:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    list.push(' ');
    list
}
