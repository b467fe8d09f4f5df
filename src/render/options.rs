//! Diagram rendering configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Layout direction of the rendered graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left to right
    #[default]
    Landscape,
    /// Top to bottom
    Portrait,
}

impl Orientation {
    /// Graphviz `rankdir` value.
    pub fn rankdir(self) -> &'static str {
        match self {
            Self::Landscape => "LR",
            Self::Portrait => "TB",
        }
    }
}

/// Options for [`crate::render::to_dot`] and [`crate::render::write_dot`].
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use flowspec::render::{DiagramOptions, Orientation};
///
/// let json = r#"{ "name": "orders", "orientation": "portrait" }"#;
/// let options = DiagramOptions::from_json(json).unwrap();
///
/// assert_eq!(options.name, "orders");
/// assert_eq!(options.orientation, Orientation::Portrait);
/// assert_eq!(options.font, "Helvetica");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramOptions {
    /// Graph name and output file stem
    pub name: String,
    /// Directory the output file is written to
    pub path: PathBuf,
    pub orientation: Orientation,
    /// Graphviz `ratio` attribute
    pub ratio: String,
    /// Image format suggested for the `dot` command
    pub format: String,
    /// Font for nodes and edges
    pub font: String,
}

impl DiagramOptions {
    /// Defaults for a workflow called `workflow`: output named
    /// `<workflow>_workflow` with `/` replaced by `_`.
    pub fn for_workflow(workflow: &str) -> Self {
        Self {
            name: format!("{workflow}_workflow").replace('/', "_"),
            ..Self::default()
        }
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            name: "workflow".to_string(),
            path: PathBuf::from("."),
            orientation: Orientation::Landscape,
            ratio: "fill".to_string(),
            format: "png".to_string(),
            font: "Helvetica".to_string(),
        }
    }
}
