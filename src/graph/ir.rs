use crate::walk::Language;
use petgraph::graph::DiGraph;
use serde::Serialize;
use std::path::PathBuf;

/// Unique identifier for a graph node
pub type NodeId = petgraph::graph::NodeIndex;

/// Direct file-to-file dependencies. Edges carry no data; multiplicity is collapsed.
pub type DepGraph = DiGraph<GraphNode, ()>;

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    /// Normalized absolute path
    pub path: PathBuf,
    /// Owning language; `None` for targets no frontend claims (e.g. `.css`, `.json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Whether this file was read and its imports recorded
    pub analyzed: bool,
}
