use crate::graph::ir::{DepGraph, GraphNode, NodeId};
use crate::walk::Language;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Builds a DepGraph from per-file dependency sets with node and edge deduplication.
pub struct GraphBuilder {
    graph: DepGraph,
    node_map: HashMap<PathBuf, NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: DepGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Get or create a node for the given file.
    fn ensure_node(&mut self, path: &Path, language: Option<Language>) -> NodeId {
        if let Some(&idx) = self.node_map.get(path) {
            if self.graph[idx].language.is_none() {
                self.graph[idx].language = language;
            }
            return idx;
        }
        let idx = self.graph.add_node(GraphNode {
            path: path.to_path_buf(),
            language,
            analyzed: false,
        });
        self.node_map.insert(path.to_path_buf(), idx);
        idx
    }

    /// Record the direct dependencies of `source`. Only the first call per file takes effect.
    pub fn record(&mut self, source: &Path, language: Option<Language>, deps: &BTreeSet<PathBuf>) {
        let source_idx = self.ensure_node(source, language);
        if self.graph[source_idx].analyzed {
            tracing::debug!("{} already recorded", source.display());
            return;
        }
        self.graph[source_idx].analyzed = true;

        for dep in deps {
            let target_idx = self.ensure_node(dep, Language::from_path(dep));
            self.graph.update_edge(source_idx, target_idx, ());
        }
    }

    /// Whether `path` has been read and recorded.
    pub fn is_analyzed(&self, path: &Path) -> bool {
        self.node_map
            .get(path)
            .is_some_and(|&idx| self.graph[idx].analyzed)
    }

    /// Direct dependencies of `path`, sorted. Empty for unknown files.
    pub fn direct(&self, path: &Path) -> Vec<PathBuf> {
        let Some(&idx) = self.node_map.get(path) else {
            return vec![];
        };
        let mut deps: Vec<PathBuf> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].path.clone())
            .collect();
        deps.sort();
        deps.dedup();
        deps
    }

    pub fn graph(&self) -> &DepGraph {
        &self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
