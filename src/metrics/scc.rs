use crate::graph::ir::DepGraph;
use petgraph::algo::tarjan_scc;
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::path::PathBuf;

/// Information about a strongly connected component.
#[derive(Debug, Clone, Serialize)]
pub struct SccInfo {
    pub id: usize,
    pub size: usize,
    pub members: Vec<PathBuf>,
}

/// Compute all non-trivial SCCs (size > 1 or self-loop) in the graph.
///
/// Members are sorted and components are ordered by their first member, so the
/// result is stable across runs.
pub fn find_non_trivial_sccs(graph: &DepGraph) -> Vec<SccInfo> {
    let mut cycles: Vec<Vec<PathBuf>> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| {
            scc.len() > 1
                || scc.first().is_some_and(|&node| {
                    graph
                        .edges_directed(node, petgraph::Direction::Outgoing)
                        .any(|e| e.target() == node)
                })
        })
        .map(|scc| {
            let mut members: Vec<PathBuf> =
                scc.iter().map(|&idx| graph[idx].path.clone()).collect();
            members.sort();
            members
        })
        .collect();
    cycles.sort();

    cycles
        .into_iter()
        .enumerate()
        .map(|(id, members)| SccInfo {
            id,
            size: members.len(),
            members,
        })
        .collect()
}

/// Member lists of every import cycle.
pub fn find_cycles(graph: &DepGraph) -> Vec<Vec<PathBuf>> {
    find_non_trivial_sccs(graph)
        .into_iter()
        .map(|scc| scc.members)
        .collect()
}
