use crate::analyzer::DependencyListing;
use crate::errors::Result;
use crate::graph::ir::DepGraph;
use crate::output::PathStyle;
use crate::walk::Language;
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub dependencies: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<Vec<Vec<String>>>,
}

impl AnalyzeOutput {
    pub fn new(listing: &DependencyListing, cycles: Option<&[Vec<PathBuf>]>, paths: &PathStyle) -> Self {
        let dependencies = listing
            .iter()
            .map(|(file, deps)| {
                (
                    paths.render(file),
                    deps.iter().map(|d| paths.render(d)).collect(),
                )
            })
            .collect();
        let cycles = cycles.map(|cycles| {
            cycles
                .iter()
                .map(|members| members.iter().map(|m| paths.render(m)).collect())
                .collect()
        });
        Self {
            dependencies,
            cycles,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GraphOutput {
    pub nodes: Vec<NodeOutput>,
    pub edges: Vec<EdgeOutput>,
}

#[derive(Debug, Serialize)]
pub struct NodeOutput {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    pub analyzed: bool,
}

#[derive(Debug, Serialize)]
pub struct EdgeOutput {
    pub from: String,
    pub to: String,
}

/// Write analyze output as JSON.
pub fn write_analyze_json<W: Write>(
    writer: &mut W,
    listing: &DependencyListing,
    cycles: Option<&[Vec<PathBuf>]>,
    paths: &PathStyle,
) -> Result<()> {
    let output = AnalyzeOutput::new(listing, cycles, paths);
    serde_json::to_writer_pretty(&mut *writer, &output)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the direct-dependency graph as JSON nodes and edges, sorted by path.
pub fn write_graph_json<W: Write>(writer: &mut W, graph: &DepGraph, paths: &PathStyle) -> Result<()> {
    let mut nodes: Vec<NodeOutput> = graph
        .node_weights()
        .map(|n| NodeOutput {
            path: paths.render(&n.path),
            language: n.language,
            analyzed: n.analyzed,
        })
        .collect();
    nodes.sort_by(|a, b| a.path.cmp(&b.path));

    let mut edges: Vec<EdgeOutput> = graph
        .edge_references()
        .map(|e| EdgeOutput {
            from: paths.render(&graph[e.source()].path),
            to: paths.render(&graph[e.target()].path),
        })
        .collect();
    edges.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.to.cmp(&b.to)));

    serde_json::to_writer_pretty(&mut *writer, &GraphOutput { nodes, edges })?;
    writeln!(writer)?;
    Ok(())
}
