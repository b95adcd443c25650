use crate::errors::Result;
use crate::graph::ir::DepGraph;
use crate::output::PathStyle;
use petgraph::visit::EdgeRef;
use std::io::Write;

/// Write the dependency graph in Graphviz DOT format.
///
/// Files that were never read (non-source targets) are drawn without fill.
pub fn write_dot<W: Write>(writer: &mut W, graph: &DepGraph, paths: &PathStyle) -> Result<()> {
    writeln!(writer, "digraph dependencies {{")?;
    writeln!(writer, "    rankdir=LR;")?;
    writeln!(
        writer,
        "    node [shape=box, style=filled, fillcolor=lightblue];"
    )?;
    writeln!(writer)?;

    let mut nodes: Vec<_> = graph.node_indices().collect();
    nodes.sort_by(|&a, &b| graph[a].path.cmp(&graph[b].path));
    for idx in nodes {
        let node = &graph[idx];
        let name = escape(&paths.render(&node.path));
        if node.analyzed {
            writeln!(writer, "    \"{name}\";")?;
        } else {
            writeln!(writer, "    \"{name}\" [style=dashed];")?;
        }
    }
    writeln!(writer)?;

    let mut edges: Vec<(String, String)> = graph
        .edge_references()
        .map(|e| {
            (
                escape(&paths.render(&graph[e.source()].path)),
                escape(&paths.render(&graph[e.target()].path)),
            )
        })
        .collect();
    edges.sort();
    for (source, target) in edges {
        writeln!(writer, "    \"{source}\" -> \"{target}\";")?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
