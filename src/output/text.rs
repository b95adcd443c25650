use crate::analyzer::DependencyListing;
use crate::errors::Result;
use crate::graph::ir::DepGraph;
use crate::output::PathStyle;
use petgraph::visit::EdgeRef;
use std::io::Write;
use std::path::PathBuf;

/// Write analyze output as human-readable text.
pub fn write_analyze_text<W: Write>(
    writer: &mut W,
    listing: &DependencyListing,
    cycles: Option<&[Vec<PathBuf>]>,
    paths: &PathStyle,
) -> Result<()> {
    for (file, deps) in listing {
        writeln!(writer, "{}", paths.render(file))?;
        if deps.is_empty() {
            writeln!(writer, "  (no dependencies)")?;
        }
        for dep in deps {
            writeln!(writer, "  -> {}", paths.render(dep))?;
        }
    }

    if let Some(cycles) = cycles {
        writeln!(writer)?;
        writeln!(writer, "Import cycles: {}", cycles.len())?;
        writeln!(writer, "{:-<60}", "")?;
        for (id, members) in cycles.iter().enumerate() {
            writeln!(writer, "Cycle #{} (size={})", id, members.len())?;
            for member in members {
                writeln!(writer, "  - {}", paths.render(member))?;
            }
        }
    }

    Ok(())
}

/// Write the direct-dependency graph as one `from -> to` line per edge.
pub fn write_graph_text<W: Write>(writer: &mut W, graph: &DepGraph, paths: &PathStyle) -> Result<()> {
    let mut lines: Vec<(String, String)> = graph
        .edge_references()
        .map(|e| {
            (
                paths.render(&graph[e.source()].path),
                paths.render(&graph[e.target()].path),
            )
        })
        .collect();
    lines.sort();
    for (from, to) in lines {
        writeln!(writer, "{from} -> {to}")?;
    }
    Ok(())
}
