use crate::errors::Result;
use crate::output::OutputFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GraphArgs {
    /// File or directory to analyze
    pub path: PathBuf,

    /// Output format
    #[arg(long, default_value = "dot")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub project: super::ProjectArgs,
}

pub fn run(args: &GraphArgs) -> Result<()> {
    let (mut analyzer, paths) = args.project.open(&args.path)?;
    super::run_analysis(&mut analyzer, &args.path)?;

    let graph = analyzer.graph();
    let mut stdout = std::io::stdout();

    match args.format {
        OutputFormat::Dot => crate::output::dot::write_dot(&mut stdout, graph, &paths)?,
        OutputFormat::Json => crate::output::json::write_graph_json(&mut stdout, graph, &paths)?,
        OutputFormat::Text => crate::output::text::write_graph_text(&mut stdout, graph, &paths)?,
    }

    Ok(())
}
