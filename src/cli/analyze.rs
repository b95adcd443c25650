use crate::errors::Result;
use crate::metrics::scc::find_cycles;
use crate::output::OutputFormat;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// File or directory to analyze
    pub path: PathBuf,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Also report import cycles
    #[arg(long)]
    pub cycles: bool,

    #[command(flatten)]
    pub project: super::ProjectArgs,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let start = Instant::now();

    let (mut analyzer, paths) = args.project.open(&args.path)?;
    let listing = super::run_analysis(&mut analyzer, &args.path)?;
    let cycles = args.cycles.then(|| find_cycles(analyzer.graph()));

    let mut stdout = std::io::stdout();

    match args.format {
        OutputFormat::Json => {
            crate::output::json::write_analyze_json(
                &mut stdout,
                &listing,
                cycles.as_deref(),
                &paths,
            )?;
        }
        OutputFormat::Text => {
            crate::output::text::write_analyze_text(
                &mut stdout,
                &listing,
                cycles.as_deref(),
                &paths,
            )?;
        }
        OutputFormat::Dot => {
            crate::output::dot::write_dot(&mut stdout, analyzer.graph(), &paths)?;
        }
    }

    if !analyzer.config().defaults.quiet {
        let elapsed = start.elapsed();
        eprintln!(
            "Analyzed {} files ({} reachable) in {:.2}s",
            listing.len(),
            analyzer.graph().node_count(),
            elapsed.as_secs_f64()
        );
    }

    Ok(())
}
