pub mod analyze;
pub mod graph;

use crate::analyzer::{project_root_for, DependencyAnalyzer, NoProgress, ScanProgress};
use crate::config::Config;
use crate::errors::{DeptrailError, Result};
use crate::output::PathStyle;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "deptrail",
    version,
    about = "File-level import dependency resolver"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the transitive dependencies of a file, or of every file in a directory
    Analyze(analyze::AnalyzeArgs),
    /// Export the direct dependency graph
    Graph(graph::GraphArgs),
}

/// Options shared by every command that opens a project.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Project root (default: the directory itself, or the nearest ancestor with a project marker)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Exclude glob patterns for directory scans
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Print paths relative to the project root
    #[arg(long)]
    pub relative: bool,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

impl ProjectArgs {
    /// Locate the project for `path`, merge `.deptrail.toml` with the flags, and build the analyzer.
    pub fn open(&self, path: &Path) -> Result<(DependencyAnalyzer, PathStyle)> {
        if !path.exists() {
            return Err(DeptrailError::NoFiles {
                path: path.to_path_buf(),
            });
        }
        let root = project_root_for(path, self.root.as_deref())?;
        let mut config = Config::find_and_load(&root)?.unwrap_or_default();
        config.defaults.exclude.extend(self.exclude.iter().cloned());
        config.defaults.quiet |= self.quiet;

        let relative = self.relative || config.output.relative_paths;
        let analyzer = DependencyAnalyzer::new(&root, config)?;
        let style = if relative {
            PathStyle::relative_to(analyzer.root())
        } else {
            PathStyle::absolute()
        };
        Ok((analyzer, style))
    }
}

/// Progress bar over the files of a directory scan.
struct ProgressBarReporter {
    bar: indicatif::ProgressBar,
}

impl ProgressBarReporter {
    fn new() -> Self {
        let bar = indicatif::ProgressBar::hidden();
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }
}

impl ScanProgress for ProgressBarReporter {
    fn start(&self, total: usize) {
        if total > 0 {
            self.bar.set_length(total as u64);
            self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        }
    }

    fn file_done(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Run a file or directory analysis depending on what `path` is.
///
/// A directory that is the project root gets the `src`-preferring scan; any other directory is
/// scanned as given.
pub(crate) fn run_analysis(
    analyzer: &mut DependencyAnalyzer,
    path: &Path,
) -> Result<crate::analyzer::DependencyListing> {
    if !path.is_dir() {
        return analyzer.analyze_file(path);
    }
    let reporter = ProgressBarReporter::new();
    let progress: &dyn ScanProgress = if analyzer.config().defaults.quiet {
        &NoProgress
    } else {
        &reporter
    };
    let dir = path.canonicalize()?;
    if dir == analyzer.root() {
        analyzer.analyze_directory_with(progress)
    } else {
        analyzer.analyze_tree_with(&dir, progress)
    }
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze(args) => analyze::run(&args),
        Commands::Graph(args) => graph::run(&args),
    }
}
