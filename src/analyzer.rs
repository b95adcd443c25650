//! Drives extraction over one file or a whole tree and flattens direct edges into
//! transitive dependency lists.

use crate::config::Config;
use crate::errors::{DeptrailError, Result};
use crate::graph::builder::GraphBuilder;
use crate::graph::closure::transitive_dependencies;
use crate::graph::ir::DepGraph;
use crate::parse::resolver::normalize_path;
use crate::parse::FrontendSet;
use crate::walk::{self, Language};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// File → transitive dependencies, in discovery order.
pub type DependencyListing = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Files whose presence marks a directory as a project root.
pub const PROJECT_MARKERS: &[&str] = &[
    crate::config::CONFIG_FILE_NAME,
    ".git",
    "Cargo.toml",
    "package.json",
    "tsconfig.json",
    "jsconfig.json",
    "pyproject.toml",
    "setup.py",
    "Gemfile",
];

/// Per-file progress callbacks for the extraction phase of a tree scan.
///
/// Called from rayon workers.
pub trait ScanProgress: Sync {
    fn start(&self, _total: usize) {}
    fn file_done(&self) {}
    fn finish(&self) {}
}

/// Reports nothing.
pub struct NoProgress;

impl ScanProgress for NoProgress {}

pub struct DependencyAnalyzer {
    root: PathBuf,
    config: Config,
    frontends: FrontendSet,
    builder: GraphBuilder,
}

impl DependencyAnalyzer {
    /// Analyzer for the project at `root`. The root must be an existing directory.
    pub fn new(root: &Path, config: Config) -> Result<Self> {
        let root = canonical_dir(root)?;
        let frontends = FrontendSet::new(&root, &config);
        Ok(Self {
            root,
            config,
            frontends,
            builder: GraphBuilder::new(),
        })
    }

    /// Analyzer for whatever project `path` belongs to, with `.deptrail.toml` applied.
    pub fn for_path(path: &Path, root_override: Option<&Path>) -> Result<Self> {
        let root = project_root_for(path, root_override)?;
        let config = Config::find_and_load(&root)?.unwrap_or_default();
        Self::new(&root, config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Direct-dependency graph from the most recent analysis.
    pub fn graph(&self) -> &DepGraph {
        self.builder.graph()
    }

    /// Transitive dependencies of a single file.
    ///
    /// The result has one entry keyed by the normalized input path, or none when the file
    /// is missing, unreadable, or has an extension no frontend owns.
    pub fn analyze_file(&mut self, path: &Path) -> Result<DependencyListing> {
        self.builder = GraphBuilder::new();

        let file = match source_file_path(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                return Ok(DependencyListing::new());
            }
        };
        if Language::from_path(&file).is_none() {
            tracing::debug!("No frontend owns {}", file.display());
            return Ok(DependencyListing::new());
        }
        if !Self::ensure_analyzed(&self.frontends, &mut self.builder, &file) {
            return Ok(DependencyListing::new());
        }

        let deps = self.flatten(&file);
        Ok(DependencyListing::from([(file, deps)]))
    }

    /// Transitive dependencies of every source file under the project.
    ///
    /// The scan starts at `<root>/src` when that directory exists.
    pub fn analyze_directory(&mut self) -> Result<DependencyListing> {
        self.analyze_directory_with(&NoProgress)
    }

    pub fn analyze_directory_with(
        &mut self,
        progress: &dyn ScanProgress,
    ) -> Result<DependencyListing> {
        let scan_root = self.scan_root();
        self.analyze_tree_with(&scan_root, progress)
    }

    /// Like [`Self::analyze_directory`], but scanning `dir` with this project's resolution
    /// context.
    pub fn analyze_tree(&mut self, dir: &Path) -> Result<DependencyListing> {
        self.analyze_tree_with(dir, &NoProgress)
    }

    pub fn analyze_tree_with(
        &mut self,
        dir: &Path,
        progress: &dyn ScanProgress,
    ) -> Result<DependencyListing> {
        self.builder = GraphBuilder::new();

        let scan_root = canonical_dir(dir)?;
        let files = walk::discover_files(&scan_root, self.config.exclude_patterns())?;
        tracing::debug!("Discovered {} files under {}", files.len(), scan_root.display());

        progress.start(files.len());

        // Parallel extraction: each call builds its own tree-sitter Parser
        let frontends = &self.frontends;
        let extracted: Vec<(PathBuf, Language, BTreeSet<PathBuf>)> = files
            .par_iter()
            .filter_map(|file_path| {
                let frontend = frontends.for_path(file_path)?;
                let result = match std::fs::read(file_path) {
                    Ok(source) => Some((
                        file_path.clone(),
                        frontend.language(),
                        frontend.extract(&source, file_path),
                    )),
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", file_path.display(), e);
                        None
                    }
                };
                progress.file_done();
                result
            })
            .collect();

        progress.finish();

        // Sequential graph population
        for (file_path, language, deps) in &extracted {
            self.builder.record(file_path, Some(*language), deps);
        }

        let mut listing = DependencyListing::new();
        for (file_path, _, _) in &extracted {
            let deps = self.flatten(file_path);
            listing.insert(file_path.clone(), deps);
        }
        Ok(listing)
    }

    fn scan_root(&self) -> PathBuf {
        let src = self.root.join("src");
        if src.is_dir() {
            src
        } else {
            self.root.clone()
        }
    }

    fn flatten(&mut self, file: &Path) -> Vec<PathBuf> {
        let frontends = &self.frontends;
        let builder = &mut self.builder;
        transitive_dependencies(file, |path| {
            Self::ensure_analyzed(frontends, builder, path);
            builder.direct(path)
        })
    }

    /// Read and record `path` unless it already is. Returns whether it is recorded.
    fn ensure_analyzed(frontends: &FrontendSet, builder: &mut GraphBuilder, path: &Path) -> bool {
        if builder.is_analyzed(path) {
            return true;
        }
        let Some(frontend) = frontends.for_path(path) else {
            return false;
        };
        let source = match std::fs::read(path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                return false;
            }
        };
        let deps = frontend.extract(&source, path);
        tracing::trace!(
            "{} ({}): {} direct dependencies",
            path.display(),
            frontend.language(),
            deps.len()
        );
        builder.record(path, Some(frontend.language()), &deps);
        true
    }
}

/// Project root for `path`: the override if given, the directory itself, or the nearest
/// ancestor of a file carrying a [`PROJECT_MARKERS`] entry.
pub fn project_root_for(path: &Path, root_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = root_override {
        return canonical_dir(root);
    }
    let path = path.canonicalize().map_err(|_| DeptrailError::NoFiles {
        path: path.to_path_buf(),
    })?;
    if path.is_dir() {
        Ok(path)
    } else {
        Ok(discover_project_root(&path))
    }
}

/// Nearest ancestor of `file` containing a project marker, else the file's directory.
pub fn discover_project_root(file: &Path) -> PathBuf {
    let start = file.parent().unwrap_or(file);
    start
        .ancestors()
        .find(|dir| PROJECT_MARKERS.iter().any(|m| dir.join(m).exists()))
        .unwrap_or(start)
        .to_path_buf()
}

/// Absolute key for an input file: the directory is canonicalized like the project root,
/// the file name is kept as given so a symlinked file keeps its own name.
fn source_file_path(path: &Path) -> std::io::Result<PathBuf> {
    if !path.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "not a readable file",
        ));
    }
    let absolute = normalize_path(&std::path::absolute(path)?);
    let (Some(dir), Some(name)) = (absolute.parent(), absolute.file_name()) else {
        return Ok(absolute);
    };
    Ok(dir.canonicalize()?.join(name))
}

fn canonical_dir(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(dir) if dir.is_dir() => Ok(dir),
        _ => Err(DeptrailError::NoFiles {
            path: path.to_path_buf(),
        }),
    }
}
