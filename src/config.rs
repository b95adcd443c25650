use crate::errors::{DeptrailError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the project configuration.
pub const CONFIG_FILE_NAME: &str = ".deptrail.toml";

/// Configuration loaded from `.deptrail.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub python: PythonConfig,
    #[serde(default)]
    pub ruby: RubyConfig,
    #[serde(default)]
    pub typescript: TypeScriptConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    /// Render report paths relative to the project root instead of absolute.
    #[serde(default)]
    pub relative_paths: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PythonConfig {
    /// Module search roots, relative to the project root.
    #[serde(default)]
    pub search_paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RubyConfig {
    /// `require` load paths, relative to the project root. The root itself is always probed last.
    #[serde(default)]
    pub load_path: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TypeScriptConfig {
    /// Candidate alias config files, first existing one wins.
    #[serde(default)]
    pub config_files: Vec<String>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|_| {
            DeptrailError::Config(format!("Could not read config file: {}", path.display()))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| DeptrailError::Config(format!("Invalid config file: {e}")))?;
        Ok(config)
    }

    /// Try to find and load `.deptrail.toml` by walking up from the given directory.
    ///
    /// A config file that exists but does not parse is an error; a missing one is not.
    pub fn find_and_load(start: &Path) -> Result<Option<Self>> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                tracing::debug!("Loading config from {}", config_path.display());
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Exclude globs applied to directory scans.
    pub fn exclude_patterns(&self) -> &[String] {
        &self.defaults.exclude
    }

    /// Python module search roots as absolute paths under `root`.
    pub fn python_search_paths(&self, root: &Path) -> Vec<PathBuf> {
        if self.python.search_paths.is_empty() {
            vec![root.to_path_buf(), root.join("src")]
        } else {
            self.python
                .search_paths
                .iter()
                .map(|p| join_relative(root, p))
                .collect()
        }
    }

    /// Ruby load paths as absolute paths under `root`, with the root appended last.
    pub fn ruby_load_paths(&self, root: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = if self.ruby.load_path.is_empty() {
            vec![root.join("lib"), root.join("app")]
        } else {
            self.ruby
                .load_path
                .iter()
                .map(|p| join_relative(root, p))
                .collect()
        };
        if !paths.iter().any(|p| p == root) {
            paths.push(root.to_path_buf());
        }
        paths
    }

    /// Alias config candidates, in probe order.
    pub fn typescript_config_files(&self) -> Vec<String> {
        if self.typescript.config_files.is_empty() {
            vec!["tsconfig.json".to_string(), "jsconfig.json".to_string()]
        } else {
            self.typescript.config_files.clone()
        }
    }
}

fn join_relative(root: &Path, rel: &str) -> PathBuf {
    if rel.is_empty() || rel == "." {
        root.to_path_buf()
    } else {
        root.join(rel)
    }
}
