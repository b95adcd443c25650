pub mod dot;
pub mod json;
pub mod text;

use clap::ValueEnum;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Copy, ValueEnum, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
    Dot,
}

/// Renders every path in a report the same way: absolute, or relative to the project root.
#[derive(Debug, Clone)]
pub struct PathStyle {
    root: PathBuf,
    relative: bool,
}

impl PathStyle {
    pub fn absolute() -> Self {
        Self {
            root: PathBuf::new(),
            relative: false,
        }
    }

    pub fn relative_to(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            relative: true,
        }
    }

    /// Paths outside the root stay absolute even in relative mode.
    pub fn render(&self, path: &Path) -> String {
        let shown = if self.relative {
            path.strip_prefix(&self.root).unwrap_or(path)
        } else {
            path
        };
        shown.to_string_lossy().into_owned()
    }
}
