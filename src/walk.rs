use crate::errors::Result;
use globset::{Glob, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Supported language for file discovery and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    Python,
    Ruby,
    Rust,
}

impl Language {
    /// Registration order. When extensions overlap the first entry owns the file.
    pub const ALL: [Language; 4] = [
        Language::TypeScript,
        Language::Python,
        Language::Ruby,
        Language::Rust,
    ];

    /// File extensions owned by this language, in resolution priority order.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::TypeScript => &["ts", "tsx", "js", "jsx"],
            Language::Python => &["py"],
            Language::Ruby => &["rb"],
            Language::Rust => &["rs"],
        }
    }

    /// Default exclude patterns for this language.
    pub fn default_excludes(&self) -> Vec<String> {
        match self {
            Language::TypeScript => vec!["**/node_modules/**".to_string()],
            Language::Python | Language::Ruby | Language::Rust => vec![],
        }
    }

    /// Look up the language owning a file by its extension.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        Language::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::TypeScript => write!(f, "typescript"),
            Language::Python => write!(f, "python"),
            Language::Ruby => write!(f, "ruby"),
            Language::Rust => write!(f, "rust"),
        }
    }
}

/// Discover source files under `root` owned by any registered language.
///
/// - Respects `.gitignore`
/// - Applies exclude glob patterns plus per-language defaults
/// - Returns sorted paths for deterministic output
pub fn discover_files(root: &Path, exclude_patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut exclude_builder = GlobSetBuilder::new();
    for pattern in exclude_patterns {
        exclude_builder.add(Glob::new(pattern)?);
    }
    for lang in Language::ALL {
        for pattern in lang.default_excludes() {
            exclude_builder.add(Glob::new(&pattern)?);
        }
    }
    let exclude_set = exclude_builder.build()?;

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("Walk error under {}: {}", root.display(), e);
                continue;
            }
        };

        let path = entry.path();

        if !path.is_file() || Language::from_path(path).is_none() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if exclude_set.is_match(relative) || exclude_set.is_match(path) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    // Sort for deterministic output
    files.sort();

    Ok(files)
}
