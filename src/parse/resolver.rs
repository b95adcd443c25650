//! File-existence based module resolution shared by every frontend.
//!
//! Nothing here fails: a missing anchor, a dangling specifier or an unreadable
//! directory all come back as `None`, and callers decide whether to drop it.

use std::path::{Component, Path, PathBuf};

/// Directory conventions that let a directory stand in for a module file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conventions {
    /// `dir/index.<ext>` satisfies a reference to `dir`.
    pub index_file: bool,
    /// A fixed file name (e.g. `__init__.py`) inside `dir` satisfies a reference to `dir`.
    pub package_marker: Option<&'static str>,
}

impl Conventions {
    pub const NONE: Conventions = Conventions {
        index_file: false,
        package_marker: None,
    };

    pub const INDEX: Conventions = Conventions {
        index_file: true,
        package_marker: None,
    };

    pub fn package(marker: &'static str) -> Self {
        Self {
            index_file: false,
            package_marker: Some(marker),
        }
    }
}

/// Resolve `specifier` against `anchor`.
///
/// Priority order:
/// 1. `anchor/specifier` as an existing file
/// 2. `anchor/stem.<ext>` for each extension, where `stem` is the specifier
///    without a recognized extension
/// 3. `anchor/stem/index.<ext>` and then the package marker, if `anchor/stem` is a directory
///
/// A specifier that can only name a directory (`.`, `..`, or a trailing `/`) skips 1 and 2.
pub fn resolve_path(
    anchor: &Path,
    specifier: &str,
    extensions: &[&str],
    conventions: Conventions,
) -> Option<PathBuf> {
    if specifier.is_empty() {
        return None;
    }

    let base = if names_directory(specifier) {
        normalize_path(&anchor.join(specifier))
    } else {
        let direct = normalize_path(&anchor.join(specifier));
        if direct.is_file() {
            return Some(direct);
        }

        let stem = strip_known_extension(specifier, extensions);
        let base = normalize_path(&anchor.join(stem));
        for ext in extensions {
            let candidate = append_extension(&base, ext);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        base
    };

    if base.is_dir() {
        if conventions.index_file {
            for ext in extensions {
                let index = base.join(format!("index.{ext}"));
                if index.is_file() {
                    return Some(index);
                }
            }
        }
        if let Some(marker) = conventions.package_marker {
            let marker_path = base.join(marker);
            if marker_path.is_file() {
                return Some(marker_path);
            }
        }
    }

    None
}

/// Probe `roots` in order and return the first resolution.
pub fn search_roots(
    roots: &[PathBuf],
    specifier: &str,
    extensions: &[&str],
    conventions: Conventions,
) -> Option<PathBuf> {
    roots
        .iter()
        .find_map(|root| resolve_path(root, specifier, extensions, conventions))
}

/// Lexical path normalization (resolve `.` and `..` without touching the filesystem).
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn names_directory(specifier: &str) -> bool {
    specifier.ends_with('/')
        || matches!(
            Path::new(specifier).components().next_back(),
            Some(Component::CurDir | Component::ParentDir)
        )
}

fn strip_known_extension<'a>(specifier: &'a str, extensions: &[&str]) -> &'a str {
    match Path::new(specifier).extension().and_then(|e| e.to_str()) {
        Some(ext) if extensions.contains(&ext) => {
            &specifier[..specifier.len() - ext.len() - 1]
        }
        _ => specifier,
    }
}

// `with_extension` would clobber dotted stems like `user.service`.
fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
