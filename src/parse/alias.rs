//! `tsconfig.json` / `jsconfig.json` path aliases.
//!
//! Only `compilerOptions.baseUrl` and `compilerOptions.paths` are read. A missing or
//! unparsable file yields an empty table, so every specifier is treated as unaliased.

use crate::errors::{DeptrailError, Result};
use crate::parse::resolver::{normalize_path, resolve_path, Conventions};
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct AliasEntry {
    pattern: String,
    matcher: Regex,
    targets: Vec<String>,
}

/// Alias pattern → target templates, anchored at `base_dir`.
#[derive(Debug, Clone)]
pub struct AliasTable {
    base_dir: PathBuf,
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn empty(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            entries: Vec::new(),
        }
    }

    /// Load aliases from the first existing file of `file_names` under `root`.
    ///
    /// Never fails: problems are logged and produce an empty table.
    pub fn load(root: &Path, file_names: &[String]) -> Self {
        let Some(config_path) = file_names
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
        else {
            tracing::debug!(
                "No alias config ({}) under {}",
                file_names.join(", "),
                root.display()
            );
            return Self::empty(root);
        };

        match Self::from_file(&config_path) {
            Ok(table) => {
                tracing::debug!(
                    "Loaded {} path aliases from {}",
                    table.len(),
                    config_path.display()
                );
                table
            }
            Err(e) => {
                tracing::warn!("{}; continuing without path aliases", e);
                Self::empty(root)
            }
        }
    }

    /// Parse a config file. Relative `baseUrl` values are anchored at the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        Self::parse(&content, config_dir).map_err(|message| DeptrailError::TsConfig {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse config text, trying strict JSON before JSON5 (comments, trailing commas).
    pub fn parse(content: &str, config_dir: &Path) -> std::result::Result<Self, String> {
        let value: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(json_err) => json_five::from_str::<Value>(content)
                .map_err(|e| format!("{json_err}; as JSON5: {e}"))?,
        };

        let compiler_options = value.get("compilerOptions");
        let base_url = compiler_options
            .and_then(|c| c.get("baseUrl"))
            .and_then(Value::as_str)
            .unwrap_or(".");
        let base_dir = normalize_path(&config_dir.join(base_url));

        let mut entries = Vec::new();
        if let Some(paths) = compiler_options
            .and_then(|c| c.get("paths"))
            .and_then(Value::as_object)
        {
            for (pattern, targets) in paths {
                let targets: Vec<String> = match targets {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(|t| t.as_str().map(String::from))
                        .collect(),
                    Value::String(single) => vec![single.clone()],
                    _ => continue,
                };
                match pattern_regex(pattern) {
                    Ok(matcher) => entries.push(AliasEntry {
                        pattern: pattern.clone(),
                        matcher,
                        targets,
                    }),
                    Err(e) => tracing::warn!("Skipping alias {:?}: {}", pattern, e),
                }
            }
        }

        Ok(Self { base_dir, entries })
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Target templates with the wildcard substituted, for every matching alias in order.
    pub fn expand(&self, specifier: &str) -> Vec<String> {
        let mut expansions = Vec::new();
        for entry in &self.entries {
            let Some(captures) = entry.matcher.captures(specifier) else {
                continue;
            };
            let wildcard = captures.get(1).map_or("", |m| m.as_str());
            for target in &entry.targets {
                expansions.push(target.replace('*', wildcard));
            }
            tracing::trace!("{} matched alias {}", specifier, entry.pattern);
        }
        expansions
    }

    /// Resolve an aliased specifier; the first expansion that lands on a file wins.
    pub fn resolve(&self, specifier: &str, extensions: &[&str]) -> Option<PathBuf> {
        self.expand(specifier)
            .iter()
            .find_map(|target| resolve_path(&self.base_dir, target, extensions, Conventions::INDEX))
    }
}

/// `@/*` → `^@/(.*)$`. Only the first `*` is a wildcard.
fn pattern_regex(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    let escaped = regex::escape(pattern).replacen(r"\*", "(.*)", 1);
    Regex::new(&format!("^{escaped}$"))
}
