use crate::parse::common::{ImportConfidence, ImportKind, RawImport};
use crate::parse::{node_text, parse_tree, source_dir, ParseFrontend};
use crate::walk::Language;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;

/// The crate being analyzed, so `use my_crate::x` can be walked like `crate::x`.
#[derive(Debug, Clone)]
pub struct CrateInfo {
    pub name: String,
    pub src_dir: PathBuf,
}

pub struct RustFrontend {
    own_crate: Option<CrateInfo>,
}

impl RustFrontend {
    pub fn new() -> Self {
        Self { own_crate: None }
    }

    pub fn with_crate(info: CrateInfo) -> Self {
        Self {
            own_crate: Some(info),
        }
    }

    /// Read the crate name from Cargo.toml at the given project root.
    pub fn read_cargo_toml(root: &Path) -> Option<CrateInfo> {
        let cargo_path = root.join("Cargo.toml");
        let content = std::fs::read_to_string(cargo_path).ok()?;
        let name = Self::parse_crate_name(&content)?;
        Some(CrateInfo {
            name,
            src_dir: root.join("src"),
        })
    }

    /// Parse crate name from Cargo.toml content string.
    pub fn parse_crate_name(content: &str) -> Option<String> {
        let table: toml::Table = content.parse().ok()?;
        table
            .get("package")?
            .get("name")?
            .as_str()
            .map(|s| s.to_string())
    }

    fn is_own_crate(&self, segment: &str) -> bool {
        self.own_crate
            .as_ref()
            .is_some_and(|c| c.name.replace('-', "_") == segment.replace('-', "_"))
    }

    /// Classify an import path.
    fn classify_import(&self, path: &str) -> ImportConfidence {
        let first_segment = path.split("::").next().unwrap_or(path);
        match first_segment {
            "crate" | "super" | "self" => ImportConfidence::Resolved,
            segment if self.is_own_crate(segment) => ImportConfidence::Resolved,
            _ => ImportConfidence::External,
        }
    }

    /// Recursively walk a use_declaration argument subtree to collect full import paths.
    fn collect_paths(
        node: tree_sitter::Node,
        source: &[u8],
        prefix: &str,
        paths: &mut Vec<String>,
    ) {
        let join = |text: &str| {
            if prefix.is_empty() {
                text.to_string()
            } else {
                format!("{prefix}::{text}")
            }
        };

        match node.kind() {
            "scoped_use_list" => {
                // path::{item1, item2}
                let path_prefix = match node.child_by_field_name("path") {
                    Some(path) => join(node_text(path, source)),
                    None => prefix.to_string(),
                };
                if let Some(list) = node.child_by_field_name("list") {
                    Self::collect_paths(list, source, &path_prefix, paths);
                }
            }
            "use_list" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    Self::collect_paths(child, source, prefix, paths);
                }
            }
            "use_as_clause" => {
                // `Foo as Bar`: keep the original path
                if let Some(path) = node.child_by_field_name("path") {
                    Self::collect_paths(path, source, prefix, paths);
                }
            }
            "scoped_identifier" | "use_wildcard" | "identifier" | "self" | "super" | "crate" => {
                paths.push(join(node_text(node, source)));
            }
            _ => {
                if node.is_named() {
                    let text = node_text(node, source);
                    if !text.is_empty() {
                        paths.push(join(text));
                    }
                }
            }
        }
    }

    fn extract_use_declarations(
        tree: &tree_sitter::Tree,
        source: &[u8],
        file_path: &Path,
        frontend: &RustFrontend,
        imports: &mut Vec<RawImport>,
    ) {
        let lang: tree_sitter::Language = tree_sitter_rust::LANGUAGE.into();
        let query = match tree_sitter::Query::new(&lang, r#"(use_declaration argument: (_) @arg)"#)
        {
            Ok(q) => q,
            Err(e) => {
                tracing::warn!("Rust use query rejected: {}", e);
                return;
            }
        };

        let mut cursor = tree_sitter::QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source);
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let line = node.start_position().row + 1;

                let mut paths = Vec::new();
                Self::collect_paths(node, source, "", &mut paths);

                for path in paths {
                    if path.is_empty() {
                        continue;
                    }
                    let confidence = frontend.classify_import(&path);
                    imports.push(RawImport {
                        raw_path: path,
                        source_file: file_path.to_path_buf(),
                        line,
                        kind: ImportKind::Direct,
                        confidence,
                    });
                }
            }
        }
    }

    /// `mod foo;` declarations. Inline `mod foo { ... }` blocks have no file.
    fn walk_for_mod_declarations(
        node: tree_sitter::Node,
        source: &[u8],
        file_path: &Path,
        imports: &mut Vec<RawImport>,
    ) {
        if node.kind() == "mod_item" {
            if node.child_by_field_name("body").is_none() {
                if let Some(name) = node.child_by_field_name("name") {
                    imports.push(RawImport {
                        raw_path: node_text(name, source).to_string(),
                        source_file: file_path.to_path_buf(),
                        line: node.start_position().row + 1,
                        kind: ImportKind::ModDeclaration,
                        confidence: ImportConfidence::Resolved,
                    });
                }
                return;
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::walk_for_mod_declarations(child, source, file_path, imports);
        }
    }

    /// Walk module segments one directory level at a time from `start`.
    ///
    /// Every `segment/mod.rs` and `segment.rs` found along the way is a dependency;
    /// the walk continues into `segment/` while that directory exists.
    fn walk_module_path<'a>(
        start: &Path,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Vec<PathBuf> {
        let mut dir = start.to_path_buf();
        let mut found = Vec::new();

        for segment in segments {
            match segment {
                "super" => {
                    if !dir.pop() {
                        break;
                    }
                    continue;
                }
                "self" | "*" => continue,
                _ => {}
            }
            if !is_identifier(segment) {
                break;
            }

            let mod_file = dir.join(segment).join("mod.rs");
            if mod_file.is_file() {
                found.push(mod_file);
            }
            let rs_file = dir.join(format!("{segment}.rs"));
            if rs_file.is_file() {
                found.push(rs_file);
            }

            let next = dir.join(segment);
            if !next.is_dir() {
                break;
            }
            dir = next;
        }

        found
    }
}

fn is_identifier(segment: &str) -> bool {
    let segment = segment.strip_prefix("r#").unwrap_or(segment);
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

impl Default for RustFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseFrontend for RustFrontend {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn extract_imports(&self, source: &[u8], file_path: &Path) -> Vec<RawImport> {
        let tree = match parse_tree(tree_sitter_rust::LANGUAGE.into(), source, file_path) {
            Some(t) => t,
            None => return vec![],
        };

        let mut imports = Vec::new();
        Self::walk_for_mod_declarations(tree.root_node(), source, file_path, &mut imports);
        Self::extract_use_declarations(&tree, source, file_path, self, &mut imports);
        imports
    }

    fn resolve(&self, raw: &RawImport) -> Vec<PathBuf> {
        let anchor = source_dir(&raw.source_file);
        if raw.kind == ImportKind::ModDeclaration {
            return Self::walk_module_path(&anchor, [raw.raw_path.as_str()]);
        }

        let mut segments = raw.raw_path.split("::").map(str::trim);
        let first = segments.next().unwrap_or_default();
        match first {
            "crate" | "super" | "self" => Self::walk_module_path(&anchor, segments),
            segment if self.is_own_crate(segment) => match &self.own_crate {
                Some(info) => Self::walk_module_path(&info.src_dir, segments),
                None => vec![],
            },
            _ => vec![],
        }
    }
}
