use crate::parse::common::{ImportConfidence, ImportKind, RawImport};
use crate::parse::resolver::{resolve_path, search_roots, Conventions};
use crate::parse::{node_text, parse_tree, source_dir, ParseFrontend};
use crate::walk::Language;
use std::path::{Path, PathBuf};

const EXTENSIONS: &[&str] = &["rb"];

pub struct RubyFrontend {
    load_paths: Vec<PathBuf>,
}

impl RubyFrontend {
    /// Frontend probing `load_paths` in order for `require` and `autoload`.
    pub fn with_load_paths(load_paths: Vec<PathBuf>) -> Self {
        Self { load_paths }
    }

    fn walk_for_requires(
        node: tree_sitter::Node,
        source: &[u8],
        file_path: &Path,
        imports: &mut Vec<RawImport>,
    ) {
        if node.kind() == "call" && node.child_by_field_name("receiver").is_none() {
            if let Some(method_node) = node.child_by_field_name("method") {
                match node_text(method_node, source) {
                    method @ ("require" | "require_relative") => {
                        let kind = if method == "require_relative" {
                            ImportKind::RequireRelative
                        } else {
                            ImportKind::Direct
                        };
                        if let Some(arg) = Self::first_string_argument(node) {
                            Self::push_string_import(arg, source, file_path, kind, imports);
                        }
                    }
                    // autoload :Foo, "foo/bar"
                    "autoload" => {
                        if let Some(args_node) = node.child_by_field_name("arguments") {
                            let mut arg_cursor = args_node.walk();
                            let path = args_node
                                .named_children(&mut arg_cursor)
                                .find(|c| c.kind() == "string");
                            if let Some(path) = path {
                                Self::push_string_import(
                                    path,
                                    source,
                                    file_path,
                                    ImportKind::Autoload,
                                    imports,
                                );
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::walk_for_requires(child, source, file_path, imports);
        }
    }

    fn first_string_argument(call: tree_sitter::Node) -> Option<tree_sitter::Node> {
        let args_node = call.child_by_field_name("arguments")?;
        let mut cursor = args_node.walk();
        let first = args_node.named_children(&mut cursor).next()?;
        (first.kind() == "string").then_some(first)
    }

    fn push_string_import(
        string_node: tree_sitter::Node,
        source: &[u8],
        file_path: &Path,
        kind: ImportKind,
        imports: &mut Vec<RawImport>,
    ) {
        let (content, interpolated) = Self::extract_string_content(string_node, source);
        if content.is_empty() && !interpolated {
            return;
        }
        let confidence = if interpolated || content.contains('\\') {
            ImportConfidence::Dynamic
        } else {
            ImportConfidence::Resolved
        };
        imports.push(RawImport {
            raw_path: content,
            source_file: file_path.to_path_buf(),
            line: string_node.start_position().row + 1,
            kind,
            confidence,
        });
    }

    /// Literal text of a string node, and whether it contains `#{}` interpolation.
    fn extract_string_content(string_node: tree_sitter::Node, source: &[u8]) -> (String, bool) {
        let mut content = String::new();
        let mut interpolated = false;
        let mut cursor = string_node.walk();
        for child in string_node.children(&mut cursor) {
            match child.kind() {
                "string_content" => content.push_str(node_text(child, source)),
                "interpolation" => interpolated = true,
                _ => {}
            }
        }
        (content, interpolated)
    }

    /// `require "foo"` means `foo.rb` unless an extension is given.
    fn with_rb_suffix(path: &str) -> String {
        if Path::new(path).extension().is_none() {
            format!("{path}.rb")
        } else {
            path.to_string()
        }
    }
}

impl ParseFrontend for RubyFrontend {
    fn language(&self) -> Language {
        Language::Ruby
    }

    fn extract_imports(&self, source: &[u8], file_path: &Path) -> Vec<RawImport> {
        let tree = match parse_tree(tree_sitter_ruby::LANGUAGE.into(), source, file_path) {
            Some(t) => t,
            None => return vec![],
        };

        let mut imports = Vec::new();
        Self::walk_for_requires(tree.root_node(), source, file_path, &mut imports);
        imports
    }

    fn resolve(&self, raw: &RawImport) -> Vec<PathBuf> {
        let found = match &raw.kind {
            ImportKind::RequireRelative => resolve_path(
                &source_dir(&raw.source_file),
                &raw.raw_path,
                EXTENSIONS,
                Conventions::NONE,
            ),
            ImportKind::Direct | ImportKind::Autoload => search_roots(
                &self.load_paths,
                &Self::with_rb_suffix(&raw.raw_path),
                EXTENSIONS,
                Conventions::NONE,
            ),
            _ => None,
        };
        found.into_iter().collect()
    }
}
