use crate::parse::alias::AliasTable;
use crate::parse::common::{ImportConfidence, ImportKind, RawImport};
use crate::parse::resolver::{resolve_path, Conventions};
use crate::parse::{node_text, parse_tree, source_dir, ParseFrontend};
use crate::walk::Language;
use std::path::{Path, PathBuf};

pub struct TypeScriptFrontend {
    aliases: AliasTable,
}

impl TypeScriptFrontend {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// Grammar for a file extension.
    ///
    /// `.ts` and `.tsx` need different grammars: the TypeScript grammar cannot parse JSX,
    /// and the TSX grammar rejects `<T>expr` type assertions.
    fn grammar_for(file_path: &Path) -> tree_sitter::Language {
        match file_path.extension().and_then(|e| e.to_str()) {
            Some("ts") => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Some("tsx") => tree_sitter_typescript::LANGUAGE_TSX.into(),
            _ => tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    fn is_relative(specifier: &str) -> bool {
        specifier.starts_with("./")
            || specifier.starts_with("../")
            || specifier == "."
            || specifier == ".."
    }

    fn walk_for_imports(
        node: tree_sitter::Node,
        source: &[u8],
        file_path: &Path,
        imports: &mut Vec<RawImport>,
    ) {
        match node.kind() {
            // import x from "a" / import type { X } from "a" / import "a" / import x = require("a")
            "import_statement" => {
                let source_node = node.child_by_field_name("source").or_else(|| {
                    let mut cursor = node.walk();
                    let clause = node
                        .named_children(&mut cursor)
                        .find(|c| c.kind() == "import_require_clause");
                    clause.and_then(|c| c.child_by_field_name("source"))
                });
                if let Some(string) = source_node {
                    Self::push_specifier(string, source, file_path, imports);
                }
            }
            // export { x } from "a" / export * from "a"
            "export_statement" => {
                if let Some(string) = node.child_by_field_name("source") {
                    Self::push_specifier(string, source, file_path, imports);
                }
            }
            // require("a") / import("a")
            "call_expression" => {
                let is_loader = node.child_by_field_name("function").is_some_and(|f| {
                    f.kind() == "import" || (f.kind() == "identifier" && node_text(f, source) == "require")
                });
                if is_loader {
                    if let Some(args) = node.child_by_field_name("arguments") {
                        let mut cursor = args.walk();
                        let first = args.named_children(&mut cursor).next();
                        if let Some(string) = first.filter(|a| a.kind() == "string") {
                            Self::push_specifier(string, source, file_path, imports);
                        }
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::walk_for_imports(child, source, file_path, imports);
        }
    }

    fn push_specifier(
        string_node: tree_sitter::Node,
        source: &[u8],
        file_path: &Path,
        imports: &mut Vec<RawImport>,
    ) {
        if string_node.kind() != "string" {
            return;
        }
        let mut specifier = String::new();
        let mut cursor = string_node.walk();
        for child in string_node.named_children(&mut cursor) {
            if child.kind() == "string_fragment" {
                specifier.push_str(node_text(child, source));
            }
        }
        if specifier.is_empty() {
            return;
        }
        let confidence = if Self::is_relative(&specifier) || !specifier.contains(':') {
            ImportConfidence::Resolved
        } else {
            // node:fs, https://..., virtual:module
            ImportConfidence::External
        };
        imports.push(RawImport {
            raw_path: specifier,
            source_file: file_path.to_path_buf(),
            line: string_node.start_position().row + 1,
            kind: ImportKind::Direct,
            confidence,
        });
    }
}

impl ParseFrontend for TypeScriptFrontend {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn extract_imports(&self, source: &[u8], file_path: &Path) -> Vec<RawImport> {
        let tree = match parse_tree(Self::grammar_for(file_path), source, file_path) {
            Some(t) => t,
            None => return vec![],
        };

        let mut imports = Vec::new();
        Self::walk_for_imports(tree.root_node(), source, file_path, &mut imports);
        imports
    }

    fn resolve(&self, raw: &RawImport) -> Vec<PathBuf> {
        let extensions = Language::TypeScript.extensions();
        let found = if Self::is_relative(&raw.raw_path) {
            resolve_path(
                &source_dir(&raw.source_file),
                &raw.raw_path,
                extensions,
                Conventions::INDEX,
            )
        } else {
            self.aliases.resolve(&raw.raw_path, extensions)
        };
        found.into_iter().collect()
    }
}
