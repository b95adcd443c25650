use crate::parse::common::{ImportConfidence, ImportKind, RawImport};
use crate::parse::resolver::{resolve_path, search_roots, Conventions};
use crate::parse::{node_text, parse_tree, source_dir, ParseFrontend};
use crate::walk::Language;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;

const EXTENSIONS: &[&str] = &["py"];
const PACKAGE_MARKER: &str = "__init__.py";

/// `import x`, `import x.y as z`
const IMPORT_QUERY: &str = r#"
(import_statement name: (dotted_name) @import_path)
(import_statement name: (aliased_import name: (dotted_name) @import_path))
"#;

pub struct PythonFrontend {
    search_paths: Vec<PathBuf>,
}

impl PythonFrontend {
    /// Frontend probing the given module roots after the importing file's directory.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    fn conventions() -> Conventions {
        Conventions::package(PACKAGE_MARKER)
    }

    fn extract_plain_imports(
        tree: &tree_sitter::Tree,
        source: &[u8],
        file_path: &Path,
        imports: &mut Vec<RawImport>,
    ) {
        let lang: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        let query = match tree_sitter::Query::new(&lang, IMPORT_QUERY) {
            Ok(q) => q,
            Err(e) => {
                tracing::warn!("Python import query rejected: {}", e);
                return;
            }
        };

        let mut cursor = tree_sitter::QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source);
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let text = node_text(node, source);
                if !text.is_empty() {
                    imports.push(RawImport {
                        raw_path: text.to_string(),
                        source_file: file_path.to_path_buf(),
                        line: node.start_position().row + 1,
                        kind: ImportKind::Direct,
                        confidence: ImportConfidence::Resolved,
                    });
                }
            }
        }
    }

    fn walk_for_from_imports(
        node: tree_sitter::Node,
        source: &[u8],
        file_path: &Path,
        imports: &mut Vec<RawImport>,
    ) {
        if node.kind() == "import_from_statement" {
            if let Some(module_node) = node.child_by_field_name("module_name") {
                let names = Self::imported_names(node, source);
                let text = node_text(module_node, source).to_string();
                let line = module_node.start_position().row + 1;

                match module_node.kind() {
                    "relative_import" => {
                        let level = text.chars().take_while(|&c| c == '.').count();
                        let module_part = text[level..].trim().to_string();
                        imports.push(RawImport {
                            raw_path: text,
                            source_file: file_path.to_path_buf(),
                            line,
                            kind: ImportKind::RelativeImport {
                                level,
                                module: if module_part.is_empty() {
                                    None
                                } else {
                                    Some(module_part)
                                },
                                names,
                            },
                            confidence: ImportConfidence::Resolved,
                        });
                    }
                    "dotted_name" if !text.is_empty() => {
                        imports.push(RawImport {
                            raw_path: text.clone(),
                            source_file: file_path.to_path_buf(),
                            line,
                            kind: ImportKind::FromImport {
                                module: text,
                                names,
                            },
                            confidence: ImportConfidence::Resolved,
                        });
                    }
                    _ => {}
                }
            }
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::walk_for_from_imports(child, source, file_path, imports);
        }
    }

    /// Names after `import` in a from-statement (`*` yields nothing).
    fn imported_names(node: tree_sitter::Node, source: &[u8]) -> Vec<String> {
        let mut cursor = node.walk();
        node.children_by_field_name("name", &mut cursor)
            .filter_map(|child| match child.kind() {
                "dotted_name" => Some(node_text(child, source).to_string()),
                "aliased_import" => child
                    .child_by_field_name("name")
                    .map(|n| node_text(n, source).to_string()),
                _ => None,
            })
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Anchors for absolute imports: the importing file's directory, then the search paths.
    fn anchors(&self, file_path: &Path) -> Vec<PathBuf> {
        let mut anchors = vec![source_dir(file_path)];
        for path in &self.search_paths {
            if !anchors.contains(path) {
                anchors.push(path.clone());
            }
        }
        anchors
    }

    /// Resolve a dotted module, falling back to shorter prefixes (`a.b.c`, `a.b`, `a`).
    fn resolve_dotted(&self, module: &str, anchors: &[PathBuf]) -> Option<PathBuf> {
        let segments: Vec<&str> = module.split('.').filter(|s| !s.is_empty()).collect();
        (1..=segments.len()).rev().find_map(|len| {
            let candidate = segments[..len].join("/");
            search_roots(anchors, &candidate, EXTENSIONS, Self::conventions())
        })
    }

    fn resolve_relative(
        &self,
        file_path: &Path,
        level: usize,
        module: Option<&str>,
        names: &[String],
    ) -> Vec<PathBuf> {
        let mut base = source_dir(file_path);
        for _ in 1..level {
            match base.parent() {
                Some(parent) => base = parent.to_path_buf(),
                None => return vec![],
            }
        }

        let mut targets = Vec::new();
        let package = match module {
            Some(m) => m.replace('.', "/"),
            None => String::new(),
        };

        if package.is_empty() {
            let init = base.join(PACKAGE_MARKER);
            if init.is_file() {
                targets.push(init);
            }
        } else if let Some(found) = resolve_path(&base, &package, EXTENSIONS, Self::conventions())
        {
            targets.push(found);
        }

        for name in names {
            let submodule = if package.is_empty() {
                name.replace('.', "/")
            } else {
                format!("{package}/{}", name.replace('.', "/"))
            };
            if let Some(found) = resolve_path(&base, &submodule, EXTENSIONS, Self::conventions()) {
                targets.push(found);
            }
        }

        targets
    }
}

impl ParseFrontend for PythonFrontend {
    fn language(&self) -> Language {
        Language::Python
    }

    fn extract_imports(&self, source: &[u8], file_path: &Path) -> Vec<RawImport> {
        let tree = match parse_tree(tree_sitter_python::LANGUAGE.into(), source, file_path) {
            Some(t) => t,
            None => return vec![],
        };

        let mut imports = Vec::new();
        Self::extract_plain_imports(&tree, source, file_path, &mut imports);
        Self::walk_for_from_imports(tree.root_node(), source, file_path, &mut imports);
        imports
    }

    fn resolve(&self, raw: &RawImport) -> Vec<PathBuf> {
        match &raw.kind {
            ImportKind::Direct => {
                let anchors = self.anchors(&raw.source_file);
                self.resolve_dotted(&raw.raw_path, &anchors)
                    .into_iter()
                    .collect()
            }
            ImportKind::FromImport { module, names } => {
                let anchors = self.anchors(&raw.source_file);
                let mut targets: Vec<PathBuf> =
                    self.resolve_dotted(module, &anchors).into_iter().collect();
                let package = module.replace('.', "/");
                for name in names {
                    let submodule = format!("{package}/{}", name.replace('.', "/"));
                    if let Some(found) =
                        search_roots(&anchors, &submodule, EXTENSIONS, Self::conventions())
                    {
                        targets.push(found);
                    }
                }
                targets
            }
            ImportKind::RelativeImport {
                level,
                module,
                names,
            } => self.resolve_relative(&raw.source_file, *level, module.as_deref(), names),
            _ => vec![],
        }
    }
}
