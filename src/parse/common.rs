use std::path::PathBuf;

/// Raw import extracted from a single source file.
#[derive(Debug, Clone)]
pub struct RawImport {
    /// The import specifier as written in source
    pub raw_path: String,
    /// The source file containing the import
    pub source_file: PathBuf,
    /// Line number of the import statement (1-indexed)
    pub line: usize,
    /// Classification of the import
    pub kind: ImportKind,
    /// Parser confidence
    pub confidence: ImportConfidence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    /// `import foo` / `require "foo"` / `import x from "foo"` / `require("foo")`
    Direct,
    /// `from foo import bar` (Python)
    FromImport { module: String, names: Vec<String> },
    /// `from . import foo` (Python)
    RelativeImport {
        level: usize,
        module: Option<String>,
        names: Vec<String>,
    },
    /// `require_relative "./foo"` (Ruby)
    RequireRelative,
    /// `autoload :Foo, "path"` (Ruby)
    Autoload,
    /// `mod foo;` (Rust)
    ModDeclaration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportConfidence {
    /// Candidate for project-local resolution
    Resolved,
    /// Likely external (third-party / stdlib)
    External,
    /// Contains dynamic component, unresolvable
    Dynamic,
}

impl RawImport {
    /// Whether resolution should be attempted at all.
    pub fn is_resolvable(&self) -> bool {
        self.confidence == ImportConfidence::Resolved
    }
}
