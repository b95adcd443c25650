pub mod alias;
pub mod common;
pub mod factory;
pub mod python;
pub mod resolver;
pub mod ruby;
pub mod rust;
pub mod typescript;

pub use common::{ImportConfidence, ImportKind, RawImport};
pub use factory::FrontendSet;

use crate::walk::Language;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Parser frontend trait: each language implements this.
pub trait ParseFrontend: Send + Sync {
    /// The language whose extensions this frontend owns.
    fn language(&self) -> Language;

    /// Extract raw imports from a single file's source bytes.
    ///
    /// Unparsable constructs are skipped, never reported.
    fn extract_imports(&self, source: &[u8], file_path: &Path) -> Vec<RawImport>;

    /// Resolve a raw import to the project files it references.
    /// Returns an empty list if the import is external or dangling.
    fn resolve(&self, raw: &RawImport) -> Vec<PathBuf>;

    /// Whether this frontend owns `path` by extension.
    fn supports_file(&self, path: &Path) -> bool {
        Language::from_path(path) == Some(self.language())
    }

    /// Extract and resolve in one pass, dropping everything that does not land on disk.
    fn extract(&self, source: &[u8], file_path: &Path) -> BTreeSet<PathBuf> {
        let mut resolved = BTreeSet::new();
        for raw in self.extract_imports(source, file_path) {
            if !raw.is_resolvable() {
                tracing::trace!(
                    "{}:{}: skipping {:?} import {}",
                    file_path.display(),
                    raw.line,
                    raw.confidence,
                    raw.raw_path
                );
                continue;
            }
            let targets = self.resolve(&raw);
            if targets.is_empty() {
                tracing::trace!(
                    "{}:{}: unresolved import {}",
                    file_path.display(),
                    raw.line,
                    raw.raw_path
                );
            }
            resolved.extend(targets);
        }
        resolved
    }
}

/// Parse `source` with `grammar`, or `None` if the grammar cannot be loaded or parsing gives up.
pub(crate) fn parse_tree(
    grammar: tree_sitter::Language,
    source: &[u8],
    file_path: &Path,
) -> Option<tree_sitter::Tree> {
    let mut parser = tree_sitter::Parser::new();
    if let Err(e) = parser.set_language(&grammar) {
        tracing::warn!("Grammar unavailable for {}: {}", file_path.display(), e);
        return None;
    }
    parser.parse(source, None)
}

pub(crate) fn node_text<'a>(node: tree_sitter::Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

/// Directory containing `file_path`, the anchor for relative references.
pub(crate) fn source_dir(file_path: &Path) -> PathBuf {
    file_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
