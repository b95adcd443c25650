use crate::config::Config;
use crate::parse::alias::AliasTable;
use crate::parse::python::PythonFrontend;
use crate::parse::ruby::RubyFrontend;
use crate::parse::rust::RustFrontend;
use crate::parse::typescript::TypeScriptFrontend;
use crate::parse::ParseFrontend;
use crate::walk::Language;
use std::path::Path;

/// One frontend per registered language, configured for a single project root.
///
/// Frontends hold no parser state, so a set can be shared across rayon workers.
pub struct FrontendSet {
    typescript: TypeScriptFrontend,
    python: PythonFrontend,
    ruby: RubyFrontend,
    rust: RustFrontend,
}

impl FrontendSet {
    /// Build every frontend for `root`: alias table, search paths, load paths, crate name.
    pub fn new(root: &Path, config: &Config) -> Self {
        let aliases = AliasTable::load(root, &config.typescript_config_files());
        let rust = match RustFrontend::read_cargo_toml(root) {
            Some(info) => {
                tracing::debug!("Rust crate {} at {}", info.name, info.src_dir.display());
                RustFrontend::with_crate(info)
            }
            None => RustFrontend::new(),
        };

        Self {
            typescript: TypeScriptFrontend::new(aliases),
            python: PythonFrontend::new(config.python_search_paths(root)),
            ruby: RubyFrontend::with_load_paths(config.ruby_load_paths(root)),
            rust,
        }
    }

    pub fn get(&self, lang: Language) -> &dyn ParseFrontend {
        match lang {
            Language::TypeScript => &self.typescript,
            Language::Python => &self.python,
            Language::Ruby => &self.ruby,
            Language::Rust => &self.rust,
        }
    }

    /// The frontend owning `path` by extension, if any.
    pub fn for_path(&self, path: &Path) -> Option<&dyn ParseFrontend> {
        Language::from_path(path).map(|lang| self.get(lang))
    }
}
