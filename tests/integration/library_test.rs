use super::fixture_path;
use deptrail::{Config, DependencyAnalyzer, DependencyListing};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

fn project() -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    (tmp, root)
}

fn analyzer(root: &Path) -> DependencyAnalyzer {
    DependencyAnalyzer::new(root, Config::default()).unwrap()
}

#[test]
fn fixture_analysis_is_idempotent() {
    for fixture in [
        "python/simple_project",
        "ruby/simple_gem",
        "typescript/aliases",
        "rust/simple_crate",
    ] {
        let root = fixture_path(fixture);
        let mut analyzer = DependencyAnalyzer::for_path(&root, None).unwrap();
        let first = analyzer.analyze_directory().unwrap();
        let second = analyzer.analyze_directory().unwrap();
        assert!(!first.is_empty(), "{fixture}");
        assert_eq!(first, second, "{fixture}");
    }
}

#[test]
fn cycles_terminate_in_every_language() {
    let (_tmp, root) = project();
    let cases = [
        ("a.py", "import b\n", "b.py", "import a\n"),
        ("a.rb", "require_relative 'b'\n", "b.rb", "require_relative 'a'\n"),
        ("a.ts", "import './b';\n", "b.ts", "import './a';\n"),
    ];
    for (a_name, a_src, b_name, b_src) in cases {
        let a = write(&root, a_name, a_src);
        let b = write(&root, b_name, b_src);
        let listing = analyzer(&root).analyze_file(&a).unwrap();
        assert_eq!(listing, DependencyListing::from([(a, vec![b])]), "{a_name}");
    }
}

#[test]
fn rust_module_cycle_terminates() {
    let (_tmp, root) = project();
    let lib = write(&root, "src/lib.rs", "mod a;\nmod b;\n");
    let a = write(&root, "src/a.rs", "use crate::b::Thing;\n");
    let b = write(&root, "src/b.rs", "use crate::a::Other;\n");

    let mut analyzer = analyzer(&root);
    assert_eq!(analyzer.analyze_file(&lib).unwrap()[&lib], vec![a.clone(), b.clone()]);
    assert_eq!(analyzer.analyze_file(&a).unwrap()[&a], vec![b]);
}

#[test]
fn dangling_references_are_excluded() {
    let (_tmp, root) = project();
    let app = write(
        &root,
        "app.ts",
        "import './exists';\nimport './missing';\nimport '@/nowhere';\nimport lodash from 'lodash';\n",
    );
    let exists = write(&root, "exists.tsx", "");
    let listing = analyzer(&root).analyze_file(&app).unwrap();
    assert_eq!(listing[&app], vec![exists]);
}

#[test]
fn transitive_chain_lists_each_file_once() {
    let (_tmp, root) = project();
    let a = write(&root, "lib/a.rb", "require 'b'\nrequire 'c'\n");
    let b = write(&root, "lib/b.rb", "require 'c'\n");
    let c = write(&root, "lib/c.rb", "");
    let listing = analyzer(&root).analyze_file(&a).unwrap();
    assert_eq!(listing[&a], vec![b, c]);
}

#[test]
fn directory_index_conventions() {
    let (_tmp, root) = project();
    let ts = write(&root, "web/app.ts", "import { w } from './widgets';\n");
    let ts_index = write(&root, "web/widgets/index.ts", "");
    let py = write(&root, "py/main.py", "import pkg\n");
    let py_init = write(&root, "py/pkg/__init__.py", "");
    let rs = write(&root, "rs/lib.rs", "mod net;\n");
    let rs_mod = write(&root, "rs/net/mod.rs", "");

    let mut analyzer = analyzer(&root);
    assert_eq!(analyzer.analyze_file(&ts).unwrap()[&ts], vec![ts_index]);
    assert_eq!(analyzer.analyze_file(&py).unwrap()[&py], vec![py_init]);
    assert_eq!(analyzer.analyze_file(&rs).unwrap()[&rs], vec![rs_mod]);
}

#[test]
fn require_relative_ignores_index_files() {
    let (_tmp, root) = project();
    let rb = write(&root, "main.rb", "require_relative 'tools'\n");
    write(&root, "tools/index.rb", "");
    let listing = analyzer(&root).analyze_file(&rb).unwrap();
    assert!(listing[&rb].is_empty());
}

#[test]
fn alias_resolution_picks_first_matching_extension() {
    let (_tmp, root) = project();
    write(
        &root,
        "tsconfig.json",
        r#"{"compilerOptions": {"baseUrl": ".", "paths": {"@/*": ["src/*"]}}}"#,
    );
    let app = write(
        &root,
        "src/app.ts",
        "import Button from '@/widgets/Button';\nimport Gone from '@/widgets/Gone';\n",
    );
    let button_ts = write(&root, "src/widgets/Button.ts", "");
    write(&root, "src/widgets/Button.js", "");

    let listing = analyzer(&root).analyze_file(&app).unwrap();
    assert_eq!(listing[&app], vec![button_ts]);
}

#[test]
fn malformed_tsconfig_disables_aliases_without_failing() {
    let (_tmp, root) = project();
    write(&root, "tsconfig.json", "{ \"compilerOptions\": ");
    let app = write(&root, "src/app.ts", "import x from '@/x';\nimport y from './y';\n");
    let y = write(&root, "src/y.ts", "");
    write(&root, "src/x.ts", "");

    let listing = analyzer(&root).analyze_file(&app).unwrap();
    assert_eq!(listing[&app], vec![y]);
}

#[test]
fn unowned_extensions_never_appear_as_keys() {
    let (_tmp, root) = project();
    let app = write(&root, "app.py", "import data\n");
    write(&root, "README.md", "import app\n");
    write(&root, "data.json", "{}");
    write(&root, "build.go", "package main\n");

    let listing = analyzer(&root).analyze_directory().unwrap();
    assert_eq!(listing, DependencyListing::from([(app, vec![])]));
}

#[cfg(unix)]
#[test]
fn dangling_symlink_is_omitted() {
    let (_tmp, root) = project();
    let broken = write(&root, "broken.py", "");
    std::fs::remove_file(&broken).unwrap();
    std::os::unix::fs::symlink(root.join("nowhere.py"), &broken).unwrap();
    let ok = write(&root, "ok.py", "import broken\n");

    let listing = analyzer(&root).analyze_directory().unwrap();
    assert!(!listing.contains_key(&broken));
    assert!(listing.contains_key(&ok));
}

#[test]
fn mixed_language_project_is_keyed_by_file() {
    let (_tmp, root) = project();
    let ts = write(&root, "web/main.ts", "import { a } from './a';\n");
    let a = write(&root, "web/a.js", "");
    let py = write(&root, "tools/run.py", "from . import helpers\n");
    let helpers = write(&root, "tools/helpers.py", "");

    let listing = analyzer(&root).analyze_directory().unwrap();
    assert_eq!(listing[&ts], vec![a.clone()]);
    assert_eq!(listing[&py], vec![helpers.clone()]);
    assert_eq!(listing[&a], Vec::<PathBuf>::new());
    assert_eq!(listing[&helpers], Vec::<PathBuf>::new());
}
