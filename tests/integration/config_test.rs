use super::{copy_dir_recursive, fixture_path};
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn analyze(path: &Path, extra: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("deptrail")
        .unwrap()
        .arg("analyze")
        .arg(path)
        .args(extra)
        .arg("--quiet")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn relative_paths_from_config() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), ".deptrail.toml", "[output]\nrelative_paths = true\n");
    write(tmp.path(), "a.py", "import b\n");
    write(tmp.path(), "b.py", "");

    let value = analyze(&tmp.path().join("a.py"), &[]);
    assert_eq!(value, json!({"dependencies": {"a.py": ["b.py"]}}));
}

#[test]
fn python_search_paths_from_config() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        ".deptrail.toml",
        "[python]\nsearch_paths = [\"packages\"]\n",
    );
    write(tmp.path(), "app.py", "import core.util\n");
    write(tmp.path(), "packages/core/__init__.py", "");
    write(tmp.path(), "packages/core/util.py", "");

    let value = analyze(&tmp.path().join("app.py"), &["--relative"]);
    assert_eq!(value["dependencies"]["app.py"], json!(["packages/core/util.py"]));
}

#[test]
fn ruby_load_path_from_config() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        ".deptrail.toml",
        "[ruby]\nload_path = [\"vendor/gems\"]\n",
    );
    write(tmp.path(), "main.rb", "require 'shiny'\nrequire 'config'\n");
    write(tmp.path(), "vendor/gems/shiny.rb", "");
    write(tmp.path(), "lib/config.rb", "");
    write(tmp.path(), "config.rb", "");

    // `lib` is replaced by the configured load path; the root is still probed last
    let value = analyze(&tmp.path().join("main.rb"), &["--relative"]);
    assert_eq!(
        value["dependencies"]["main.rb"],
        json!(["config.rb", "vendor/gems/shiny.rb"])
    );
}

#[test]
fn typescript_config_file_from_config() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        ".deptrail.toml",
        "[typescript]\nconfig_files = [\"tsconfig.app.json\"]\n",
    );
    write(
        tmp.path(),
        "tsconfig.app.json",
        r#"{"compilerOptions": {"baseUrl": "web", "paths": {"~/*": ["*"]}}}"#,
    );
    write(tmp.path(), "tsconfig.json", r#"{"compilerOptions": {"paths": {}}}"#);
    write(tmp.path(), "web/main.ts", "import { db } from '~/db';\n");
    write(tmp.path(), "web/db.ts", "");

    let value = analyze(&tmp.path().join("web/main.ts"), &["--relative"]);
    assert_eq!(value["dependencies"]["web/main.ts"], json!(["web/db.ts"]));
}

#[test]
fn exclude_from_config_and_flag_combine() {
    let fixture = fixture_path("python/simple_project");
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("project");
    std::fs::create_dir_all(&dest).unwrap();
    copy_dir_recursive(&fixture, &dest);
    std::fs::write(
        dest.join(".deptrail.toml"),
        "[defaults]\nexclude = [\"utils/**\"]\n",
    )
    .unwrap();

    let value = analyze(&dest, &["--relative", "--exclude", "app/models/**"]);
    let mut keys: Vec<String> = value["dependencies"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    keys.sort();
    assert_eq!(keys, vec!["app/__init__.py", "app/main.py"]);
}

#[test]
fn invalid_config_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), ".deptrail.toml", "[python\nsearch_paths = 3\n");
    write(tmp.path(), "a.py", "");

    Command::cargo_bin("deptrail")
        .unwrap()
        .args(["analyze", tmp.path().join("a.py").to_str().unwrap(), "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn root_flag_overrides_marker_discovery() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "pkg/pyproject.toml", "");
    write(tmp.path(), "pkg/app.py", "import shared\n");
    write(tmp.path(), "shared.py", "");
    write(tmp.path(), ".deptrail.toml", "");

    // With pkg/ as root, `shared` is not on the search path
    let value = analyze(&tmp.path().join("pkg/app.py"), &["--relative"]);
    assert_eq!(value["dependencies"]["app.py"], json!([]));

    let root = tmp.path().to_str().unwrap();
    let value = analyze(&tmp.path().join("pkg/app.py"), &["--relative", "--root", root]);
    assert_eq!(value["dependencies"]["pkg/app.py"], json!(["shared.py"]));
}
