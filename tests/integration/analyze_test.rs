use super::fixture_path;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

fn analyze_json(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("deptrail")
        .unwrap()
        .arg("analyze")
        .args(args)
        .args(["--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn fixture_arg(rel: &str) -> String {
    fixture_path(rel).to_string_lossy().into_owned()
}

#[test]
fn analyze_python_file_json() {
    let value = analyze_json(&[&fixture_arg("python/simple_project/app/main.py"), "--relative"]);
    assert_eq!(
        value,
        json!({
            "dependencies": {
                "app/main.py": [
                    "app/models/__init__.py",
                    "app/models/user.py",
                    "utils/helpers.py"
                ]
            }
        })
    );
}

#[test]
fn analyze_python_file_paths_are_absolute_by_default() {
    let value = analyze_json(&[&fixture_arg("python/simple_project/app/main.py")]);
    let root = fixture_path("python/simple_project").canonicalize().unwrap();
    let key = root.join("app/main.py").to_string_lossy().into_owned();
    let deps = value["dependencies"][key.as_str()].as_array().unwrap();
    assert_eq!(deps.len(), 3);
    assert_eq!(deps[2], root.join("utils/helpers.py").to_string_lossy().as_ref());
}

#[test]
fn analyze_ruby_directory_with_cycles() {
    let value = analyze_json(&[&fixture_arg("ruby/simple_gem"), "--relative", "--cycles"]);
    assert_eq!(
        value,
        json!({
            "dependencies": {
                "bin/run.rb": ["lib/greeter.rb", "lib/greeter/formatter.rb"],
                "lib/greeter.rb": ["lib/greeter/formatter.rb"],
                "lib/greeter/formatter.rb": ["lib/greeter.rb"]
            },
            "cycles": [["lib/greeter/formatter.rb", "lib/greeter.rb"]]
        })
    );
}

#[test]
fn analyze_typescript_aliases() {
    let value = analyze_json(&[&fixture_arg("typescript/aliases/src/index.ts"), "--relative"]);
    assert_eq!(
        value["dependencies"]["src/index.ts"],
        json!([
            "src/components/Button.tsx",
            "src/utils/classnames.js",
            "src/utils/index.ts"
        ])
    );
}

#[test]
fn analyze_typescript_directory_scans_src() {
    let value = analyze_json(&[&fixture_arg("typescript/aliases"), "--relative"]);
    let deps = value["dependencies"].as_object().unwrap();
    let mut keys: Vec<&str> = deps.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "src/components/Button.tsx",
            "src/index.ts",
            "src/utils/classnames.js",
            "src/utils/index.ts"
        ]
    );
    assert_eq!(deps["src/utils/index.ts"], json!(["src/utils/classnames.js"]));
    assert_eq!(deps["src/utils/classnames.js"], json!([]));
}

#[test]
fn analyze_rust_crate_file() {
    let value = analyze_json(&[&fixture_arg("rust/simple_crate/src/lib.rs"), "--relative"]);
    assert_eq!(
        value["dependencies"]["src/lib.rs"],
        json!(["src/net/mod.rs", "src/net/client.rs", "src/parser.rs"])
    );
}

#[test]
fn analyze_rust_own_crate_imports() {
    let value = analyze_json(&[&fixture_arg("rust/simple_crate/src/main.rs"), "--relative"]);
    assert_eq!(
        value["dependencies"]["src/main.rs"],
        json!(["src/net/client.rs", "src/net/mod.rs"])
    );
}

#[test]
fn analyze_text_format() {
    Command::cargo_bin("deptrail")
        .unwrap()
        .args([
            "analyze",
            &fixture_arg("ruby/simple_gem/bin/run.rb"),
            "--format",
            "text",
            "--relative",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bin/run.rb\n  -> lib/greeter.rb\n"));
}

#[test]
fn analyze_unsupported_file_is_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let notes = tmp.path().join("notes.md");
    std::fs::write(&notes, "import os\n").unwrap();
    let value = analyze_json(&[notes.to_str().unwrap()]);
    assert_eq!(value, json!({"dependencies": {}}));
}

#[test]
fn analyze_missing_path_fails() {
    Command::cargo_bin("deptrail")
        .unwrap()
        .args(["analyze", "tests/fixtures/does/not/exist.py", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No analyzable path"));
}

#[test]
fn analyze_invalid_exclude_glob_fails() {
    Command::cargo_bin("deptrail")
        .unwrap()
        .args([
            "analyze",
            &fixture_arg("python/simple_project"),
            "--exclude",
            "app/{models",
            "--quiet",
        ])
        .assert()
        .failure();
}

#[test]
fn analyze_exclude_glob_drops_keys_not_edges() {
    let value = analyze_json(&[
        &fixture_arg("python/simple_project"),
        "--relative",
        "--exclude",
        "utils/**",
    ]);
    let deps = value["dependencies"].as_object().unwrap();
    assert!(!deps.contains_key("utils/helpers.py"));
    assert_eq!(deps["app/models/user.py"], json!(["utils/helpers.py"]));
}

#[test]
fn graph_dot_output() {
    Command::cargo_bin("deptrail")
        .unwrap()
        .args([
            "graph",
            &fixture_arg("ruby/simple_gem"),
            "--relative",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph dependencies"))
        .stdout(predicate::str::contains(
            "\"lib/greeter.rb\" -> \"lib/greeter/formatter.rb\";",
        ));
}

#[test]
fn graph_json_output() {
    let output = Command::cargo_bin("deptrail")
        .unwrap()
        .args([
            "graph",
            &fixture_arg("typescript/aliases/src/index.ts"),
            "--format",
            "json",
            "--relative",
            "--quiet",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
    assert!(value["edges"]
        .as_array()
        .unwrap()
        .contains(&json!({"from": "src/index.ts", "to": "src/utils/index.ts"})));
}
