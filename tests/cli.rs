//! Command-line tests for the astview binary

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn astview() -> Command {
    let mut cmd = cargo_bin_cmd!("astview");
    cmd.env_remove("ASTVIEW_LOG");
    cmd
}

fn source_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write source");
    file
}

#[test]
fn test_sample_prints_builtin_source() {
    astview()
        .args(["sample", "python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("def fibonacci(n):"));
}

#[test]
fn test_sample_rejects_unknown_language() {
    astview()
        .args(["sample", "cobol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cobol"));
}

#[test]
fn test_analyze_json() {
    let file = source_file(".py", "x = 1\n");
    astview()
        .arg("analyze")
        .arg(file.path())
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "module""#))
        .stdout(predicate::str::contains(r#""target": "x""#));
}

#[test]
fn test_analyze_defaults_to_outline() {
    let file = source_file(".py", "def add(a, b):\n    return a\n");
    astview()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("▾ [module]"))
        .stdout(predicate::str::contains("[function-definition] add"));
}

#[test]
fn test_analyze_treeviz_from_stdin() {
    astview()
        .args(["analyze", "-", "--format", "treeviz", "--language", "python"])
        .write_stdin("x = 1\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("└─ module"));
}

#[test]
fn test_analyze_unknown_format_fails() {
    let file = source_file(".py", "x = 1\n");
    astview()
        .arg("analyze")
        .arg(file.path())
        .args(["--format", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format 'bogus' not found"));
}

#[test]
fn test_analyze_c_is_unsupported() {
    let file = source_file(".c", "int main(void) { return 0; }\n");
    astview()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "C AST parsing is not yet implemented",
        ));
}

#[test]
fn test_analyze_javascript_without_parser() {
    let file = source_file(".js", "console.log(1);\n");
    astview()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parser"));
}

#[test]
fn test_analyze_empty_file() {
    let file = source_file(".py", "   \n");
    astview()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter some code"));
}

#[test]
fn test_config_file_selects_language() {
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    writeln!(config, "[analysis]\ndefault_language = \"c\"").expect("write config");

    astview()
        .args(["analyze", "-", "--config"])
        .arg(config.path())
        .write_stdin("x = 1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("C AST parsing"));
}

#[test]
fn test_list_formats() {
    astview()
        .arg("list-formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("outline"))
        .stdout(predicate::str::contains("treeviz"))
        .stdout(predicate::str::contains("yaml"));
}

#[test]
fn test_sample_accepts_language_alias() {
    astview()
        .args(["sample", "py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("def fibonacci(n):"));
}
