//! Integration tests for `mtag check` and `mtag sync`.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write(dir: &Path, rel: &str, content: impl AsRef<str>) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content.as_ref()).unwrap();
}

fn mtag(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mtag"));
    cmd.arg("--config").arg(root.join("config.toml"));
    cmd
}

fn setup(root: &Path) {
    write(root, "config.toml", "version = 1\n[profiles.default]\ntemplates_dir = \"templates\"\n");
    write(
        root,
        "templates/good.html",
        "---\nvariables:\n  - key: NAME\n    fallbackValue: there\n---\n<p>Hi {{NAME}} {{CITY}}</p>",
    );
    write(
        root,
        "templates/bad.html",
        "---\nvariables:\n  - key: CODE\n    isRequired: true\n    fallbackValue: X\n  - key: code\n---\n{{CODE}}",
    );
}

#[test]
fn check_reports_errors_and_warnings() {
    let tmp = tempdir().unwrap();
    setup(tmp.path());

    mtag(tmp.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL bad"))
        .stdout(predicate::str::contains(
            "error: variable 'CODE' is required and cannot have a fallback value",
        ))
        .stdout(predicate::str::contains("error: invalid variable key 'code'"))
        .stdout(predicate::str::contains("OK   good"))
        .stdout(predicate::str::contains("warning: merge tag '{{CITY}}' has no declaration"))
        .stdout(predicate::str::contains("-- 2 checked, 1 failed --"));
}

#[test]
fn check_single_template_ok() {
    let tmp = tempdir().unwrap();
    setup(tmp.path());

    mtag(tmp.path())
        .args(["check", "--template", "good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-- 1 checked, 0 failed --"));
}

#[test]
fn sync_declares_every_tag_and_keeps_existing() {
    let tmp = tempdir().unwrap();
    setup(tmp.path());

    mtag(tmp.path())
        .args(["sync", "--template", "good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   mtag sync"))
        .stdout(predicate::str::contains("NAME (string) fallback=there"))
        .stdout(predicate::str::contains("CITY (string)"))
        .stdout(predicate::str::contains("-- 2 variables --"));

    let content = fs::read_to_string(tmp.path().join("templates/good.html")).unwrap();
    assert!(content.contains("key: CITY"));
    assert!(content.ends_with("<p>Hi {{NAME}} {{CITY}}</p>"));

    // Now fully declared: no warnings left
    mtag(tmp.path())
        .args(["check", "--template", "good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning").not());
}

#[test]
fn sync_unknown_template_fails() {
    let tmp = tempdir().unwrap();
    setup(tmp.path());

    mtag(tmp.path())
        .args(["sync", "--template", "missing"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("template not found: missing"));
}
