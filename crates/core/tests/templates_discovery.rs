use mergetag_core::templates::discovery::{TemplateDiscoveryError, discover_templates};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn discovers_only_html_templates() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("tpl");

    let a = root.join("welcome.html");
    let b = root.join("orders").join("shipped.html");
    let c = root.join("legacy.htm");
    let ignored1 = root.join("orders").join("shipped.json");
    let ignored2 = root.join(".draft.html");
    let ignored3 = root.join("notes.txt");

    write(&a, "<p>welcome</p>");
    write(&b, "<p>shipped</p>");
    write(&c, "<p>legacy</p>");
    write(&ignored1, "{}");
    write(&ignored2, "<p>nope</p>");
    write(&ignored3, "nope");

    let got = discover_templates(&root).expect("discover ok");
    let names: Vec<String> = got.into_iter().map(|t| t.logical_name).collect();

    assert_eq!(names, vec!["legacy", "orders/shipped", "welcome"]);
}

#[test]
fn missing_dir_is_an_error() {
    let tmp = tempdir().unwrap();
    let err = discover_templates(&tmp.path().join("absent")).unwrap_err();
    assert!(matches!(err, TemplateDiscoveryError::MissingDir(_)));
}
