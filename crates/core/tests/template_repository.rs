use insta::assert_snapshot;
use mergetag_core::RenderError;
use mergetag_core::templates::{Renderer, TemplateRepoError, TemplateRepository, render_template};
use mergetag_core::vars::{VarValues, VariableDefinition, VariableType, VariableValue};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn order_template(root: &Path) {
    write(
        &root.join("orders").join("confirmation.html"),
        r#"---
subject: "Order {{ORDER_ID}} confirmed"
variables:
  - key: ORDER_ID
    type: string
    isRequired: true
  - key: TOTAL
    type: number
  - key: NAME
    fallbackValue: customer
---
<p>Thanks {{NAME}}! Order {{ORDER_ID}} totals {{TOTAL}}.</p>
"#,
    );
}

#[test]
fn loads_template_with_definitions() {
    let tmp = tempdir().unwrap();
    order_template(tmp.path());

    let repo = TemplateRepository::new(tmp.path()).unwrap();
    let tpl = repo.get_by_name("orders/confirmation").unwrap();

    assert_eq!(tpl.subject.as_deref(), Some("Order {{ORDER_ID}} confirmed"));
    assert_eq!(tpl.definitions.len(), 3);
    assert_eq!(tpl.definitions[1].var_type, VariableType::Number);
    assert!(tpl.body.starts_with("<p>Thanks"));
}

#[test]
fn renders_subject_and_body() {
    let tmp = tempdir().unwrap();
    order_template(tmp.path());
    let repo = TemplateRepository::new(tmp.path()).unwrap();

    let mut values = VarValues::new();
    values.insert("ORDER_ID".into(), VariableValue::from("A-77"));
    values.insert("TOTAL".into(), VariableValue::from(19.5));

    let email =
        render_template(&repo, &Renderer::default(), "orders/confirmation", &values).unwrap();
    assert_eq!(email.subject.as_deref(), Some("Order A-77 confirmed"));
    assert_snapshot!(email.html, @"<p>Thanks customer! Order A-77 totals 19.5.</p>");
}

#[test]
fn unknown_template_is_not_found() {
    let tmp = tempdir().unwrap();
    order_template(tmp.path());
    let repo = TemplateRepository::new(tmp.path()).unwrap();

    let err = render_template(&repo, &Renderer::default(), "nope", &VarValues::new())
        .unwrap_err();
    assert_eq!(err, RenderError::TemplateNotFound { template_name: "nope".into() });
    assert_eq!(err.status_code(), 404);
}

#[test]
fn required_missing_surfaces_from_store_render() {
    let tmp = tempdir().unwrap();
    order_template(tmp.path());
    let repo = TemplateRepository::new(tmp.path()).unwrap();

    let err = render_template(&repo, &Renderer::default(), "orders/confirmation", &VarValues::new())
        .unwrap_err();
    assert_eq!(err, RenderError::RequiredVariableMissing { variable_name: "ORDER_ID".into() });
}

#[test]
fn invalid_definitions_are_rejected_on_load() {
    let tmp = tempdir().unwrap();
    write(
        &tmp.path().join("bad.html"),
        "---\nvariables:\n  - key: CODE\n    isRequired: true\n    fallbackValue: X\n---\n{{CODE}}",
    );
    let repo = TemplateRepository::new(tmp.path()).unwrap();

    let err = repo.get_by_name("bad").unwrap_err();
    assert!(matches!(err, TemplateRepoError::InvalidDefinitions { .. }), "got {err:?}");

    let err: RenderError = err.into();
    assert_eq!(err.status_code(), 500);
}

#[test]
fn save_replaces_definitions_wholesale() {
    let tmp = tempdir().unwrap();
    order_template(tmp.path());
    let mut repo = TemplateRepository::new(tmp.path()).unwrap();

    let saved = repo
        .save(
            "orders/confirmation",
            Some("Order {{ORDER_ID}}"),
            "<p>{{ORDER_ID}} for {{EMAIL}}</p>\n",
        )
        .unwrap();

    assert_eq!(
        saved.definitions,
        vec![
            VariableDefinition::new("ORDER_ID").required(),
            VariableDefinition::new("EMAIL"),
        ]
    );

    let reloaded = repo.get_by_name("orders/confirmation").unwrap();
    assert_eq!(reloaded.definitions, saved.definitions);
    assert_eq!(reloaded.body, "<p>{{ORDER_ID}} for {{EMAIL}}</p>\n");
}

#[test]
fn save_creates_new_template() {
    let tmp = tempdir().unwrap();
    let mut repo = TemplateRepository::new(tmp.path()).unwrap();
    assert!(repo.list_all().is_empty());

    repo.save("welcome", None, "<p>Hi {{NAME}}</p>").unwrap();

    assert_eq!(repo.list_all().len(), 1);
    let content = fs::read_to_string(tmp.path().join("welcome.html")).unwrap();
    assert_snapshot!(content, @r"
    ---
    variables:
    - key: NAME
      type: string
      isRequired: false
    ---
    <p>Hi {{NAME}}</p>
    ");
}

#[test]
fn save_rewrites_htm_template_in_place() {
    let tmp = tempdir().unwrap();
    write(
        &tmp.path().join("legacy.htm"),
        "---\nvariables:\n  - key: OLD\n---\n<p>{{OLD}}</p>",
    );
    let mut repo = TemplateRepository::new(tmp.path()).unwrap();

    let saved = repo.save("legacy", None, "<p>{{NEW}}</p>").unwrap();
    assert_eq!(saved.path, tmp.path().join("legacy.htm"));

    let listed: Vec<_> = repo.list_all().iter().map(|t| t.path.clone()).collect();
    assert_eq!(listed, vec![tmp.path().join("legacy.htm")]);
    assert!(!tmp.path().join("legacy.html").exists());

    let reloaded = repo.get_by_name("legacy").unwrap();
    assert_eq!(reloaded.definitions, vec![VariableDefinition::new("NEW")]);
}

#[test]
fn save_rejects_names_outside_the_store() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("templates");
    fs::create_dir_all(&root).unwrap();
    let mut repo = TemplateRepository::new(&root).unwrap();

    for name in ["../escaped", "/abs/welcome", "orders/../../x", "./welcome", "a//b", ""] {
        let err = repo.save(name, None, "<p>x</p>").unwrap_err();
        assert!(matches!(err, TemplateRepoError::InvalidName(_)), "{name}: got {err:?}");
    }

    assert!(!tmp.path().join("escaped.html").exists());
    assert!(repo.list_all().is_empty());
}
