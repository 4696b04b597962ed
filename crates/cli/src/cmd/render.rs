use std::fs;
use std::path::Path;

use mergetag_core::RenderError;
use mergetag_core::templates::{Renderer, render_template};
use mergetag_core::vars::{VarValues, VariableValue};
use tracing::{debug, info};

use super::{load_config, open_repo};
use crate::RenderArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &RenderArgs) {
    let rc = load_config("render", config, profile);

    let values = match collect_values(args.vars.as_deref(), &args.var) {
        Ok(v) => v,
        Err(msg) => {
            println!("FAIL mtag render");
            println!("{msg}");
            super::exit(1);
        }
    };
    debug!("collected {} values", values.len());

    let repo = open_repo("render", &rc);
    let renderer = Renderer::new(rc.render.clone());

    let email = match render_template(&repo, &renderer, &args.template, &values) {
        Ok(email) => email,
        Err(e) => fail(&e, args.json),
    };
    info!("rendered template '{}'", email.template_name);

    if args.json {
        match serde_json::to_string_pretty(&email) {
            Ok(s) => println!("{s}"),
            Err(e) => fail(&RenderError::wrap_unexpected(e), true),
        }
        return;
    }

    match args.output {
        Some(ref out) => {
            if let Err(e) = fs::write(out, &email.html) {
                println!("FAIL mtag render");
                println!("failed to write {}: {e}", out.display());
                super::exit(1);
            }
            println!("OK   mtag render");
            println!("template: {}", email.template_name);
            if let Some(ref subject) = email.subject {
                println!("subject: {subject}");
            }
            println!("output: {}", out.display());
        }
        None => {
            // stdout carries only the HTML so it can be piped
            if let Some(ref subject) = email.subject {
                eprintln!("subject: {subject}");
            }
            print!("{}", email.html);
        }
    }
}

fn fail(err: &RenderError, json: bool) -> ! {
    if json {
        let body = serde_json::to_string_pretty(&err.to_body())
            .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", err.kind()));
        println!("{body}");
    } else {
        println!("FAIL mtag render");
        println!("{err}");
        println!("status: {}", err.status_code());
    }
    super::exit(1);
}

/// Merge values from a JSON file with `KEY=VALUE` overrides.
fn collect_values(vars_file: Option<&Path>, overrides: &[String]) -> Result<VarValues, String> {
    let mut values = VarValues::new();

    if let Some(path) = vars_file {
        let s = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        values = serde_json::from_str(&s).map_err(|e| {
            format!("{} must contain a JSON object of values: {e}", path.display())
        })?;
    }

    for kv in overrides {
        let (key, value) = kv
            .split_once('=')
            .ok_or_else(|| format!("invalid --var '{kv}', expected KEY=VALUE"))?;
        values.insert(key.trim().to_string(), VariableValue::from(value));
    }

    Ok(values)
}
