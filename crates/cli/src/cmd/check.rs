use std::path::Path;

use mergetag_core::vars::check_template;

use super::{load_config, open_repo};
use crate::CheckArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &CheckArgs) {
    let rc = load_config("check", config, profile);
    let repo = open_repo("check", &rc);

    let names: Vec<String> = match args.template {
        Some(ref name) => vec![name.clone()],
        None => repo.list_all().iter().map(|t| t.logical_name.clone()).collect(),
    };

    let mut failed = 0;
    for name in &names {
        let tpl = match repo.read_unchecked(name) {
            Ok(t) => t,
            Err(e) => {
                println!("FAIL {name}");
                println!("  {e}");
                failed += 1;
                continue;
            }
        };

        let scanned = match tpl.subject {
            Some(ref subject) => format!("{subject}\n{}", tpl.body),
            None => tpl.body.clone(),
        };
        let result = check_template(&scanned, &tpl.definitions);

        if result.valid {
            println!("OK   {name}");
        } else {
            println!("FAIL {name}");
            failed += 1;
        }
        for error in &result.errors {
            println!("  error: {error}");
        }
        for warning in &result.warnings {
            tracing::warn!("{name}: {warning}");
            println!("  warning: {warning}");
        }
    }

    println!("-- {} checked, {} failed --", names.len(), failed);
    if failed > 0 {
        super::exit(1);
    }
}
