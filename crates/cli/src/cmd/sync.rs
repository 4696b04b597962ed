use std::path::Path;

use super::{load_config, open_repo};
use crate::SyncArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &SyncArgs) {
    let rc = load_config("sync", config, profile);
    let mut repo = open_repo("sync", &rc);

    let current = match repo.read_unchecked(&args.template) {
        Ok(t) => t,
        Err(e) => {
            println!("FAIL mtag sync");
            println!("{e}");
            super::exit(1);
        }
    };

    match repo.save(&args.template, current.subject.as_deref(), &current.body) {
        Ok(saved) => {
            println!("OK   mtag sync");
            println!("template: {}", saved.logical_name);
            for def in &saved.definitions {
                let mut line = format!("  {} ({})", def.key, def.var_type);
                if def.is_required {
                    line.push_str(" required");
                }
                if let Some(ref fb) = def.fallback_value {
                    line.push_str(&format!(" fallback={fb}"));
                }
                println!("{line}");
            }
            println!("-- {} variables --", saved.definitions.len());
        }
        Err(e) => {
            println!("FAIL mtag sync");
            println!("{e}");
            super::exit(1);
        }
    }
}
