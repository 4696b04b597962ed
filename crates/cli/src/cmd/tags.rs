use std::fs;
use std::path::Path;

use mergetag_core::templates::detect_tags;

use super::{load_config, open_repo};
use crate::TagsArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &TagsArgs) {
    let content = if let Some(ref file) = args.file {
        match fs::read_to_string(file) {
            Ok(s) => s,
            Err(e) => {
                println!("FAIL mtag tags");
                println!("failed to read {}: {e}", file.display());
                super::exit(1);
            }
        }
    } else if let Some(ref name) = args.template {
        let rc = load_config("tags", config, profile);
        let repo = open_repo("tags", &rc);
        match repo.read_unchecked(name) {
            Ok(t) => match t.subject {
                Some(subject) => format!("{subject}\n{}", t.body),
                None => t.body,
            },
            Err(e) => {
                println!("FAIL mtag tags");
                println!("{e}");
                super::exit(1);
            }
        }
    } else {
        eprintln!("Error: provide --template or --file");
        super::exit(2);
    };

    for key in detect_tags(&content) {
        println!("{key}");
    }
}
