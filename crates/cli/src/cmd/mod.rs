pub mod check;
pub mod doctor;
pub mod list_templates;
pub mod render;
pub mod sync;
pub mod tags;

use std::path::Path;

use mergetag_core::config::loader::{ConfigLoader, default_config_path};
use mergetag_core::config::types::ResolvedConfig;
use mergetag_core::templates::TemplateRepository;

/// Flush buffered logs, then exit with `code`.
pub fn exit(code: i32) -> ! {
    crate::logging::flush();
    std::process::exit(code)
}

/// Load configuration and start logging, or print a failure and exit.
pub fn load_config(name: &str, config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc, name);
            rc
        }
        Err(e) => {
            println!("FAIL mtag {name}");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            exit(1);
        }
    }
}

/// Open the template store, or print a failure and exit.
pub fn open_repo(name: &str, rc: &ResolvedConfig) -> TemplateRepository {
    match TemplateRepository::new(&rc.templates_dir) {
        Ok(repo) => repo,
        Err(e) => {
            println!("FAIL mtag {name}");
            println!("{e}");
            exit(1);
        }
    }
}
