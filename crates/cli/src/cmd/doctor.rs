use mergetag_core::config::loader::{ConfigLoader, default_config_path};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            println!("OK   mtag doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("templates_dir: {}", rc.templates_dir.display());
            println!("templates_dir exists: {}", rc.templates_dir.is_dir());
            println!("date_format: {}", rc.render.date_format);
            println!("logging.level: {}", rc.logging.level);
            if let Some(ref file) = rc.logging.file {
                println!("logging.file: {}", file.display());
            }
            crate::logging::init(&rc, "doctor");
            tracing::debug!(
                "doctor finished for profile {} (mergetag-core {})",
                rc.active_profile,
                mergetag_core::version()
            );
        }
        Err(e) => {
            println!("FAIL mtag doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
