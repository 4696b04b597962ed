//! Log setup for `mtag`.
//!
//! Events from `mergetag_core` and from this binary are filtered at the
//! configured level; everything else only shows warnings. `MTAG_LOG` replaces
//! the directives entirely (same syntax as `RUST_LOG`).

use mergetag_core::config::types::ResolvedConfig;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const ENV_VAR: &str = "MTAG_LOG";

static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

pub fn init(cfg: &ResolvedConfig, command: &str) {
    let level = parse_level(&cfg.logging.level).unwrap_or(LevelFilter::INFO);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter_for(level));

    let registry = tracing_subscriber::registry().with(stderr_layer);

    match cfg.logging.file {
        Some(ref path) => {
            let file_level = cfg
                .logging
                .file_level
                .as_deref()
                .and_then(parse_level)
                .unwrap_or(level);

            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            // Appended, so the file keeps a history of renders across runs
            let file =
                OpenOptions::new().create(true).append(true).open(path).unwrap_or_else(|e| {
                    eprintln!("Failed to open log file {}: {}", path.display(), e);
                    std::process::exit(1);
                });

            let (writer, guard) = tracing_appender::non_blocking(file);
            if let Ok(mut g) = LOG_GUARD.lock() {
                *g = Some(guard);
            }

            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_line_number(true)
                .with_filter(filter_for(file_level));

            let _ = registry.with(file_layer).try_init();
        }
        None => {
            let _ = registry.try_init();
        }
    }

    tracing::debug!(
        command,
        profile = %cfg.active_profile,
        templates_dir = %cfg.templates_dir.display(),
        "mtag started"
    );
}

/// Drain buffered file output. Call before the process exits.
pub fn flush() {
    if let Ok(mut g) = LOG_GUARD.lock() {
        g.take();
    }
}

fn filter_for(level: LevelFilter) -> EnvFilter {
    match std::env::var(ENV_VAR) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(directives),
        _ => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(directives_for(level)),
    }
}

fn directives_for(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    format!("mergetag_core={level},mtag={level}")
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
