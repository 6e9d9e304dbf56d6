//! Supporting helpers: message prefixes, relative paths, logging bootstrap.

use owo_colors::OwoColorize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "SCAFFOLD_PRUNE_LOG";

fn colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// `path` relative to `root` when it lives below it, otherwise as given.
pub fn rel_to(root: &Path, path: &Path) -> String {
    match pathdiff::diff_paths(path, root) {
        Some(rel) if !rel.starts_with("..") && !rel.as_os_str().is_empty() => {
            rel.to_string_lossy().to_string()
        }
        _ => path.to_string_lossy().to_string(),
    }
}

/// Install the stderr `tracing` subscriber.
///
/// `SCAFFOLD_PRUNE_LOG` wins when set; otherwise verbosity picks
/// `warn`, `info` or `debug`.
pub fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
