//! Logging setup
//!
//! The terminal front-end owns stdout and stderr, so log output only goes to
//! a file: the `log_file` setting, else `$QUILL_LOG`. With neither set no
//! subscriber is installed and `tracing` macros are no-ops. The level filter
//! comes from `RUST_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{EditorError, Result};

/// Log file to write to, if any. `env` looks up an environment variable.
pub fn log_path(config: &Config, env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    config
        .get_string("log_file")
        .map(str::to_string)
        .or_else(|| env("QUILL_LOG"))
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Install the global subscriber. Returns false when logging is disabled.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = log_path(config, |name| std::env::var(name).ok()) else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| EditorError::io(&path, e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedders) keeps the first subscriber
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok();
    Ok(installed)
}
