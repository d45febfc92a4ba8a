//! `tracing` subscriber setup.
//!
//! The player owns the terminal, so it logs to a file. One-shot commands
//! such as `fetch` log to stderr. `RUST_LOG` overrides `log.filter`.

use std::env;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

fn env_filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter))
}

/// Log to stderr.
pub fn init_stderr(settings: &LogSettings) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to `log.file` (or the default state-directory file). Returns the path in use.
pub fn init_file(settings: &LogSettings) -> io::Result<PathBuf> {
    let path = settings.file.clone().unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(path)
}

/// `$XDG_STATE_HOME/onrepeat/onrepeat.log`, then `~/.local/state/...`,
/// then the system temp directory.
pub fn default_log_path() -> PathBuf {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("state")
    } else {
        env::temp_dir()
    };

    state_home.join("onrepeat").join("onrepeat.log")
}
