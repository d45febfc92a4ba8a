//! One-shot subcommands that do not open the player UI.

use std::process::ExitCode;

use tracing::{error, info, warn};

use crate::fetch;
use crate::logging;

use super::settings::load_settings;

/// `onrepeat fetch`
pub fn fetch_music() -> ExitCode {
    let (settings, warning) = load_settings();
    logging::init_stderr(&settings.log);
    if let Some(msg) = warning {
        warn!("{msg}");
    }

    match fetch::run(&settings) {
        Ok(report) => {
            info!(
                downloaded = report.downloaded.len(),
                skipped = report.skipped.len(),
                "all downloads complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// `onrepeat config`
pub fn print_config() -> ExitCode {
    let (settings, warning) = load_settings();
    if let Some(msg) = warning {
        eprintln!("onrepeat: {msg}");
    }

    match toml::to_string_pretty(&settings) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("onrepeat: cannot render config: {e}");
            ExitCode::FAILURE
        }
    }
}
