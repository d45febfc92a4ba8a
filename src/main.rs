use std::env;
use std::process::ExitCode;

mod app;
mod audio;
mod catalog;
mod config;
mod error;
mod fetch;
mod logging;
mod player;
mod runtime;
mod ui;
mod visualizer;

const USAGE: &str = "\
usage: onrepeat [command]

commands:
  (none)    open the player
  fetch     download the playlist's audio files into <asset_root>/music
  config    print the effective configuration as TOML
  help      show this message

configuration: $ONREPEAT_CONFIG_PATH or ~/.config/onrepeat/config.toml,
overridden by ONREPEAT__<SECTION>__<KEY> environment variables";

fn main() -> ExitCode {
    let command = env::args().nth(1);

    match command.as_deref() {
        None => match runtime::run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("onrepeat: {e}");
                ExitCode::FAILURE
            }
        },
        Some("fetch") => runtime::fetch_music(),
        Some("config") => runtime::print_config(),
        Some("help" | "-h" | "--help") => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Some(other) => {
            eprintln!("onrepeat: unknown command `{other}`\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}
