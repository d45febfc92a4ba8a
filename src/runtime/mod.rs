use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioBinding;
use crate::catalog::Catalog;
use crate::logging;
use crate::player::PlayerController;
use crate::visualizer::Visualizer;

mod commands;
mod event_loop;
mod settings;

pub use commands::{fetch_music, print_config};

/// Start the player UI and block until the user quits.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warning) = settings::load_settings();

    match logging::init_file(&settings.log) {
        Ok(path) => info!(log = %path.display(), "onrepeat starting"),
        Err(e) => eprintln!("onrepeat: cannot open log file, logging disabled: {e}"),
    }
    if let Some(msg) = warning {
        warn!("{msg}");
    }

    let catalog = Catalog::new(settings.catalog.tracks.clone())?;
    let (binding, notifications) = AudioBinding::spawn(
        settings.audio.asset_root.clone(),
        Duration::from_millis(settings.audio.tick_ms),
    );
    let mut player =
        PlayerController::new(catalog, binding).with_auto_advance(settings.playback.auto_advance);

    // The visualizer only follows play state, which arrives through this channel.
    let (play_tx, play_rx) = mpsc::channel::<bool>();
    player.on_play_state_change(move |playing| {
        let _ = play_tx.send(playing);
    });

    let mut app = App::new(
        player.catalog().len(),
        Visualizer::new(Duration::from_millis(settings.ui.visualizer_interval_ms)),
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut player,
        &notifications,
        &play_rx,
    );

    player.release();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("onrepeat stopped");
    run_result
}
