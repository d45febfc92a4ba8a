use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::app::App;
use crate::config;
use crate::player::{MediaBinding, Notification, PlayerController};
use crate::ui::{self, UiLayout};

/// Main terminal event loop: applies media notifications, animates the
/// visualizer, draws, and handles input. Returns `Ok(())` when the user quits.
pub fn run<B: MediaBinding>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlayerController<B>,
    notifications: &Receiver<Notification>,
    play_states: &Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(notification) = notifications.try_recv() {
            player.apply(notification);
        }

        let now = Instant::now();
        while let Ok(playing) = play_states.try_recv() {
            app.visualizer.set_playing(playing, now);
        }
        app.visualizer.tick(now);

        let state = player.snapshot();
        app.follow_current(state.current_index);

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                &state,
                player.catalog(),
                &settings.ui,
                &settings.controls,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app, player) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let areas = ui::layout(
                        Rect::new(0, 0, size.width, size.height),
                        settings.ui.show_visualizer,
                    );
                    handle_mouse_event(mouse, &areas, app, player);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the user asked to quit.
pub(super) fn handle_key_event<B: MediaBinding>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlayerController<B>,
) -> bool {
    let seek_step = i64::try_from(settings.controls.seek_step_seconds).unwrap_or(i64::MAX);

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => player.toggle_play_pause(),
        KeyCode::Char('l') => player.next(),
        KeyCode::Char('h') => player.previous(),
        KeyCode::Char('L') => player.seek_by(seek_step),
        KeyCode::Char('H') => player.seek_by(-seek_step),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('K') => app.toggle_details_window(),
        KeyCode::Enter => player.select_track(app.cursor),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                // Out-of-range numbers are dropped by the controller.
                player.select_track(digit as usize - 1);
            }
        }
        _ => {}
    }

    false
}

/// Scrub on the progress bar, select on the track list.
pub(super) fn handle_mouse_event<B: MediaBinding>(
    mouse: MouseEvent,
    areas: &UiLayout,
    app: &mut App,
    player: &mut PlayerController<B>,
) {
    let duration = player.snapshot().duration;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(time) = App::position_at(areas.progress, mouse.column, mouse.row, duration)
            {
                app.dragging = true;
                player.begin_scrub();
                player.scrub_to(time);
            } else if let Some(index) = app.track_at(areas.tracks, mouse.column, mouse.row) {
                app.cursor = index;
                player.select_track(index);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if app.dragging => {
            player.scrub_to(App::position_along(areas.progress, mouse.column, duration));
        }
        MouseEventKind::Up(MouseButton::Left) if app.dragging => {
            app.dragging = false;
            player.end_scrub(App::position_along(areas.progress, mouse.column, duration));
        }
        _ => {}
    }
}
