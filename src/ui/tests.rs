use super::*;
use crate::catalog::default_tracks;
use crate::visualizer::Visualizer;
use ratatui::{Terminal, backend::TestBackend};

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(usize::from(buffer.area.width))
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn format_time_floors_to_whole_seconds() {
    assert_eq!(format_time(Duration::ZERO), "0:00");
    assert_eq!(format_time(Duration::from_millis(59_999)), "0:59");
    assert_eq!(format_time(Duration::from_secs(201)), "3:21");
    assert_eq!(format_time(Duration::from_secs(3_600)), "60:00");
}

#[test]
fn controls_text_includes_seek_step() {
    let text = controls_text(7);
    assert!(text.starts_with("[space/p] play/pause"));
    assert!(text.contains("[H/L] seek -/+7s"));
    assert!(text.ends_with("[q] quit"));
}

#[test]
fn layout_stacks_sections_top_to_bottom() {
    let area = Rect::new(0, 0, 80, 30);
    let l = layout(area, true);

    assert_eq!(l.header.y, 0);
    assert!(l.status.y > l.header.y);
    assert!(l.tracks.y > l.status.y);
    assert!(l.progress.y > l.tracks.y);
    assert!(l.footer.y > l.progress.y);
    assert_eq!(l.progress.height, 3);

    let viz = l.visualizer.unwrap();
    assert_eq!(viz.y, l.tracks.y);
    assert_eq!(viz.x, l.tracks.x + l.tracks.width);
}

#[test]
fn layout_without_visualizer_gives_list_full_width() {
    let l = layout(Rect::new(0, 0, 80, 30), false);
    assert!(l.visualizer.is_none());
    assert_eq!(l.tracks.width, 80);
}

#[test]
fn centered_rect_stays_inside_parent() {
    let parent = Rect::new(10, 5, 40, 12);
    let r = centered_rect_sized(72, 8, parent);
    assert!(r.x >= parent.x && r.right() <= parent.right());
    assert!(r.y >= parent.y && r.bottom() <= parent.bottom());
}

#[test]
fn draw_renders_tracks_and_progress_label() {
    let catalog = Catalog::new(default_tracks()).unwrap();
    let app = App::new(catalog.len(), Visualizer::new(Duration::from_millis(400)));
    let state = PlayerState {
        current_index: 2,
        current_time: Duration::from_secs(65),
        duration: Duration::from_secs(156),
        ..PlayerState::default()
    };

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal
        .draw(|f| {
            draw(
                f,
                &app,
                &state,
                &catalog,
                &UiSettings::default(),
                &ControlsSettings::default(),
            )
        })
        .unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("Berubah"));
    assert!(text.contains("Bintang 5"));
    assert!(text.contains("SO ASU • NayKilla [E]"));
    assert!(text.contains("Paused"));
    assert!(text.contains("1:05 / 2:36"));
}

#[test]
fn details_popup_shows_audio_url() {
    let catalog = Catalog::new(default_tracks()).unwrap();
    let mut app = App::new(catalog.len(), Visualizer::new(Duration::from_millis(400)));
    app.toggle_details_window();

    let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
    terminal
        .draw(|f| {
            draw(
                f,
                &app,
                &PlayerState::default(),
                &catalog,
                &UiSettings::default(),
                &ControlsSettings::default(),
            )
        })
        .unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("Audio: /music/berubah.mp3"));
}
