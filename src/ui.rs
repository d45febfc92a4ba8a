//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the player using `ratatui`.
//! It only reads: a `PlayerState` snapshot, the catalog and the `App` model.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding,
        Paragraph, Wrap,
    },
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::App;
use crate::catalog::Catalog;
use crate::config::{ControlsSettings, UiSettings};
use crate::player::PlayerState;
use crate::visualizer::MAX_HEIGHT;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("j/k", "up/down");
    map.insert("enter", "select song");
    map.insert("1-9", "jump to song");
    map.insert("K", "details");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_seconds: u64) -> String {
    let order = ["space/p", "h/l", "H/L", "j/k", "enter", "1-9", "K", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{seek_seconds}s"))
            } else {
                CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a position as `M:SS`, flooring partial seconds.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Screen areas, shared between drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub header: Rect,
    pub status: Rect,
    pub tracks: Rect,
    pub visualizer: Option<Rect>,
    pub progress: Rect,
    pub footer: Rect,
}

pub fn layout(area: Rect, show_visualizer: bool) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    let (tracks, visualizer) = if show_visualizer {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[2]);
        (cols[0], Some(cols[1]))
    } else {
        (chunks[2], None)
    };

    UiLayout {
        header: chunks[0],
        status: chunks[1],
        tracks,
        visualizer,
        progress: chunks[3],
        footer: chunks[4],
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_padded() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

fn track_item<'a>(index: usize, track: &'a crate::catalog::Track, active: bool) -> ListItem<'a> {
    let number_style = if active {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(format!("{:>2} ", index + 1), number_style),
        Span::raw(track.title.as_str()),
        Span::raw("  "),
        Span::styled(track.artist.as_str(), Style::default().fg(Color::DarkGray)),
    ];
    if track.explicit {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(" E ", Style::default().bg(Color::DarkGray)));
    }
    if !track.display_duration.is_empty() {
        spans.push(Span::raw(format!("  {}", track.display_duration)));
    }

    let mut item = ListItem::new(Line::from(spans));
    if active {
        item = item.style(Style::default().add_modifier(Modifier::BOLD));
    }
    item
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    state: &PlayerState,
    catalog: &Catalog,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let areas = layout(frame.area(), ui_settings.show_visualizer);

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" onrepeat ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, areas.header);

    // Now playing
    let current = catalog.get(state.current_index);
    let status = {
        let mut parts: Vec<String> = Vec::new();
        if let Some(track) = current {
            let mut song = track.now_playing_line();
            if track.explicit {
                song.push_str(" [E]");
            }
            parts.push(song);
        }
        parts.push(if state.is_playing { "Playing" } else { "Paused" }.to_string());
        if state.is_scrubbing {
            parts.push("Seeking".to_string());
        }
        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(Block::bordered().padding(left_padded()).title(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, areas.status);

    // Track list
    let items: Vec<ListItem> = catalog
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, t)| track_item(i, t, i == state.current_index))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(app.cursor));
    frame.render_stateful_widget(list, areas.tracks, &mut list_state);

    // Visualizer
    if let Some(area) = areas.visualizer {
        let bars: Vec<Bar> = app
            .visualizer
            .heights()
            .iter()
            .map(|&h| Bar::default().value(h).text_value(String::new()))
            .collect();
        let color = if app.visualizer.is_playing() {
            Color::Indexed(99)
        } else {
            Color::DarkGray
        };
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title(" on repeat "))
            .data(BarGroup::default().bars(&bars))
            .bar_width(3)
            .bar_gap(1)
            .bar_style(Style::default().fg(color))
            .max(MAX_HEIGHT);
        frame.render_widget(chart, area);
    }

    // Progress
    let label = format!(
        "{} / {}",
        format_time(state.current_time),
        format_time(state.duration)
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .ratio(state.progress())
        .label(label);
    frame.render_widget(gauge, areas.progress);

    // Details popup over the list
    if app.details_window {
        let popup_area = centered_rect_sized(72, 8, areas.tracks);
        frame.render_widget(Clear, popup_area);

        let track = catalog.get(app.cursor);
        let details = if let Some(track) = track {
            let loaded = if app.cursor == state.current_index && !state.duration.is_zero() {
                format_time(state.duration)
            } else {
                "-".to_string()
            };
            format!(
                "Title: {}\nArtist: {}\nListed length: {} (loaded: {})\nAudio: {}\nArtwork: {}",
                track.title,
                track.artist,
                if track.display_duration.is_empty() {
                    "-"
                } else {
                    track.display_duration.as_str()
                },
                loaded,
                track.audio_url,
                if track.artwork_url.is_empty() {
                    "-"
                } else {
                    track.artwork_url.as_str()
                },
            )
        } else {
            "No track selected".to_string()
        };
        let details_par = Paragraph::new(details)
            .block(
                Block::default()
                    .padding(left_padded())
                    .borders(Borders::ALL)
                    .title(" details (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(details_par, popup_area);
    }

    let footer = Paragraph::new(controls_text(controls_settings.seek_step_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_padded()),
        )
        .wrap(Wrap { trim: true })
        .italic();
    frame.render_widget(footer, areas.footer);
}

#[cfg(test)]
mod tests;
