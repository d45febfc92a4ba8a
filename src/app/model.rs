//! Presentation-side model: `App`.
//!
//! Player state lives in the controller. `App` only keeps what the terminal
//! needs on top of it: the list cursor, popup visibility, the scrub drag
//! and the visualizer.

use std::time::Duration;

use ratatui::layout::Rect;

use crate::visualizer::Visualizer;

pub struct App {
    /// Row highlighted in the track list.
    pub cursor: usize,
    track_count: usize,
    last_played_index: usize,
    pub details_window: bool,
    /// A mouse drag on the progress bar is in progress.
    pub dragging: bool,
    pub visualizer: Visualizer,
}

impl App {
    pub fn new(track_count: usize, visualizer: Visualizer) -> Self {
        Self {
            cursor: 0,
            track_count,
            last_played_index: 0,
            details_window: false,
            dragging: false,
            visualizer,
        }
    }

    pub fn toggle_details_window(&mut self) {
        self.details_window = !self.details_window;
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.track_count {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor onto the player's track whenever that track changes.
    pub fn follow_current(&mut self, current_index: usize) {
        if current_index != self.last_played_index {
            self.last_played_index = current_index;
            self.cursor = current_index.min(self.track_count.saturating_sub(1));
        }
    }

    /// Track position under `column` of a bordered progress bar at `area`.
    ///
    /// The column is clamped onto the bar, so a drag that leaves the bar
    /// sideways pins to the start or the end.
    pub fn position_along(area: Rect, column: u16, duration: Duration) -> Duration {
        let inner_x = area.x.saturating_add(1);
        let inner_width = area.width.saturating_sub(2);
        if inner_width <= 1 {
            return Duration::ZERO;
        }

        let last = inner_x + inner_width - 1;
        let col = column.clamp(inner_x, last);
        let ratio = f64::from(col - inner_x) / f64::from(inner_width - 1);
        duration.mul_f64(ratio)
    }

    /// Like `position_along`, but only for clicks that land on the bar.
    pub fn position_at(area: Rect, column: u16, row: u16, duration: Duration) -> Option<Duration> {
        let inside = column > area.x
            && column < area.x + area.width.saturating_sub(1)
            && row > area.y
            && row < area.y + area.height.saturating_sub(1);
        inside.then(|| Self::position_along(area, column, duration))
    }

    /// Track index under `row` of the bordered track list at `area`.
    ///
    /// Only meaningful when the whole catalog fits, which is the case the
    /// list renders without scrolling.
    pub fn track_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        let inner_height = usize::from(area.height.saturating_sub(2));
        if self.track_count > inner_height {
            return None;
        }
        let inside_x = column > area.x && column < area.x + area.width.saturating_sub(1);
        if !inside_x || row <= area.y {
            return None;
        }
        let index = usize::from(row - area.y - 1);
        (index < self.track_count).then_some(index)
    }
}
