//! Wall-clock playback position.
//!
//! rodio does not report how far into a source it is once the source has
//! been skipped into, so the thread keeps its own clock: time accumulated
//! while paused plus time since the last resume.

use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone, Copy)]
pub(super) struct PlaybackClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl PlaybackClock {
    /// Stop the clock and set it to `position`.
    pub(super) fn reset_to(&mut self, position: Duration) {
        self.started_at = None;
        self.accumulated = position;
    }

    pub(super) fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(super) fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    pub(super) fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }
}
