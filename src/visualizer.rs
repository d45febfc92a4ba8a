//! Audio-reactive bar visualizer.
//!
//! The bars do not analyse the audio. They are re-randomized on a fixed
//! interval while the player reports that it is playing and freeze as soon
//! as it stops. The only input is the play-state notification.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of bars drawn.
pub const BAR_COUNT: usize = 6;

/// Tallest bar, in percent.
pub const MAX_HEIGHT: u64 = 100;

pub struct Visualizer<R = StdRng> {
    heights: [u64; BAR_COUNT],
    playing: bool,
    interval: Duration,
    last_shuffle: Option<Instant>,
    rng: R,
}

impl Visualizer<StdRng> {
    pub fn new(interval: Duration) -> Self {
        Self::with_rng(interval, StdRng::from_entropy())
    }
}

impl<R: Rng> Visualizer<R> {
    pub fn with_rng(interval: Duration, rng: R) -> Self {
        let mut v = Self {
            heights: [0; BAR_COUNT],
            playing: false,
            interval,
            last_shuffle: None,
            rng,
        };
        v.shuffle();
        v
    }

    /// Follow the player's play state.
    pub fn set_playing(&mut self, playing: bool, now: Instant) {
        if playing && !self.playing {
            self.shuffle();
            self.last_shuffle = Some(now);
        }
        self.playing = playing;
    }

    /// Advance the animation. Returns whether the bars changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.playing {
            return false;
        }
        let due = self
            .last_shuffle
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.shuffle();
            self.last_shuffle = Some(now);
        }
        due
    }

    pub fn heights(&self) -> &[u64; BAR_COUNT] {
        &self.heights
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn shuffle(&mut self) {
        for h in &mut self.heights {
            *h = self.rng.gen_range(0..=MAX_HEIGHT);
        }
    }
}

#[cfg(test)]
mod tests;
