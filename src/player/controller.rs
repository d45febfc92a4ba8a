use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::catalog::{Catalog, Track};

use super::binding::MediaBinding;
use super::state::{Generation, MediaEvent, Notification, PlayerState};

type PlayStateListener = Box<dyn FnMut(bool)>;

/// Owns the player state and the media binding.
///
/// Every mutation goes through one of the methods below. A binding failure
/// is logged and leaves the player paused; nothing propagates to the caller.
pub struct PlayerController<B: MediaBinding> {
    catalog: Catalog,
    binding: B,
    state: PlayerState,
    generation: Generation,
    auto_advance: bool,
    play_state_listener: Option<PlayStateListener>,
    released: bool,
}

impl<B: MediaBinding> PlayerController<B> {
    /// Create a paused player on the first track and bind its source.
    pub fn new(catalog: Catalog, binding: B) -> Self {
        let mut controller = Self {
            catalog,
            binding,
            state: PlayerState::default(),
            generation: Generation::default(),
            auto_advance: false,
            play_state_listener: None,
            released: false,
        };
        controller.bind_current();
        controller
    }

    /// Start the next track when one ends instead of stopping.
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    /// Register the listener fired on every change of `is_playing`.
    ///
    /// It fires once per transition and never when the flag is rewritten
    /// with the same value. Replaces any previous listener.
    pub fn on_play_state_change<F>(&mut self, listener: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.play_state_listener = Some(Box::new(listener));
    }

    pub fn snapshot(&self) -> PlayerState {
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_track(&self) -> &Track {
        // `current_index` is only ever set after a bounds check.
        &self.catalog.tracks()[self.state.current_index]
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Switch to `index`, paused at the start. Out-of-range indices are ignored.
    pub fn select_track(&mut self, index: usize) {
        if index >= self.catalog.len() {
            debug!(index, len = self.catalog.len(), "ignoring out-of-range track selection");
            return;
        }

        self.state.current_index = index;
        self.state.current_time = Duration::ZERO;
        self.state.duration = Duration::ZERO;
        self.state.is_scrubbing = false;
        self.set_playing(false);
        self.bind_current();
    }

    pub fn next(&mut self) {
        self.select_track(self.catalog.next_index(self.state.current_index));
    }

    pub fn previous(&mut self) {
        self.select_track(self.catalog.previous_index(self.state.current_index));
    }

    pub fn toggle_play_pause(&mut self) {
        if self.released {
            return;
        }

        if self.state.is_playing {
            if let Err(e) = self.binding.pause() {
                warn!(error = %e, "pause command failed");
            }
            self.set_playing(false);
            return;
        }

        match self.binding.play() {
            Ok(()) => self.set_playing(true),
            Err(e) => {
                warn!(error = %e, track = %self.current_track().title, "play command rejected");
                self.set_playing(false);
            }
        }
    }

    /// Apply a notification from the binding.
    ///
    /// Notifications from an older generation belong to a track that is no
    /// longer selected and are dropped.
    pub fn apply(&mut self, notification: Notification) {
        if notification.generation != self.generation {
            trace!(
                stale = ?notification.generation,
                current = ?self.generation,
                "dropping notification from a replaced source"
            );
            return;
        }

        match notification.event {
            MediaEvent::Position(time) => self.on_position_update(time),
            MediaEvent::DurationKnown(duration) => self.on_duration_known(duration),
            MediaEvent::Ended => self.on_playback_ended(),
            MediaEvent::LoadFailed(reason) => {
                warn!(track = %self.current_track().title, %reason, "failed to load source");
                self.set_playing(false);
            }
            MediaEvent::PlayRejected(reason) => {
                warn!(track = %self.current_track().title, %reason, "playback was rejected");
                self.set_playing(false);
            }
        }
    }

    pub fn on_position_update(&mut self, time: Duration) {
        if self.state.is_scrubbing {
            return;
        }
        self.state.current_time = self.state.clamp_time(time);
    }

    pub fn on_duration_known(&mut self, duration: Duration) {
        self.state.duration = duration;
        self.state.current_time = self.state.clamp_time(self.state.current_time);
    }

    /// Stop at the start of the same track, or move on when auto-advance is set.
    pub fn on_playback_ended(&mut self) {
        self.set_playing(false);
        self.state.current_time = Duration::ZERO;

        if self.auto_advance {
            self.next();
            self.toggle_play_pause();
        }
    }

    pub fn begin_scrub(&mut self) {
        self.state.is_scrubbing = true;
    }

    /// Follow the user's drag without seeking. Ignored outside a scrub.
    pub fn scrub_to(&mut self, time: Duration) {
        if self.state.is_scrubbing {
            self.state.current_time = self.state.clamp_time(time);
        }
    }

    /// Commit a scrub: move to `final_time` and issue exactly one seek.
    pub fn end_scrub(&mut self, final_time: Duration) {
        self.state.current_time = self.state.clamp_time(final_time);
        if let Err(e) = self.binding.seek(self.state.current_time) {
            warn!(error = %e, "seek command failed");
        }
        self.state.is_scrubbing = false;
    }

    /// Jump `seconds` forward (or backward when negative) from the current position.
    pub fn seek_by(&mut self, seconds: i64) {
        let step = Duration::from_secs(seconds.unsigned_abs());
        let target = if seconds >= 0 {
            self.state.current_time.saturating_add(step)
        } else {
            self.state.current_time.saturating_sub(step)
        };
        self.begin_scrub();
        self.end_scrub(target);
    }

    /// Stop playback and release the binding. Later calls do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.binding.release();
        self.set_playing(false);
        info!("player released");
    }

    fn bind_current(&mut self) {
        if self.released {
            return;
        }
        self.generation = self.generation.next();
        let track = &self.catalog.tracks()[self.state.current_index];
        debug!(
            track = %track.title,
            source = %track.audio_url,
            generation = ?self.generation,
            "binding source"
        );
        if let Err(e) = self.binding.load(&track.audio_url, self.generation) {
            warn!(error = %e, track = %track.title, "failed to bind source");
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.state.is_playing == playing {
            return;
        }
        self.state.is_playing = playing;
        if let Some(listener) = self.play_state_listener.as_mut() {
            listener(playing);
        }
    }
}

impl<B: MediaBinding> Drop for PlayerController<B> {
    fn drop(&mut self) {
        self.release();
    }
}
