//! Player state, binding generations and media notifications.

use std::time::Duration;

/// Identifies one binding of the media handle to a source.
///
/// Bumped every time a track is (re)selected. Notifications carry the
/// generation they were produced under so that late events from a replaced
/// source can be told apart from current ones.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Snapshot of what is playing and where.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub current_index: usize,
    pub is_playing: bool,
    /// Position in the current track. Never exceeds `duration` once known.
    pub current_time: Duration,
    /// Zero until the binding reports it.
    pub duration: Duration,
    /// While set, only user input moves `current_time`.
    pub is_scrubbing: bool,
}

impl PlayerState {
    /// Clamp `time` into `0..=duration`. Unknown duration leaves it as is.
    pub fn clamp_time(&self, time: Duration) -> Duration {
        if self.duration.is_zero() {
            time
        } else {
            time.min(self.duration)
        }
    }

    /// Fraction of the track played, `0.0` while the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.current_time.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Something the media binding observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// Periodic playback position.
    Position(Duration),
    /// The source's metadata was read.
    DurationKnown(Duration),
    /// Playback reached the end of the source.
    Ended,
    /// The source could not be opened or decoded.
    LoadFailed(String),
    /// A play command was refused after it had been accepted.
    PlayRejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub generation: Generation,
    pub event: MediaEvent,
}

impl Notification {
    pub fn new(generation: Generation, event: MediaEvent) -> Self {
        Self { generation, event }
    }
}
