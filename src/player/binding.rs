use std::time::Duration;

use crate::error::MediaError;

use super::state::Generation;

/// The audio handle the controller drives.
///
/// Commands are fire-and-forget: an `Ok` only means the command was
/// accepted. Everything the backend learns later (position, duration, end of
/// track, late failures) comes back as a `Notification` tagged with the
/// generation passed to the most recent `load`.
pub trait MediaBinding {
    /// Bind to a new source. Any previous source is stopped and dropped.
    fn load(&mut self, audio_url: &str, generation: Generation) -> Result<(), MediaError>;

    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self) -> Result<(), MediaError>;

    fn seek(&mut self, position: Duration) -> Result<(), MediaError>;

    /// Stop playback and detach. Must be safe to call more than once.
    fn release(&mut self);
}
