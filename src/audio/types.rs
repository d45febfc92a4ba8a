//! Commands understood by the audio thread.

use std::path::PathBuf;
use std::time::Duration;

use crate::player::Generation;

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the current source. Leaves playback paused at the start.
    Load {
        path: PathBuf,
        generation: Generation,
    },
    /// Resume (or start) the current source.
    Play,
    /// Pause the current source.
    Pause,
    /// Move to an absolute position, keeping the play/pause state.
    Seek(Duration),
    /// Stop the sink and leave the thread.
    Quit,
}
