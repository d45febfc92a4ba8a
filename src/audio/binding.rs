use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::error::MediaError;
use crate::player::{Generation, MediaBinding, Notification};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// Media binding backed by a rodio audio thread.
///
/// Owns the thread: releasing (or dropping) the binding stops the sink and
/// joins the thread.
pub struct AudioBinding {
    tx: Sender<AudioCmd>,
    asset_root: PathBuf,
    join: Option<JoinHandle<()>>,
}

impl AudioBinding {
    /// Spawn the audio thread.
    ///
    /// Returns the binding and the receiving end of its notifications.
    /// `tick` is how often position updates are sent while playing.
    pub fn spawn(asset_root: impl Into<PathBuf>, tick: Duration) -> (Self, Receiver<Notification>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<Notification>();
        let join = spawn_audio_thread(rx, events_tx, tick);

        let binding = Self {
            tx,
            asset_root: asset_root.into(),
            join: Some(join),
        };
        (binding, events_rx)
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), MediaError> {
        self.tx.send(cmd).map_err(|_| MediaError::Disconnected)
    }
}

/// Map a public audio URL such as `/music/x.mp3` onto a file under `asset_root`.
pub(super) fn resolve_source(asset_root: &Path, audio_url: &str) -> PathBuf {
    let relative = audio_url.trim_start_matches('/');
    asset_root.join(relative)
}

impl MediaBinding for AudioBinding {
    fn load(&mut self, audio_url: &str, generation: Generation) -> Result<(), MediaError> {
        let path = resolve_source(&self.asset_root, audio_url);
        self.send(AudioCmd::Load { path, generation })
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.send(AudioCmd::Pause)
    }

    fn seek(&mut self, position: Duration) -> Result<(), MediaError> {
        self.send(AudioCmd::Seek(position))
    }

    fn release(&mut self) {
        let Some(handle) = self.join.take() else {
            return;
        };
        let _ = self.send(AudioCmd::Quit);
        if handle.join().is_err() {
            warn!("audio thread panicked");
        }
    }
}

impl Drop for AudioBinding {
    fn drop(&mut self) {
        self.release();
    }
}
