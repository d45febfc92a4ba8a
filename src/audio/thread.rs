use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::error::MediaError;
use crate::player::{Generation, MediaEvent, Notification};

use super::clock::PlaybackClock;
use super::sink::{create_sink_at, probe_duration};
use super::types::AudioCmd;

/// Per-thread playback state for the bound source.
struct Playback {
    stream: Option<OutputStream>,
    events: Sender<Notification>,
    generation: Generation,
    path: Option<PathBuf>,
    sink: Option<Sink>,
    playing: bool,
    clock: PlaybackClock,
}

impl Playback {
    fn emit(&self, event: MediaEvent) {
        // The receiver only goes away during shutdown.
        let _ = self.events.send(Notification::new(self.generation, event));
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn open_at(&self, position: Duration) -> Result<Sink, MediaError> {
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| MediaError::OutputDevice("not available".to_string()))?;
        let path = self.path.as_ref().ok_or(MediaError::NoSource)?;
        create_sink_at(stream, path, position)
    }

    fn load(&mut self, path: PathBuf, generation: Generation) {
        self.stop_sink();
        self.generation = generation;
        self.playing = false;
        self.clock.reset_to(Duration::ZERO);
        self.path = Some(path);

        match self.open_at(Duration::ZERO) {
            Ok(sink) => {
                self.sink = Some(sink);
                if let Some(d) = self.path.as_deref().and_then(probe_duration) {
                    self.emit(MediaEvent::DurationKnown(d));
                }
            }
            Err(e) => {
                warn!(error = %e, "could not load source");
                self.path = None;
                self.emit(MediaEvent::LoadFailed(e.to_string()));
            }
        }
    }

    fn play(&mut self) {
        match self.sink.as_ref() {
            Some(s) => {
                s.play();
                self.playing = true;
                self.clock.start();
            }
            None => self.emit(MediaEvent::PlayRejected(MediaError::NoSource.to_string())),
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.playing = false;
        self.clock.pause();
        self.emit(MediaEvent::Position(self.clock.elapsed()));
    }

    /// Rebuild the sink and skip into the file.
    fn seek(&mut self, position: Duration) {
        if self.path.is_none() {
            return;
        }
        self.stop_sink();

        match self.open_at(position) {
            Ok(sink) => {
                self.clock.reset_to(position);
                if self.playing {
                    sink.play();
                    self.clock.start();
                }
                self.sink = Some(sink);
            }
            Err(e) => {
                warn!(error = %e, "seek failed");
                self.playing = false;
                self.clock.reset_to(Duration::ZERO);
                self.emit(MediaEvent::LoadFailed(e.to_string()));
            }
        }
    }

    /// Periodic work: report the position, or the end of the source.
    fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let finished = self.sink.as_ref().is_none_or(Sink::empty);
        if !finished {
            self.emit(MediaEvent::Position(self.clock.elapsed()));
            return;
        }

        self.playing = false;
        self.clock.reset_to(Duration::ZERO);
        self.emit(MediaEvent::Ended);

        // Re-arm at the start so the next play does not hit an empty sink.
        self.stop_sink();
        match self.open_at(Duration::ZERO) {
            Ok(sink) => self.sink = Some(sink),
            Err(e) => warn!(error = %e, "could not rewind source"),
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<Notification>,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when the stream is dropped, which
                // would scribble over the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                warn!(error = %e, "no audio output device, playback disabled");
                None
            }
        };

        let mut playback = Playback {
            stream,
            events,
            generation: Generation::default(),
            path: None,
            sink: None,
            playing: false,
            clock: PlaybackClock::default(),
        };

        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Load { path, generation }) => {
                    debug!(path = %path.display(), ?generation, "loading source");
                    playback.load(path, generation);
                }
                Ok(AudioCmd::Play) => playback.play(),
                Ok(AudioCmd::Pause) => playback.pause(),
                Ok(AudioCmd::Seek(position)) => playback.seek(position),
                Ok(AudioCmd::Quit) | Err(RecvTimeoutError::Disconnected) => {
                    playback.stop_sink();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => playback.tick(),
            }
        }
        debug!("audio thread exiting");
    })
}
