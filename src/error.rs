//! Error types for the media binding, the catalog and the track fetcher.
//!
//! None of these ever reach the end user as a message on screen: the player
//! logs them and falls back to the paused state, the fetcher turns them into
//! a non-zero exit status.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a media binding.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The platform has no usable audio output.
    #[error("no audio output device: {0}")]
    OutputDevice(String),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// A play or seek was issued before any source was bound.
    #[error("no source loaded")]
    NoSource,

    /// The audio thread has exited and no longer accepts commands.
    #[error("audio thread is gone")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("the track catalog is empty")]
    Empty,
}

/// Failures of the `fetch` command.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to download {track}: HTTP {status}")]
    Status { track: String, status: u16 },

    #[error("failed to download {track}: {reason}")]
    Transport { track: String, reason: String },

    #[error("failed to write {track}: {source}")]
    Write {
        track: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create {path}: {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build http client: {0}")]
    Client(String),
}
