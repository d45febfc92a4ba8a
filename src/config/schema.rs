use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::{Track, default_tracks};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/onrepeat/config.toml` or `~/.config/onrepeat/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ONREPEAT__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub catalog: CatalogSettings,
    pub fetch: FetchSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Directory that public audio URLs (`/music/...`) are resolved against.
    pub asset_root: PathBuf,
    /// How often the audio thread reports the playback position (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("public"),
            tick_ms: 200,
        }
    }
}

impl AudioSettings {
    /// Where the track files live on disk.
    pub fn music_dir(&self) -> PathBuf {
        self.asset_root.join("music")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start the next track when one ends. Off: playback stops at the end.
    pub auto_advance: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `H` / `L`.
    pub seek_step_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether to draw the bar visualizer next to the track list.
    pub show_visualizer: bool,
    /// How often the visualizer bars move while playing (milliseconds).
    pub visualizer_interval_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Soundtrack of Code ~ ".to_string(),
            show_visualizer: true,
            visualizer_interval_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Playlist, in order. Replaces the built-in one when set.
    pub tracks: Vec<Track>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            tracks: default_tracks(),
        }
    }
}

/// One file for `onrepeat fetch` to download into the music directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FetchSource {
    pub name: String,
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Pause after each download (milliseconds).
    pub delay_ms: u64,
    /// Maximum number of HTTP redirects followed per download.
    pub max_redirects: usize,
    /// Per-request timeout (seconds).
    pub timeout_secs: u64,
    pub sources: Vec<FetchSource>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        let source = |name: &str, url: &str, filename: &str| FetchSource {
            name: name.to_string(),
            url: url.to_string(),
            filename: filename.to_string(),
        };

        Self {
            delay_ms: 1000,
            max_redirects: 10,
            timeout_secs: 120,
            sources: vec![
                source(
                    "Berubah",
                    "https://cdn-spotify.zm.io.vn/download/4qRYdvt8ldAQAPUJwkt7La/QMDA72560815?name=Berubah&artist=Tenxi",
                    "berubah.mp3",
                ),
                source(
                    "Bintang 5",
                    "https://cdn-spotify.zm.io.vn/download/0HoWTALX2BktSIrSmflWSP/QMDA72560810?name=Bintang%205&artist=Tenxi",
                    "bintang5.mp3",
                ),
                source(
                    "SO ASU",
                    "https://cdn-spotify.zm.io.vn/download/56TRhAB4SqpRn5NdqHSAFy/QMFMF2504729?name=SO%20ASU&artist=Naykilla",
                    "soasu.mp3",
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directives. `RUST_LOG` takes precedence.
    pub filter: String,
    /// Log file for the player UI. Defaults to the state directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}
