use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A single playable track.
///
/// `display_duration` is what the track list shows before the audio is
/// loaded; the player's own duration comes from the media binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub artwork_url: String,
    /// Public path of the audio file, e.g. `/music/berubah.mp3`.
    pub audio_url: String,
    #[serde(default)]
    pub display_duration: String,
}

impl Track {
    /// "Title • Artist", as shown above the progress bar.
    pub fn now_playing_line(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} • {}", self.title, self.artist)
        }
    }
}

/// Non-empty ordered list of tracks.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index after `index`, wrapping to the first track.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    /// Index before `index`, wrapping to the last track.
    pub fn previous_index(&self, index: usize) -> usize {
        (index % self.len() + self.len() - 1) % self.len()
    }
}

fn track(
    title: &str,
    artist: &str,
    explicit: bool,
    artwork_url: &str,
    audio_url: &str,
    display_duration: &str,
) -> Track {
    Track {
        title: title.to_string(),
        artist: artist.to_string(),
        explicit,
        artwork_url: artwork_url.to_string(),
        audio_url: audio_url.to_string(),
        display_duration: display_duration.to_string(),
    }
}

/// The built-in playlist.
pub fn default_tracks() -> Vec<Track> {
    vec![
        track(
            "Berubah",
            "Tenxi, Jemsii",
            false,
            "https://i.scdn.co/image/ab67616d0000b273ebdd8446bacd87dc7796cede",
            "/music/berubah.mp3",
            "3:21",
        ),
        track(
            "Bintang 5",
            "Tenxi, Jemsii",
            false,
            "https://i.scdn.co/image/ab67616d0000b273ebdd8446bacd87dc7796cede",
            "/music/bintang5.mp3",
            "4:06",
        ),
        track(
            "SO ASU",
            "NayKilla",
            true,
            "https://i.scdn.co/image/ab67616d0000b273bc3ac83da4a6bda98247e694",
            "/music/soasu.mp3",
            "2:36",
        ),
    ]
}
