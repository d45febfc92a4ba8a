//! rodio-backed media binding.
//!
//! Playback runs on a dedicated audio thread. The binding sends it commands
//! over a channel and the thread answers with generation-tagged
//! `Notification`s on a second channel that the UI loop drains.

mod binding;
mod clock;
mod sink;
mod thread;
mod types;

pub use binding::AudioBinding;
