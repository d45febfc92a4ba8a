//! Track player: the state controller and the seam to the audio backend.
//!
//! `PlayerController` is the only writer of `PlayerState`. User intents and
//! media notifications both go through it; the rendering layer only ever
//! sees `PlayerState` snapshots.

mod binding;
mod controller;
mod state;

pub use binding::MediaBinding;
pub use controller::PlayerController;
pub use state::*;

#[cfg(test)]
mod tests;
