//! Application module: the terminal-side model used by the UI and runtime.
//!
//! `App` lives in `app::model` and holds the list cursor, popup state and
//! the visualizer. Hit-testing for mouse input is here as well.

mod model;

pub use model::*;
