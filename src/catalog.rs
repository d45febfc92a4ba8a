//! The track catalog: a fixed, ordered list of playable tracks.
//!
//! The catalog is leaf data. It never changes after construction and the
//! player only ever indexes into it.

mod model;

pub use model::*;
