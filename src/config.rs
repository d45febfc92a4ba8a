//! Settings: schema types plus the file/environment loader.
//!
//! Everything is optional. A missing or broken config falls back to the
//! built-in defaults (see `runtime::settings`).

mod load;
mod schema;

pub use schema::*;
