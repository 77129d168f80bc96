//! Configuration loader and schema types.
//!
//! Settings come from an optional TOML file and `SPOTIFY_TRIAGE__*`
//! environment variables, falling back to struct defaults.

mod load;
mod schema;

pub use load::load_settings;
pub use schema::*;
