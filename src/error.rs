//! Typed errors for session preconditions.
//!
//! Remote plumbing uses `anyhow::Result` throughout; these are the cases the
//! controller has to tell apart and turn into prompts.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Filing a track needs a destination playlist.
    #[error("Select a destination playlist first (press d)")]
    MissingDestination,

    /// The session gate has not reached the authenticated state.
    #[error("Not signed in")]
    NotAuthenticated,
}
