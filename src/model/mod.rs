//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (track entries, selectors, UI state)
//! - `stack`: Track stack and undo history
//! - `cards`: Card handles keyed by track id
//! - `gate`: Authentication gate
//! - `session`: Swipe session state machine
//! - `api`: The `CollectionApi` seam and the remote calls transitions emit
//! - `loader`: Collection window loading
//! - `spotify_client`: Spotify API client wrapper
//! - `app_model`: Main application model with state management methods

mod types;
mod stack;
mod cards;
mod gate;
mod session;
mod api;
mod loader;
mod spotify_client;
mod app_model;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all public types for convenient access
pub use types::{
    DeviceStatus, Picker, PickerChoice, PickerKind, Selectors, SortMode, Source, UiState,
};

pub use gate::AuthState;
pub use session::SwipeAction;
pub use api::{CollectionApi, RemoteCall};
pub use loader::{LoadTicket, MAX_WINDOW, load_window};
pub use spotify_client::SpotifyClient;
pub use app_model::{AppModel, LIBRARY_LABEL, SessionView};
