//! Core type definitions for the application

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An artist credited on a track
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
}

/// Album artwork reference (rendering is left to the terminal, we only keep the URL)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artwork {
    pub url: String,
    pub width: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Album {
    pub name: String,
    pub images: Vec<Artwork>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artists: Vec<Artist>,
    pub album: Album,
}

/// One item of a source collection. Identity is `track.id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackEntry {
    pub added_at: Option<DateTime<Utc>>,
    pub track: Track,
}

impl TrackEntry {
    pub fn id(&self) -> &str {
        &self.track.id
    }

    pub fn uri(&self) -> &str {
        &self.track.uri
    }

    pub fn artist_line(&self) -> String {
        self.track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Where tracks are read from (and deleted from).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Source {
    /// The user's saved tracks ("Liked Songs")
    #[default]
    Library,
    Playlist(String),
}

/// Order in which the loaded window is presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    NewestFirst,
    #[serde(alias = "deep-clean")]
    OldestFirst,
}

impl SortMode {
    pub fn toggle(self) -> Self {
        match self {
            SortMode::NewestFirst => SortMode::OldestFirst,
            SortMode::OldestFirst => SortMode::NewestFirst,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::NewestFirst => "Newest first",
            SortMode::OldestFirst => "Oldest first",
        }
    }
}

/// User-chosen configuration of a triage session.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Selectors {
    pub source: Source,
    pub destination: Option<String>,
    pub sort_mode: SortMode,
}

/// A user's playlist (for the pickers)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistItem {
    pub id: String,
    pub name: String,
}

/// Which picker overlay is open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerKind {
    Source,
    Destination,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerChoice {
    Source(Source),
    Destination(String),
}

#[derive(Clone, Debug)]
pub struct Picker {
    pub kind: PickerKind,
    pub selected: usize,
}

/// Readiness of the local Spotify Connect device
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DeviceStatus {
    #[default]
    Connecting,
    Ready { id: String, name: String },
    Unavailable,
}

impl DeviceStatus {
    pub fn device_id(&self) -> Option<&str> {
        match self {
            DeviceStatus::Ready { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// UI state for the application
#[derive(Clone, Default)]
pub struct UiState {
    pub playlists: Vec<PlaylistItem>,
    pub picker: Option<Picker>,
    /// Blocking precondition prompt; nothing else reacts until it is dismissed.
    pub prompt: Option<String>,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl UiState {
    pub fn playlist_name(&self, id: &str) -> Option<&str> {
        self.playlists
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    /// Number of rows the open picker offers. The source picker has an extra
    /// "Liked Songs" row in front of the playlists.
    pub fn picker_len(&self, kind: PickerKind) -> usize {
        match kind {
            PickerKind::Source => self.playlists.len() + 1,
            PickerKind::Destination => self.playlists.len(),
        }
    }
}
