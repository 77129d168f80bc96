//! Seam between the session logic and the Spotify Web API.

use std::future::Future;

use anyhow::Result;

use super::types::{PlaylistItem, Source, TrackEntry};

/// One page of a source collection.
///
/// Items the API returned without a usable track (local files, unavailable
/// tracks) are `None`; the loader drops them.
#[derive(Clone, Debug, Default)]
pub struct TrackPage {
    pub items: Vec<Option<TrackEntry>>,
    pub total: u32,
}

/// Remote operations the triage session needs.
pub trait CollectionApi: Clone + Send + Sync + 'static {
    fn fetch_page(
        &self,
        source: &Source,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<TrackPage>> + Send;

    /// Library: delete by track id. Playlist: remove by uri.
    fn remove_track(
        &self,
        source: &Source,
        entry: &TrackEntry,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Inverse of `remove_track`.
    fn restore_track(
        &self,
        source: &Source,
        entry: &TrackEntry,
    ) -> impl Future<Output = Result<()>> + Send;

    fn add_to_playlist(
        &self,
        playlist_id: &str,
        uri: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    fn play_uri(&self, device_id: &str, uri: &str) -> impl Future<Output = Result<()>> + Send;

    /// The current user's playlists, first page only.
    fn user_playlists(&self, limit: u32) -> impl Future<Output = Result<Vec<PlaylistItem>>> + Send;

    /// Web API id of the device called `name`, if it is registered yet.
    fn find_device_id(&self, name: &str) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// A remote call emitted by a session transition. Executed detached; its
/// outcome never feeds back into the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteCall {
    Remove { source: Source, entry: TrackEntry },
    Restore { source: Source, entry: TrackEntry },
    AddToPlaylist { playlist_id: String, entry: TrackEntry },
    Echo { uri: String },
}

impl RemoteCall {
    pub fn name(&self) -> &'static str {
        match self {
            RemoteCall::Remove { .. } => "remove",
            RemoteCall::Restore { .. } => "restore",
            RemoteCall::AddToPlaylist { .. } => "add_to_playlist",
            RemoteCall::Echo { .. } => "echo",
        }
    }
}
