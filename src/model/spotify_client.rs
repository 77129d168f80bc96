//! Spotify API client wrapper

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rspotify::{
    AuthCodeSpotify,
    model::{FullTrack, PlayableId, PlayableItem, PlaylistId, TrackId},
    prelude::*,
};

use super::api::{CollectionApi, TrackPage};
use super::types::{Album, Artist, Artwork, PlaylistItem, Source, Track, TrackEntry};

#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<AuthCodeSpotify>,
}

impl SpotifyClient {
    pub fn new(client: AuthCodeSpotify) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    fn track_id(entry: &TrackEntry) -> Result<TrackId<'_>> {
        Ok(TrackId::from_id(entry.track.id.as_str())?)
    }
}

/// Convert an API track. Tracks without an id (local files) are not usable.
fn entry_from_track(added_at: Option<DateTime<Utc>>, track: &FullTrack) -> Option<TrackEntry> {
    let track_id = track.id.as_ref()?.id().to_string();
    if track_id.is_empty() {
        return None;
    }

    Some(TrackEntry {
        added_at,
        track: Track {
            uri: format!("spotify:track:{}", track_id),
            id: track_id,
            name: track.name.clone(),
            artists: track
                .artists
                .iter()
                .map(|a| Artist { name: a.name.clone() })
                .collect(),
            album: Album {
                name: track.album.name.clone(),
                images: track
                    .album
                    .images
                    .iter()
                    .map(|i| Artwork {
                        url: i.url.clone(),
                        width: i.width,
                    })
                    .collect(),
            },
        },
    })
}

impl CollectionApi for SpotifyClient {
    async fn fetch_page(&self, source: &Source, offset: u32, limit: u32) -> Result<TrackPage> {
        match source {
            Source::Library => {
                tracing::debug!(offset, limit, "API: current_user_saved_tracks");
                let page = self
                    .client
                    .current_user_saved_tracks_manual(None, Some(limit), Some(offset))
                    .await?;
                Ok(TrackPage {
                    items: page
                        .items
                        .iter()
                        .map(|saved| entry_from_track(Some(saved.added_at), &saved.track))
                        .collect(),
                    total: page.total,
                })
            }
            Source::Playlist(playlist_id) => {
                tracing::debug!(playlist_id, offset, limit, "API: playlist_items");
                let id = PlaylistId::from_id(playlist_id.as_str())?;
                let page = self
                    .client
                    .playlist_items_manual(id, None, None, Some(limit), Some(offset))
                    .await?;
                Ok(TrackPage {
                    items: page
                        .items
                        .iter()
                        .map(|item| match &item.track {
                            Some(PlayableItem::Track(track)) => {
                                entry_from_track(item.added_at, track)
                            }
                            _ => None,
                        })
                        .collect(),
                    total: page.total,
                })
            }
        }
    }

    async fn remove_track(&self, source: &Source, entry: &TrackEntry) -> Result<()> {
        let id = Self::track_id(entry)?;
        match source {
            Source::Library => {
                tracing::debug!(track_id = %entry.track.id, "API: current_user_saved_tracks_delete");
                self.client.current_user_saved_tracks_delete([id]).await?;
            }
            Source::Playlist(playlist_id) => {
                tracing::debug!(playlist_id, uri = %entry.track.uri, "API: playlist_remove_all_occurrences_of_items");
                let playlist = PlaylistId::from_id(playlist_id.as_str())?;
                self.client
                    .playlist_remove_all_occurrences_of_items(
                        playlist,
                        [PlayableId::Track(id)],
                        None,
                    )
                    .await?;
            }
        }
        Ok(())
    }

    async fn restore_track(&self, source: &Source, entry: &TrackEntry) -> Result<()> {
        let id = Self::track_id(entry)?;
        match source {
            Source::Library => {
                tracing::debug!(track_id = %entry.track.id, "API: current_user_saved_tracks_add");
                self.client.current_user_saved_tracks_add([id]).await?;
            }
            Source::Playlist(playlist_id) => {
                tracing::debug!(playlist_id, uri = %entry.track.uri, "API: playlist_add_items");
                let playlist = PlaylistId::from_id(playlist_id.as_str())?;
                self.client
                    .playlist_add_items(playlist, [PlayableId::Track(id)], None)
                    .await?;
            }
        }
        Ok(())
    }

    async fn add_to_playlist(&self, playlist_id: &str, uri: &str) -> Result<()> {
        tracing::debug!(playlist_id, uri, "API: playlist_add_items");
        let playlist = PlaylistId::from_id(playlist_id)?;
        let track = TrackId::from_uri(uri)?;
        self.client
            .playlist_add_items(playlist, [PlayableId::Track(track)], None)
            .await?;
        Ok(())
    }

    async fn play_uri(&self, device_id: &str, uri: &str) -> Result<()> {
        tracing::debug!(uri, device_id, "API: start_uris_playback");
        let track = TrackId::from_uri(uri)?;
        self.client
            .start_uris_playback([PlayableId::Track(track)], Some(device_id), None, None)
            .await?;
        Ok(())
    }

    async fn user_playlists(&self, limit: u32) -> Result<Vec<PlaylistItem>> {
        tracing::debug!(limit, "API: current_user_playlists");
        let page = self
            .client
            .current_user_playlists_manual(Some(limit), None)
            .await?;

        let playlists: Vec<PlaylistItem> = page
            .items
            .into_iter()
            .map(|playlist| PlaylistItem {
                id: playlist.id.id().to_string(),
                name: playlist.name,
            })
            .collect();

        tracing::debug!(count = playlists.len(), "Loaded user playlists");
        Ok(playlists)
    }

    async fn find_device_id(&self, name: &str) -> Result<Option<String>> {
        let devices = self.client.device().await?;
        let found = devices
            .into_iter()
            .find(|d| d.name == name)
            .and_then(|d| d.id);
        tracing::trace!(device_name = name, found = found.is_some(), "Device lookup");
        Ok(found)
    }
}
