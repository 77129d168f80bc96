//! Test helpers: track fixtures and an in-memory `CollectionApi`.

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use chrono::{Duration, TimeZone, Utc};

use super::api::{CollectionApi, TrackPage};
use super::types::{Album, Artist, Artwork, PlaylistItem, Source, Track, TrackEntry};

pub fn entry(id: &str) -> TrackEntry {
    entry_added(id, 0)
}

/// Entry added `hours_ago` hours before a fixed reference time.
pub fn entry_added(id: &str, hours_ago: i64) -> TrackEntry {
    let reference = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    TrackEntry {
        added_at: Some(reference - Duration::hours(hours_ago)),
        track: Track {
            id: id.to_string(),
            uri: format!("spotify:track:{id}"),
            name: format!("Song {id}"),
            artists: vec![Artist { name: format!("Artist {id}") }],
            album: Album {
                name: format!("Album {id}"),
                images: vec![Artwork {
                    url: format!("https://i.scdn.co/image/{id}"),
                    width: Some(640),
                }],
            },
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recorded {
    Fetch { source: Source, offset: u32, limit: u32 },
    Remove { source: Source, track_id: String },
    Restore { source: Source, track_id: String },
    Add { playlist_id: String, uri: String },
    Play { device_id: String, uri: String },
}

/// Serves one collection (newest first, like the Web API) for every source
/// and records each call.
#[derive(Clone, Default)]
pub struct FakeApi {
    items: Arc<Vec<Option<TrackEntry>>>,
    playlists: Arc<Vec<PlaylistItem>>,
    devices: Arc<Vec<(String, String)>>,
    calls: Arc<Mutex<Vec<Recorded>>>,
    failing: bool,
}

impl FakeApi {
    pub fn with_library(count: usize) -> Self {
        let items = (0..count)
            .map(|i| Some(entry_added(&format!("t{i}"), i as i64)))
            .collect();
        Self {
            items: Arc::new(items),
            ..Self::default()
        }
    }

    pub fn with_unavailable(self, indices: &[usize]) -> Self {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| if indices.contains(&i) { None } else { item.clone() })
            .collect();
        Self {
            items: Arc::new(items),
            ..self
        }
    }

    pub fn with_playlists(self, playlists: &[(&str, &str)]) -> Self {
        let playlists = playlists
            .iter()
            .map(|(id, name)| PlaylistItem {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect();
        Self {
            playlists: Arc::new(playlists),
            ..self
        }
    }

    /// Register a Connect device `name` with Web API id `id`.
    pub fn with_device(self, name: &str, id: &str) -> Self {
        Self {
            devices: Arc::new(vec![(name.to_string(), id.to_string())]),
            ..self
        }
    }

    pub fn failing(self) -> Self {
        Self {
            failing: true,
            ..self
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Recorded) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing {
            Err(anyhow!("HTTP 502 from fake api"))
        } else {
            Ok(())
        }
    }
}

impl CollectionApi for FakeApi {
    async fn fetch_page(&self, source: &Source, offset: u32, limit: u32) -> Result<TrackPage> {
        self.record(Recorded::Fetch {
            source: source.clone(),
            offset,
            limit,
        })?;
        let items = self
            .items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(TrackPage {
            items,
            total: self.items.len() as u32,
        })
    }

    async fn remove_track(&self, source: &Source, entry: &TrackEntry) -> Result<()> {
        self.record(Recorded::Remove {
            source: source.clone(),
            track_id: entry.track.id.clone(),
        })
    }

    async fn restore_track(&self, source: &Source, entry: &TrackEntry) -> Result<()> {
        self.record(Recorded::Restore {
            source: source.clone(),
            track_id: entry.track.id.clone(),
        })
    }

    async fn add_to_playlist(&self, playlist_id: &str, uri: &str) -> Result<()> {
        self.record(Recorded::Add {
            playlist_id: playlist_id.to_string(),
            uri: uri.to_string(),
        })
    }

    async fn play_uri(&self, device_id: &str, uri: &str) -> Result<()> {
        self.record(Recorded::Play {
            device_id: device_id.to_string(),
            uri: uri.to_string(),
        })
    }

    async fn user_playlists(&self, _limit: u32) -> Result<Vec<PlaylistItem>> {
        if self.failing {
            return Err(anyhow!("HTTP 502 from fake api"));
        }
        Ok(self.playlists.as_ref().clone())
    }

    async fn find_device_id(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .devices
            .iter()
            .find(|(device_name, _)| device_name == name)
            .map(|(_, id)| id.clone()))
    }
}
