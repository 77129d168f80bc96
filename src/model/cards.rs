//! Card handles keyed by track id.
//!
//! The view never walks the stack to build a card; it asks the registry for the
//! face of the entry currently on top. The registry is rebuilt whenever the
//! stack is replaced and follows every pop / push in between.

use std::collections::HashMap;

use super::stack::TrackStack;
use super::types::TrackEntry;

/// Render-ready face of a track card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFace {
    pub title: String,
    pub artists: String,
    pub album: String,
    pub added: Option<String>,
    pub artwork_url: Option<String>,
}

impl CardFace {
    pub fn from_entry(entry: &TrackEntry) -> Self {
        Self {
            title: entry.track.name.clone(),
            artists: entry.artist_line(),
            album: entry.track.album.name.clone(),
            added: entry.added_at.map(|d| d.format("%Y-%m-%d").to_string()),
            artwork_url: entry
                .track
                .album
                .images
                .iter()
                .max_by_key(|i| i.width.unwrap_or(0))
                .map(|i| i.url.clone()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: HashMap<String, CardFace>,
}

impl CardRegistry {
    pub fn rebuild(&mut self, stack: &TrackStack) {
        self.cards = stack
            .iter_from_top()
            .map(|e| (e.track.id.clone(), CardFace::from_entry(e)))
            .collect();
    }

    pub fn insert(&mut self, entry: &TrackEntry) {
        self.cards
            .insert(entry.track.id.clone(), CardFace::from_entry(entry));
    }

    pub fn remove(&mut self, track_id: &str) {
        self.cards.remove(track_id);
    }

    pub fn get(&self, track_id: &str) -> Option<&CardFace> {
        self.cards.get(track_id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
