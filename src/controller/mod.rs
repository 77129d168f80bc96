//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and talks to Spotify.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `gate`: Sign-in and session restore
//! - `session`: Collection loading and swipe transitions
//! - `device`: Local playback device startup and discovery
//! - `dispatch`: Detached execution of remote calls
//!
//! Everything except sign-in and the librespot device is generic over the
//! `CollectionApi`, so it runs against an in-memory API in tests.

mod input;
mod gate;
mod session;
mod device;
mod dispatch;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::audio::PlaybackDevice;
use crate::config::Settings;
use crate::model::{AppModel, CollectionApi, RemoteCall, SpotifyClient};

#[derive(Clone)]
pub struct AppController<A = SpotifyClient> {
    pub(crate) model: Arc<Mutex<AppModel<A>>>,
    pub(crate) settings: Arc<Settings>,
    pub(crate) playback_device: Arc<Mutex<Option<PlaybackDevice>>>,
}

impl<A: CollectionApi> AppController<A> {
    pub fn new(model: Arc<Mutex<AppModel<A>>>, settings: Arc<Settings>) -> Self {
        Self {
            model,
            settings,
            playback_device: Arc::new(Mutex::new(None)),
        }
    }

    /// Fire-and-forget every call of a transition.
    pub(crate) fn dispatch_all(
        client: Option<A>,
        device_id: Option<String>,
        calls: Vec<RemoteCall>,
    ) {
        if calls.is_empty() {
            return;
        }
        let Some(client) = client else {
            tracing::warn!(count = calls.len(), "Not signed in, dropping remote calls");
            return;
        };
        for call in calls {
            dispatch::dispatch(&client, call, device_id.clone());
        }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string();

        if error_str.contains("404") {
            "Not found. The playlist or device may no longer exist.".to_string()
        } else if error_str.contains("403") {
            "Action forbidden. Check your Spotify Premium status and playlist ownership.".to_string()
        } else if error_str.contains("401") {
            "Authentication expired. Please restart the app.".to_string()
        } else if error_str.contains("429") {
            "Rate limited. Please wait a moment.".to_string()
        } else {
            format!("Error: {}", error_str)
        }
    }
}

#[cfg(test)]
mod tests;
