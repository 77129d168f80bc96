use std::fs;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::AppController;
use crate::config::Settings;
use crate::error::SessionError;
use crate::model::test_support::{FakeApi, Recorded};
use crate::model::{AppModel, AuthState, DeviceStatus, Selectors, Source, SwipeAction};

fn quick_settings(cache_dir: Option<&Path>) -> Settings {
    let mut settings = Settings::default();
    settings.player.discovery_attempts = 1;
    settings.player.discovery_interval_ms = 0;
    if let Some(dir) = cache_dir {
        settings.auth.cache_dir = dir.to_string_lossy().into_owned();
    }
    settings
}

async fn signed_in_with(api: FakeApi, settings: Settings) -> AppController<FakeApi> {
    let mut model = AppModel::new(Selectors::default());
    model.set_client(api);
    model.authenticate("tok".into()).await;
    AppController::new(Arc::new(Mutex::new(model)), Arc::new(settings))
}

async fn signed_in(api: FakeApi) -> AppController<FakeApi> {
    signed_in_with(api, quick_settings(None)).await
}

/// Signed in, first window installed, player settled but not started.
async fn loaded(api: FakeApi) -> AppController<FakeApi> {
    let controller = signed_in(api).await;
    let ticket = controller.model.lock().await.begin_load().await;
    controller.load_collection(ticket).await;
    controller
        .model
        .lock()
        .await
        .set_device_status(DeviceStatus::Unavailable)
        .await;
    controller
}

async fn remaining(controller: &AppController<FakeApi>) -> (usize, usize) {
    let view = controller.model.lock().await.get_session_view().await;
    (view.remaining, view.undo_available)
}

#[tokio::test]
async fn superseded_load_is_discarded() {
    let api = FakeApi::with_library(120);
    let controller = signed_in(api.clone()).await;

    let stale = controller.model.lock().await.begin_load().await;
    let current = controller.model.lock().await.toggle_sort_mode().await;

    controller.load_collection(stale).await;
    let view = controller.model.lock().await.get_session_view().await;
    assert!(view.loading);
    assert_eq!(view.remaining, 0);

    controller.load_collection(current).await;
    let view = controller.model.lock().await.get_session_view().await;
    assert!(!view.loading);
    assert_eq!(view.remaining, 50);
    // Oldest first: the oldest of the last window is on top
    assert_eq!(view.top.map(|c| c.title), Some("Song t119".to_string()));

    assert!(api.recorded().contains(&Recorded::Fetch {
        source: Source::Library,
        offset: 0,
        limit: 50
    }));
}

#[tokio::test]
async fn failed_load_ends_loading_with_empty_stack() {
    let controller = signed_in(FakeApi::with_library(10).failing()).await;
    let ticket = controller.model.lock().await.begin_load().await;
    controller.load_collection(ticket).await;

    let view = controller.model.lock().await.get_session_view().await;
    assert!(!view.loading);
    assert_eq!(view.remaining, 0);
}

#[tokio::test]
async fn swipes_before_start_are_ignored() {
    let controller = loaded(FakeApi::with_library(3)).await;

    controller.swipe(SwipeAction::Reject).await;
    controller.swipe(SwipeAction::Keep).await;
    assert_eq!(remaining(&controller).await, (3, 0));

    controller.start_session().await;
    assert!(controller.model.lock().await.is_session_started().await);

    controller.swipe(SwipeAction::Reject).await;
    assert_eq!(remaining(&controller).await, (2, 1));
}

#[tokio::test]
async fn start_waits_for_the_player_to_settle() {
    let controller = loaded(FakeApi::with_library(3)).await;
    controller
        .model
        .lock()
        .await
        .set_device_status(DeviceStatus::Connecting)
        .await;

    controller.start_session().await;
    assert!(!controller.model.lock().await.is_session_started().await);
}

#[tokio::test]
async fn filing_without_destination_raises_prompt() {
    let controller = loaded(FakeApi::with_library(3)).await;
    controller.start_session().await;

    controller.swipe(SwipeAction::File).await;

    let ui_state = controller.model.lock().await.get_ui_state().await;
    assert_eq!(
        ui_state.prompt,
        Some(SessionError::MissingDestination.to_string())
    );
    assert_eq!(remaining(&controller).await, (3, 0));
}

#[tokio::test]
async fn playlists_load_picks_default_destination() {
    let api = FakeApi::default().with_playlists(&[("p1", "Road trip"), ("p2", "Focus")]);
    let controller = signed_in(api).await;

    controller.load_playlists().await;

    let model = controller.model.lock().await;
    assert_eq!(model.selectors().await.destination.as_deref(), Some("p1"));
    assert_eq!(model.get_ui_state().await.playlists.len(), 2);
}

#[tokio::test]
async fn playlist_failure_shows_error() {
    let controller = signed_in(FakeApi::default().failing()).await;
    controller.load_playlists().await;

    let model = controller.model.lock().await;
    assert!(model.has_error().await);
    assert!(model.selectors().await.destination.is_none());
}

#[tokio::test]
async fn device_discovery_marks_player_ready() {
    let controller = signed_in(FakeApi::default().with_device("Spotify-Triage", "dev-1")).await;
    controller.discover_device_id("Spotify-Triage").await;

    assert_eq!(
        controller.model.lock().await.get_device_status().await,
        DeviceStatus::Ready {
            id: "dev-1".into(),
            name: "Spotify-Triage".into()
        }
    );
}

#[tokio::test]
async fn missing_device_is_unavailable() {
    let controller = signed_in(FakeApi::default()).await;
    controller.discover_device_id("Spotify-Triage").await;

    let model = controller.model.lock().await;
    assert_eq!(model.get_device_status().await, DeviceStatus::Unavailable);
    assert!(model.has_error().await);
}

#[tokio::test]
async fn sign_out_clears_gate_and_stored_session() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("refresh_token"), "refresh").unwrap();
    let controller =
        signed_in_with(FakeApi::with_library(3), quick_settings(Some(dir.path()))).await;
    let ticket = controller.model.lock().await.begin_load().await;
    controller.load_collection(ticket).await;

    controller.sign_out().await;

    let model = controller.model.lock().await;
    assert_eq!(model.get_auth_state().await, AuthState::Unauthenticated);
    assert!(model.network_client().await.is_err());
    assert_eq!(model.get_session_view().await.remaining, 0);
    assert!(!dir.path().join("refresh_token").exists());
    assert!(controller.playback_device.lock().await.is_none());
}
