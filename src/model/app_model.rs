//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::error::SessionError;

use super::api::{CollectionApi, RemoteCall};
use super::cards::CardFace;
use super::gate::{AuthState, SessionGate};
use super::loader::LoadTicket;
use super::session::{SwipeAction, SwipeSession, Transition};
use super::spotify_client::SpotifyClient;
use super::types::{
    DeviceStatus, Picker, PickerChoice, PickerKind, PlaylistItem, Selectors, SortMode, Source, TrackEntry,
    UiState,
};

pub const LIBRARY_LABEL: &str = "Liked Songs";

/// What the view needs to know about the swipe session
#[derive(Clone, Debug)]
pub struct SessionView {
    pub source_label: String,
    pub destination_label: Option<String>,
    pub sort_mode: SortMode,
    pub top: Option<CardFace>,
    pub remaining: usize,
    pub undo_available: usize,
    pub started: bool,
    pub loading: bool,
    pub exhausted: bool,
}

/// Main application model containing all state
pub struct AppModel<A = SpotifyClient> {
    client: Option<A>,
    gate: Arc<Mutex<SessionGate>>,
    session: Arc<Mutex<SwipeSession>>,
    device: Arc<Mutex<DeviceStatus>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl<A: CollectionApi> AppModel<A> {
    pub fn new(selectors: Selectors) -> Self {
        Self {
            client: None,
            gate: Arc::new(Mutex::new(SessionGate::new())),
            session: Arc::new(Mutex::new(SwipeSession::new(selectors))),
            device: Arc::new(Mutex::new(DeviceStatus::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_client(&mut self, client: A) {
        self.client = Some(client);
    }

    /// The client, but only while the gate lets network calls through.
    pub async fn network_client(&self) -> Result<A, SessionError> {
        self.gate.lock().await.access_token()?;
        self.client.clone().ok_or(SessionError::NotAuthenticated)
    }

    // ========================================================================
    // Session gate
    // ========================================================================

    pub async fn get_auth_state(&self) -> AuthState {
        self.gate.lock().await.state().clone()
    }

    pub async fn begin_sign_in(&self) -> bool {
        self.gate.lock().await.begin_sign_in()
    }

    pub async fn authenticate(&self, access_token: String) {
        self.gate.lock().await.authenticate(access_token);
    }

    pub async fn reject_auth(&self) {
        self.gate.lock().await.reject();
    }

    /// Back to the sign-in screen. Drops the client along with everything
    /// loaded through it.
    pub async fn sign_out(&mut self) {
        self.client = None;
        self.gate.lock().await.reject();
        {
            let mut session = self.session.lock().await;
            session.close_start_gate();
            session.begin_load();
        }
        *self.device.lock().await = DeviceStatus::Connecting;

        let mut state = self.ui_state.lock().await;
        state.playlists.clear();
        state.picker = None;
        state.prompt = None;
    }

    // ========================================================================
    // Swipe session
    // ========================================================================

    pub async fn selectors(&self) -> Selectors {
        self.session.lock().await.selectors().clone()
    }

    pub async fn begin_load(&self) -> LoadTicket {
        self.session.lock().await.begin_load()
    }

    pub async fn set_source(&self, source: Source) -> LoadTicket {
        self.session.lock().await.set_source(source)
    }

    pub async fn toggle_sort_mode(&self) -> LoadTicket {
        self.session.lock().await.toggle_sort_mode()
    }

    pub async fn set_destination(&self, destination: Option<String>) {
        self.session.lock().await.set_destination(destination);
    }

    pub async fn install_window(&self, ticket: &LoadTicket, entries: Vec<TrackEntry>) -> bool {
        self.session.lock().await.install(ticket, entries)
    }

    pub async fn fail_load(&self, ticket: &LoadTicket) -> bool {
        self.session.lock().await.fail_load(ticket)
    }

    pub async fn is_session_started(&self) -> bool {
        self.session.lock().await.is_started()
    }

    pub async fn start_session(&self) -> Option<RemoteCall> {
        self.session.lock().await.start()
    }

    pub async fn apply_action(&self, action: SwipeAction) -> Result<Transition, SessionError> {
        self.session.lock().await.apply(action)
    }

    pub async fn get_session_view(&self) -> SessionView {
        let session = self.session.lock().await;
        let ui_state = self.ui_state.lock().await;
        let selectors = session.selectors();

        let source_label = match &selectors.source {
            Source::Library => LIBRARY_LABEL.to_string(),
            Source::Playlist(id) => ui_state.playlist_name(id).unwrap_or(id).to_string(),
        };
        let destination_label = selectors
            .destination
            .as_deref()
            .map(|id| ui_state.playlist_name(id).unwrap_or(id).to_string());

        SessionView {
            source_label,
            destination_label,
            sort_mode: selectors.sort_mode,
            top: session.top_card().cloned(),
            remaining: session.stack_len(),
            undo_available: session.history_len(),
            started: session.is_started(),
            loading: session.is_loading(),
            exhausted: session.is_exhausted(),
        }
    }

    // ========================================================================
    // Playback device
    // ========================================================================

    pub async fn set_device_status(&self, status: DeviceStatus) {
        *self.device.lock().await = status;
    }

    pub async fn get_device_status(&self) -> DeviceStatus {
        self.device.lock().await.clone()
    }

    pub async fn device_id(&self) -> Option<String> {
        self.device.lock().await.device_id().map(str::to_string)
    }

    // ========================================================================
    // Playlists & pickers
    // ========================================================================

    /// Store the playlist directory. With `auto_select_destination`, the first
    /// playlist becomes the destination unless one is already chosen.
    pub async fn set_playlists(&self, playlists: Vec<PlaylistItem>, auto_select_destination: bool) {
        let first = playlists.first().map(|p| p.id.clone());
        self.ui_state.lock().await.playlists = playlists;

        if auto_select_destination {
            let mut session = self.session.lock().await;
            if session.selectors().destination.is_none() {
                session.set_destination(first);
            }
        }
    }

    pub async fn open_picker(&self, kind: PickerKind) {
        let selectors = self.selectors().await;
        let mut state = self.ui_state.lock().await;

        let current = match kind {
            PickerKind::Source => match &selectors.source {
                Source::Library => Some(0),
                Source::Playlist(id) => state.playlists.iter().position(|p| &p.id == id).map(|i| i + 1),
            },
            PickerKind::Destination => selectors
                .destination
                .as_ref()
                .and_then(|id| state.playlists.iter().position(|p| &p.id == id)),
        };

        if state.picker_len(kind) == 0 {
            state.error_message = Some("No playlists available".to_string());
            state.error_timestamp = Some(Instant::now());
            return;
        }

        state.picker = Some(Picker {
            kind,
            selected: current.unwrap_or(0),
        });
    }

    pub async fn close_picker(&self) {
        self.ui_state.lock().await.picker = None;
    }

    pub async fn is_picker_open(&self) -> bool {
        self.ui_state.lock().await.picker.is_some()
    }

    pub async fn picker_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(picker) = state.picker.as_mut() {
            picker.selected = picker.selected.saturating_sub(1);
        }
    }

    pub async fn picker_move_down(&self) {
        let mut state = self.ui_state.lock().await;
        let Some(kind) = state.picker.as_ref().map(|p| p.kind) else {
            return;
        };
        let last = state.picker_len(kind).saturating_sub(1);
        if let Some(picker) = state.picker.as_mut() {
            if picker.selected < last {
                picker.selected += 1;
            }
        }
    }

    /// Close the picker and return what was chosen in it.
    pub async fn take_picker_choice(&self) -> Option<PickerChoice> {
        let mut state = self.ui_state.lock().await;
        let picker = state.picker.take()?;

        match picker.kind {
            PickerKind::Source if picker.selected == 0 => Some(PickerChoice::Source(Source::Library)),
            PickerKind::Source => state
                .playlists
                .get(picker.selected - 1)
                .map(|p| PickerChoice::Source(Source::Playlist(p.id.clone()))),
            PickerKind::Destination => state
                .playlists
                .get(picker.selected)
                .map(|p| PickerChoice::Destination(p.id.clone())),
        }
    }

    // ========================================================================
    // Prompts, errors, help
    // ========================================================================

    pub async fn set_prompt(&self, message: String) {
        self.ui_state.lock().await.prompt = Some(message);
    }

    pub async fn clear_prompt(&self) {
        self.ui_state.lock().await.prompt = None;
    }

    pub async fn has_prompt(&self) -> bool {
        self.ui_state.lock().await.prompt.is_some()
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{FakeApi, entry};

    fn new_model() -> AppModel<FakeApi> {
        AppModel::new(Selectors::default())
    }

    fn playlists() -> Vec<PlaylistItem> {
        vec![
            PlaylistItem { id: "p1".into(), name: "Road trip".into() },
            PlaylistItem { id: "p2".into(), name: "Focus".into() },
        ]
    }

    #[tokio::test]
    async fn network_client_requires_authentication() {
        let model = new_model();
        assert_eq!(model.network_client().await.err(), Some(SessionError::NotAuthenticated));

        model.authenticate("tok".into()).await;
        // Authenticated but no client yet
        assert!(model.network_client().await.is_err());
    }

    #[tokio::test]
    async fn first_playlist_becomes_default_destination() {
        let model = new_model();
        model.set_playlists(playlists(), true).await;
        assert_eq!(model.selectors().await.destination.as_deref(), Some("p1"));

        let view = model.get_session_view().await;
        assert_eq!(view.destination_label.as_deref(), Some("Road trip"));
        assert_eq!(view.source_label, "Liked Songs");
    }

    #[tokio::test]
    async fn auto_select_can_be_disabled() {
        let model = new_model();
        model.set_playlists(playlists(), false).await;
        assert!(model.selectors().await.destination.is_none());
    }

    #[tokio::test]
    async fn source_picker_offers_library_first() {
        let model = new_model();
        model.set_playlists(playlists(), true).await;

        model.open_picker(PickerKind::Source).await;
        assert_eq!(
            model.take_picker_choice().await,
            Some(PickerChoice::Source(Source::Library))
        );

        model.open_picker(PickerKind::Source).await;
        model.picker_move_down().await;
        model.picker_move_down().await;
        model.picker_move_down().await;
        assert_eq!(
            model.take_picker_choice().await,
            Some(PickerChoice::Source(Source::Playlist("p2".into())))
        );
        assert!(!model.is_picker_open().await);
    }

    #[tokio::test]
    async fn destination_picker_starts_on_current_destination() {
        let model = new_model();
        model.set_playlists(playlists(), false).await;
        model.set_destination(Some("p2".into())).await;

        model.open_picker(PickerKind::Destination).await;
        model.picker_move_down().await;
        assert_eq!(
            model.take_picker_choice().await,
            Some(PickerChoice::Destination("p2".into()))
        );
    }

    #[tokio::test]
    async fn empty_destination_picker_reports_error() {
        let model = new_model();
        model.open_picker(PickerKind::Destination).await;
        assert!(!model.is_picker_open().await);
        assert!(model.has_error().await);
    }

    #[tokio::test]
    async fn session_view_reflects_stack() {
        let model = new_model();
        let ticket = model.begin_load().await;
        assert!(model.get_session_view().await.loading);

        model.install_window(&ticket, vec![entry("a"), entry("b")]).await;
        model.apply_action(SwipeAction::Reject).await.unwrap();

        let view = model.get_session_view().await;
        assert_eq!(view.remaining, 1);
        assert_eq!(view.undo_available, 1);
        assert_eq!(view.top.map(|c| c.title), Some("Song b".to_string()));
        assert!(!view.exhausted);
    }

    #[tokio::test]
    async fn sign_out_returns_to_sign_in_and_forgets_the_session() {
        let mut model = new_model();
        model.set_client(FakeApi::default());
        model.authenticate("tok".into()).await;
        model.set_playlists(playlists(), true).await;
        model.set_device_status(DeviceStatus::Unavailable).await;
        let ticket = model.begin_load().await;
        model.install_window(&ticket, vec![entry("a"), entry("b")]).await;
        model.start_session().await;
        model.apply_action(SwipeAction::Reject).await.unwrap();

        model.sign_out().await;

        assert_eq!(model.get_auth_state().await, AuthState::Unauthenticated);
        assert_eq!(model.network_client().await.err(), Some(SessionError::NotAuthenticated));
        assert_eq!(model.get_device_status().await, DeviceStatus::Connecting);
        assert!(model.get_ui_state().await.playlists.is_empty());

        let view = model.get_session_view().await;
        assert_eq!(view.remaining, 0);
        assert_eq!(view.undo_available, 0);
        assert!(!view.started);
        // Selectors survive a sign-out
        assert_eq!(model.selectors().await.destination.as_deref(), Some("p1"));
    }
}
