//! Collection loading and swipe transitions

use crate::model::{CollectionApi, DeviceStatus, LoadTicket, PickerChoice, SwipeAction, load_window};
use super::AppController;

pub const PLAYLIST_LIMIT: u32 = 50;

impl<A: CollectionApi> AppController<A> {
    /// Load the window for `ticket` in the background. The result is dropped
    /// if the selectors changed again before it arrived.
    pub(crate) fn spawn_load(&self, ticket: LoadTicket) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.load_collection(ticket).await;
        });
    }

    pub(super) async fn load_collection(&self, ticket: LoadTicket) {
        let api = match self.model.lock().await.network_client().await {
            Ok(api) => api,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping collection load");
                return;
            }
        };

        let window = self.settings.session.window_size;
        tracing::debug!(generation = ticket.generation, source = ?ticket.source, sort_mode = ?ticket.sort_mode, "Loading collection");

        match load_window(&api, &ticket.source, ticket.sort_mode, window).await {
            Ok(entries) => {
                let model = self.model.lock().await;
                if !model.install_window(&ticket, entries).await {
                    tracing::debug!(generation = ticket.generation, "Discarding superseded load");
                }
            }
            Err(e) => {
                tracing::error!(generation = ticket.generation, error = %e, "Collection load failed");
                self.model.lock().await.fail_load(&ticket).await;
            }
        }
    }

    pub async fn load_playlists(&self) {
        let model = self.model.lock().await;
        let api = match model.network_client().await {
            Ok(api) => api,
            Err(_) => return,
        };
        drop(model);

        match api.user_playlists(PLAYLIST_LIMIT).await {
            Ok(playlists) => {
                tracing::info!(count = playlists.len(), "Playlists loaded");
                let model = self.model.lock().await;
                model
                    .set_playlists(playlists, self.settings.session.auto_select_destination)
                    .await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not load playlists");
                let model = self.model.lock().await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    pub async fn apply_picker_choice(&self) {
        let model = self.model.lock().await;
        let Some(choice) = model.take_picker_choice().await else {
            return;
        };

        match choice {
            PickerChoice::Source(source) => {
                if model.selectors().await.source == source {
                    return;
                }
                tracing::info!(?source, "Source changed");
                let ticket = model.set_source(source).await;
                drop(model);
                self.spawn_load(ticket);
            }
            PickerChoice::Destination(playlist_id) => {
                tracing::info!(playlist_id, "Destination changed");
                model.set_destination(Some(playlist_id)).await;
            }
        }
    }

    pub async fn toggle_sort_mode(&self) {
        let model = self.model.lock().await;
        let ticket = model.toggle_sort_mode().await;
        tracing::info!(sort_mode = ?ticket.sort_mode, "Sort mode changed");
        drop(model);
        self.spawn_load(ticket);
    }

    /// Open the start gate once the player has settled (ready or failed).
    pub async fn start_session(&self) {
        let model = self.model.lock().await;
        if model.get_device_status().await == DeviceStatus::Connecting {
            return;
        }
        let Some(echo) = model.start_session().await else {
            return;
        };
        tracing::info!("Triage session started");

        let client = model.network_client().await.ok();
        let device_id = model.device_id().await;
        drop(model);
        Self::dispatch_all(client, device_id, vec![echo]);
    }

    pub async fn swipe(&self, action: SwipeAction) {
        let model = self.model.lock().await;
        if !model.is_session_started().await {
            return;
        }

        match model.apply_action(action).await {
            Ok(transition) => {
                if let (Some(decision), Some(entry)) = (transition.decision, &transition.entry) {
                    tracing::info!(
                        track_id = %entry.track.id,
                        track = %entry.track.name,
                        ?decision,
                        "Track decided"
                    );
                }
                let client = model.network_client().await.ok();
                let device_id = model.device_id().await;
                drop(model);
                Self::dispatch_all(client, device_id, transition.effects);
            }
            Err(e) => {
                tracing::info!(?action, error = %e, "Transition blocked");
                model.set_prompt(e.to_string()).await;
            }
        }
    }
}
