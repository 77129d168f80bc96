//! Local playback device startup and discovery

use std::time::Duration;

use crate::audio::PlaybackDevice;
use crate::auth::AuthResult;
use crate::model::{CollectionApi, DeviceStatus};
use super::AppController;

impl AppController {
    pub async fn start_playback_device(&self, auth: AuthResult) {
        match PlaybackDevice::connect(auth, &self.settings.player).await {
            Ok(device) => {
                let name = device.name().to_string();
                tracing::info!(user = %device.username(), "librespot session established");
                *self.playback_device.lock().await = Some(device);
                self.discover_device_id(&name).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Playback device init failed");
                let model = self.model.lock().await;
                model.set_device_status(DeviceStatus::Unavailable).await;
                model.set_error(format!("Audio init failed: {}", e)).await;
            }
        }
    }
}

impl<A: CollectionApi> AppController<A> {
    /// The device shows up in the Web API device list shortly after it
    /// registers; poll for it a bounded number of times.
    pub(super) async fn discover_device_id(&self, name: &str) {
        let api = match self.model.lock().await.network_client().await {
            Ok(api) => api,
            Err(_) => return,
        };
        let attempts = self.settings.player.discovery_attempts;
        let interval = Duration::from_millis(self.settings.player.discovery_interval_ms);

        for attempt in 1..=attempts {
            match api.find_device_id(name).await {
                Ok(Some(id)) => {
                    tracing::info!(device_id = %id, attempt, "Playback device ready");
                    let model = self.model.lock().await;
                    model
                        .set_device_status(DeviceStatus::Ready {
                            id,
                            name: name.to_string(),
                        })
                        .await;
                    return;
                }
                Ok(None) => tracing::debug!(attempt, "Playback device not listed yet"),
                Err(e) => tracing::warn!(attempt, error = %e, "Device lookup failed"),
            }
            tokio::time::sleep(interval).await;
        }

        tracing::error!(device_name = name, attempts, "Playback device never appeared");
        let model = self.model.lock().await;
        model.set_device_status(DeviceStatus::Unavailable).await;
        model
            .set_error("Player not found. Tracks will not play while you triage.".to_string())
            .await;
    }
}
