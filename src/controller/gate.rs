//! Sign-in and session restore

use anyhow::{Result, anyhow};
use rspotify::{AuthCodeSpotify, Config, Token, clients::OAuthClient};

use crate::auth::{self, AuthResult};
use crate::model::{CollectionApi, SpotifyClient};
use super::AppController;

async fn setup_rspotify(access_token: Token) -> Result<AuthCodeSpotify> {
    let spotify = AuthCodeSpotify::with_config(
        Default::default(),
        Default::default(),
        Config {
            token_cached: false,
            token_refreshing: false,
            ..Default::default()
        },
    );

    *spotify
        .token
        .lock()
        .await
        .map_err(|_| anyhow!("rspotify token lock poisoned"))? = Some(access_token);
    tracing::debug!("rspotify client initialized");
    Ok(spotify)
}

impl AppController {
    /// Startup path: try the cached session, otherwise wait for a sign-in.
    pub async fn restore_session(&self) {
        match auth::restore_session(&self.settings.auth).await {
            Ok(Some(result)) => self.complete_authentication(result).await,
            Ok(None) => {
                self.model.lock().await.reject_auth().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Session restore failed");
                self.model.lock().await.reject_auth().await;
            }
        }
    }

    /// Browser sign-in. Ignored unless the gate is unauthenticated.
    pub async fn sign_in(&self) {
        if !self.model.lock().await.begin_sign_in().await {
            return;
        }

        match auth::sign_in(&self.settings.auth).await {
            Ok(result) => self.complete_authentication(result).await,
            Err(e) => {
                tracing::error!(error = %e, "Sign-in failed");
                let model = self.model.lock().await;
                model.reject_auth().await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    async fn complete_authentication(&self, result: AuthResult) {
        let rspotify_client = match setup_rspotify(result.rspotify_token.clone()).await {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "rspotify init failed");
                self.model.lock().await.reject_auth().await;
                return;
            }
        };

        match rspotify_client.me().await {
            Ok(user) => tracing::info!(user_id = %user.id, "rspotify authorized successfully"),
            Err(e) => {
                tracing::error!(error = %e, "rspotify authentication failed");
                self.model.lock().await.reject_auth().await;
                return;
            }
        }

        let ticket = {
            let mut model = self.model.lock().await;
            model.set_client(SpotifyClient::new(rspotify_client));
            model.authenticate(result.access_token().to_string()).await;
            model.begin_load().await
        };

        self.spawn_load(ticket);

        let controller = self.clone();
        tokio::spawn(async move {
            controller.load_playlists().await;
        });

        let controller = self.clone();
        tokio::spawn(async move {
            controller.start_playback_device(result).await;
        });
    }
}

impl<A: CollectionApi> AppController<A> {
    /// Forget the stored session, stop the playback device and go back to the
    /// sign-in screen.
    pub async fn sign_out(&self) {
        if let Err(e) = auth::sign_out(&self.settings.auth) {
            tracing::warn!(error = %e, "Could not clear stored session");
        }

        if let Some(device) = self.playback_device.lock().await.take() {
            device.shutdown();
        }

        self.model.lock().await.sign_out().await;
        tracing::info!("Signed out");
    }
}
