//! Local Spotify Connect device the playback echo plays on.

use anyhow::{Result, anyhow};
use librespot::connect::{ConnectConfig, Spirc};
use librespot::core::config::SessionConfig;
use librespot::core::session::Session;
use librespot::playback::config::{AudioFormat, Bitrate, PlayerConfig};
use librespot::playback::mixer::{MixerConfig, NoOpVolume};
use librespot::playback::player::Player;
use librespot::playback::{audio_backend, mixer};
use std::sync::Arc;

use crate::auth::AuthResult;
use crate::config::{BitrateSetting, PlayerSettings};

pub struct PlaybackDevice {
    name: String,
    session: Session,
    _player: Arc<Player>,
    spirc: Spirc,
}

impl PlaybackDevice {
    pub async fn connect(auth: AuthResult, settings: &PlayerSettings) -> Result<Self> {
        tracing::info!(device_name = %settings.device_name, "Connecting librespot device");

        let session_config = SessionConfig {
            device_id: Self::device_id(&settings.device_name),
            ..Default::default()
        };

        let player_config = PlayerConfig {
            bitrate: match settings.bitrate {
                BitrateSetting::Low => Bitrate::Bitrate96,
                BitrateSetting::Normal => Bitrate::Bitrate160,
                BitrateSetting::High => Bitrate::Bitrate320,
            },
            ..Default::default()
        };
        let connect_config = ConnectConfig {
            name: settings.device_name.clone(),
            ..Default::default()
        };
        let audio_format = AudioFormat::default();
        let sink_builder =
            audio_backend::find(None).ok_or_else(|| anyhow!("No audio backend available"))?;
        let mixer_builder = mixer::find(None).ok_or_else(|| anyhow!("No mixer available"))?;

        let session = Session::new(session_config, Some(auth.cache));
        let mixer = mixer_builder(MixerConfig::default())?;

        let player = Player::new(
            player_config,
            session.clone(),
            Box::new(NoOpVolume),
            move || sink_builder(None, audio_format),
        );

        let (spirc, spirc_task) = Spirc::new(
            connect_config,
            session.clone(),
            auth.librespot_credentials,
            player.clone(),
            mixer,
        )
        .await?;

        spirc.activate()?;

        tokio::spawn(async move {
            spirc_task.await;
            tracing::debug!("Spirc task finished");
        });

        tracing::info!(device_name = %settings.device_name, "Playback device registered");

        Ok(Self {
            name: settings.device_name.clone(),
            session,
            _player: player,
            spirc,
        })
    }

    /// Stable per-machine device id
    fn device_id(device_name: &str) -> String {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        format!("{}-{}", device_name, hostname)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> String {
        self.session.username()
    }

    /// Unregister the Connect device. The spirc task ends on its own.
    pub fn shutdown(&self) {
        if let Err(e) = self.spirc.shutdown() {
            tracing::warn!(error = %e, "Spirc shutdown failed");
        }
    }
}
