use serde::Deserialize;

use crate::model::{MAX_WINDOW, SortMode};

/// Top-level application settings loaded from `config.toml`.
///
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/spotify-triage/config.toml` or
/// `~/.config/spotify-triage/config.toml`.
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SPOTIFY_TRIAGE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auth: AuthSettings,
    pub session: SessionSettings,
    pub player: PlayerSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Spotify application client id used for the OAuth flow.
    pub client_id: String,
    /// Must be registered for the client id above.
    pub redirect_uri: String,
    /// Directory for the librespot credential cache and the refresh token.
    pub cache_dir: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            // librespot's keymaster client id; accepts the loopback redirect below
            client_id: "65b708073fc0480ea92a077233ca87bd".to_string(),
            redirect_uri: "http://127.0.0.1:8898/login".to_string(),
            cache_dir: ".cache".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Number of entries loaded per source (1..=50).
    pub window_size: u32,
    /// Sort mode the first load uses.
    pub sort_mode: SortMode,
    /// Use the first playlist as destination until another one is picked.
    pub auto_select_destination: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            window_size: MAX_WINDOW,
            sort_mode: SortMode::NewestFirst,
            auto_select_destination: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Name of the Spotify Connect device this app registers.
    pub device_name: String,
    pub bitrate: BitrateSetting,
    /// How many times to look for the device in the Web API device list.
    pub discovery_attempts: u32,
    pub discovery_interval_ms: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            device_name: "Spotify-Triage".to_string(),
            bitrate: BitrateSetting::High,
            discovery_attempts: 10,
            discovery_interval_ms: 500,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BitrateSetting {
    #[serde(alias = "96")]
    Low,
    #[serde(alias = "160")]
    Normal,
    #[serde(alias = "320")]
    High,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Directory for the daily rotated log files.
    pub directory: String,
    /// Filter used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: ".logs".to_string(),
            filter: "spotify_triage=debug,librespot=info,rspotify=info,warn".to_string(),
        }
    }
}
