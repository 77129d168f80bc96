use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::model::MAX_WINDOW;

const APP_DIR: &str = "spotify-triage";
const ENV_PREFIX: &str = "SPOTIFY_TRIAGE";
const CONFIG_PATH_VAR: &str = "SPOTIFY_TRIAGE_CONFIG_PATH";

impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_WINDOW).contains(&self.session.window_size) {
            return Err(format!("session.window_size must be within 1..={MAX_WINDOW}"));
        }
        if self.player.device_name.trim().is_empty() {
            return Err("player.device_name must not be empty".to_string());
        }
        if self.player.discovery_attempts == 0 {
            return Err("player.discovery_attempts must be >= 1".to_string());
        }
        if self.auth.client_id.trim().is_empty() {
            return Err("auth.client_id must not be empty".to_string());
        }
        Ok(())
    }
}

/// Load and validate settings. Runs before logging is up, so problems go to
/// stderr and the defaults are used instead.
pub fn load_settings() -> Settings {
    match Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("spotify-triage: invalid config, using defaults: {msg}");
                Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            eprintln!("spotify-triage: failed to load config, using defaults: {e}");
            Settings::default()
        }
    }
}

/// Resolve the config path from `SPOTIFY_TRIAGE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join(APP_DIR).join("config.toml"))
}
