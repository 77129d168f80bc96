use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use librespot::core::{authentication::Credentials, cache::Cache};
use librespot_oauth::{OAuthClient, OAuthClientBuilder};
use rspotify::Token;

use crate::config::AuthSettings;

pub const SCOPES: &str = "user-read-email user-read-private user-library-read user-library-modify \
    playlist-read-private playlist-read-collaborative playlist-modify-public playlist-modify-private \
    streaming user-read-playback-state user-modify-playback-state user-read-currently-playing";

const RESPONSE: &str = r#"
<!doctype html>
<html>
<head><title>Signed in</title></head>
<body><h1>Signed in. You can return to the terminal.</h1><script>window.close();</script></body>
</html>
"#;
const REFRESH_TOKEN_FILE: &str = "refresh_token";
// Where librespot's Cache keeps reusable credentials inside its system location
const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Clone)]
pub struct AuthResult {
    pub librespot_credentials: Credentials,
    pub rspotify_token: Token,
    pub cache: Cache,
}

impl AuthResult {
    pub fn access_token(&self) -> &str {
        &self.rspotify_token.access_token
    }
}

fn open_cache(settings: &AuthSettings) -> Result<Cache> {
    let dir = Path::new(&settings.cache_dir);
    let files = dir.join("files");
    Ok(Cache::new(Some(dir), Some(dir), Some(files.as_path()), None)?)
}

fn refresh_token_path(settings: &AuthSettings) -> PathBuf {
    Path::new(&settings.cache_dir).join(REFRESH_TOKEN_FILE)
}

fn oauth_client(settings: &AuthSettings, browser: bool) -> Result<OAuthClient> {
    let builder = OAuthClientBuilder::new(
        &settings.client_id,
        &settings.redirect_uri,
        SCOPES.split_whitespace().collect(),
    );
    let builder = if browser {
        builder.open_in_browser().with_custom_message(RESPONSE)
    } else {
        builder
    };
    Ok(builder.build()?)
}

fn store_refresh_token(settings: &AuthSettings, refresh_token: &str) {
    match fs::write(refresh_token_path(settings), refresh_token) {
        Ok(()) => tracing::debug!("Saved refresh token to disk"),
        Err(e) => tracing::warn!(error = %e, "Could not save refresh token"),
    }
}

fn build_result(credentials: Credentials, access_token: String, cache: Cache) -> AuthResult {
    AuthResult {
        librespot_credentials: credentials,
        rspotify_token: Token {
            access_token,
            expires_in: chrono::Duration::seconds(3600),
            expires_at: Some(Utc::now() + chrono::Duration::seconds(3600)),
            scopes: SCOPES
                .split_whitespace()
                .map(|s| s.to_string())
                .collect::<HashSet<String>>(),
            refresh_token: None,
        },
        cache,
    }
}

/// Restore a previous session from the credential cache and stored refresh
/// token. `Ok(None)` means the user has to sign in.
pub async fn restore_session(settings: &AuthSettings) -> Result<Option<AuthResult>> {
    let cache = open_cache(settings)?;
    let stored_refresh_token = fs::read_to_string(refresh_token_path(settings)).ok();

    let (Some(credentials), Some(refresh_token)) = (cache.credentials(), stored_refresh_token) else {
        tracing::info!("No cached credentials found");
        return Ok(None);
    };

    tracing::info!("Found cached Librespot credentials and refresh token");
    let client = oauth_client(settings, false)?;

    match client.refresh_token_async(refresh_token.trim()).await {
        Ok(token) => {
            store_refresh_token(settings, &token.refresh_token);
            tracing::debug!("Token refreshed successfully");
            Ok(Some(build_result(credentials, token.access_token, cache)))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Cached refresh token failed, sign-in required");
            Ok(None)
        }
    }
}

/// Browser-based OAuth flow.
pub async fn sign_in(settings: &AuthSettings) -> Result<AuthResult> {
    tracing::info!("Starting browser-based OAuth flow");
    let cache = open_cache(settings)?;
    let client = oauth_client(settings, true)?;

    let token = client.get_access_token_async().await?;
    store_refresh_token(settings, &token.refresh_token);

    let credentials = Credentials::with_access_token(token.access_token.clone());
    tracing::info!("Browser authentication completed successfully");
    Ok(build_result(credentials, token.access_token, cache))
}

/// Forget the stored session: the refresh token and librespot's cached
/// credentials. Files that are already gone are fine.
pub fn sign_out(settings: &AuthSettings) -> Result<()> {
    let dir = Path::new(&settings.cache_dir);
    for path in [refresh_token_path(settings), dir.join(CREDENTIALS_FILE)] {
        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed stored session file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    tracing::info!("Stored session cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_in(dir: &Path) -> AuthSettings {
        AuthSettings {
            cache_dir: dir.to_string_lossy().into_owned(),
            ..AuthSettings::default()
        }
    }

    #[test]
    fn sign_out_removes_refresh_token_and_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        fs::write(dir.path().join(REFRESH_TOKEN_FILE), "refresh").unwrap();
        fs::write(dir.path().join(CREDENTIALS_FILE), "{}").unwrap();
        fs::write(dir.path().join("unrelated"), "keep").unwrap();

        sign_out(&settings).unwrap();

        assert!(!refresh_token_path(&settings).exists());
        assert!(!dir.path().join(CREDENTIALS_FILE).exists());
        assert!(dir.path().join("unrelated").exists());
    }

    #[test]
    fn sign_out_without_stored_session_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        assert!(sign_out(&settings_in(dir.path())).is_ok());
    }
}
