//! Detached execution of remote calls.
//!
//! A transition has already changed local state by the time its calls are
//! dispatched. Each call runs on its own task; failures are logged and
//! dropped, never retried and never reported back to the session.

use anyhow::Result;
use tokio::task::JoinHandle;

use crate::model::{CollectionApi, RemoteCall};

/// Run `call` against `api`. Returns `Ok(false)` when it was skipped
/// (an echo with no playback device).
pub async fn execute<A: CollectionApi>(
    api: &A,
    call: &RemoteCall,
    device_id: Option<&str>,
) -> Result<bool> {
    match call {
        RemoteCall::Remove { source, entry } => api.remove_track(source, entry).await?,
        RemoteCall::Restore { source, entry } => api.restore_track(source, entry).await?,
        RemoteCall::AddToPlaylist { playlist_id, entry } => {
            api.add_to_playlist(playlist_id, entry.uri()).await?
        }
        RemoteCall::Echo { uri } => {
            let Some(device_id) = device_id else {
                return Ok(false);
            };
            api.play_uri(device_id, uri).await?
        }
    }
    Ok(true)
}

pub fn dispatch<A: CollectionApi>(
    api: &A,
    call: RemoteCall,
    device_id: Option<String>,
) -> JoinHandle<()> {
    let api = api.clone();
    tokio::spawn(async move {
        let name = call.name();
        match execute(&api, &call, device_id.as_deref()).await {
            Ok(true) => tracing::debug!(call = name, "Remote call completed"),
            Ok(false) => tracing::trace!(call = name, "Remote call skipped, no playback device"),
            Err(e) => tracing::warn!(call = name, error = %e, "Remote call failed, local state kept"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;
    use crate::model::test_support::{FakeApi, Recorded, entry};

    #[tokio::test]
    async fn remove_from_library_uses_track_id() {
        let api = FakeApi::default();
        let call = RemoteCall::Remove {
            source: Source::Library,
            entry: entry("abc"),
        };
        dispatch(&api, call, None).await.unwrap();

        assert_eq!(
            api.recorded(),
            vec![Recorded::Remove {
                source: Source::Library,
                track_id: "abc".into()
            }]
        );
    }

    #[tokio::test]
    async fn file_adds_uri_to_destination() {
        let api = FakeApi::default();
        let call = RemoteCall::AddToPlaylist {
            playlist_id: "dest".into(),
            entry: entry("abc"),
        };
        dispatch(&api, call, None).await.unwrap();

        assert_eq!(
            api.recorded(),
            vec![Recorded::Add {
                playlist_id: "dest".into(),
                uri: "spotify:track:abc".into()
            }]
        );
    }

    #[tokio::test]
    async fn echo_without_device_is_skipped() {
        let api = FakeApi::default();
        let call = RemoteCall::Echo {
            uri: "spotify:track:abc".into(),
        };
        assert!(!execute(&api, &call, None).await.unwrap());
        assert!(api.recorded().is_empty());

        assert!(execute(&api, &call, Some("dev")).await.unwrap());
        assert_eq!(
            api.recorded(),
            vec![Recorded::Play {
                device_id: "dev".into(),
                uri: "spotify:track:abc".into()
            }]
        );
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let api = FakeApi::default().failing();
        let call = RemoteCall::Restore {
            source: Source::Playlist("p".into()),
            entry: entry("abc"),
        };

        assert!(execute(&api, &call, None).await.is_err());
        // The detached task logs and finishes normally
        assert!(dispatch(&api, call, None).await.is_ok());
    }
}
