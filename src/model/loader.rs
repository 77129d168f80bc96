//! Collection loader: fetch one bounded window of a source.

use anyhow::Result;

use super::api::CollectionApi;
use super::types::{SortMode, Source, TrackEntry};

/// Spotify's page size limit for library and playlist items
pub const MAX_WINDOW: u32 = 50;

/// Identifies the selectors a load was started for. A result is only
/// installed if its ticket is still the session's current one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub source: Source,
    pub sort_mode: SortMode,
}

/// Offset of the oldest window of a collection with `total` entries.
pub fn oldest_window_offset(total: u32, window: u32) -> u32 {
    if total > window { total - window } else { 0 }
}

/// Load the window of `source` selected by `sort_mode`, in presentation order.
///
/// Newest-first reads the first page as the API returns it. Oldest-first
/// reads the total with a single-item request, reads the last `window`
/// entries and reverses them so the oldest comes first.
pub async fn load_window<A: CollectionApi>(
    api: &A,
    source: &Source,
    sort_mode: SortMode,
    window: u32,
) -> Result<Vec<TrackEntry>> {
    let window = window.clamp(1, MAX_WINDOW);

    let offset = match sort_mode {
        SortMode::NewestFirst => 0,
        SortMode::OldestFirst => {
            let head = api.fetch_page(source, 0, 1).await?;
            tracing::debug!(total = head.total, ?source, "Read collection size");
            oldest_window_offset(head.total, window)
        }
    };

    let page = api.fetch_page(source, offset, window).await?;
    let fetched = page.items.len();
    let mut entries: Vec<TrackEntry> = page.items.into_iter().flatten().collect();

    if sort_mode == SortMode::OldestFirst {
        entries.reverse();
    }

    tracing::info!(
        ?source,
        ?sort_mode,
        offset,
        fetched,
        kept = entries.len(),
        "Collection window loaded"
    );
    Ok(entries)
}
