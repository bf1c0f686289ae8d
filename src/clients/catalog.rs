use async_trait::async_trait;

use crate::{
    clients::{entities::Track, errors::Result},
    playlist_id::PlaylistRef,
};

/// Position of the next page of a playlist's track listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub playlist: PlaylistRef,
    pub offset: u32,
    pub limit: u32,
}

/// One page of playlist entries. `None` entries are tracks the catalog no
/// longer serves (removed, local files, region locked).
#[derive(Debug, Default)]
pub struct TrackPage {
    pub items: Vec<Option<Track>>,
    pub next: Option<PageCursor>,
}

/// Playlist lookup result: display name bundled with the first track page.
#[derive(Debug)]
pub struct PlaylistPage {
    pub name: String,
    pub tracks: TrackPage,
}

/// Read-only music catalog the exporter pulls playlists from.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn playlist(&self, id: &PlaylistRef) -> Result<PlaylistPage>;

    async fn next_page(&self, cursor: &PageCursor) -> Result<TrackPage>;
}
