use std::sync::Arc;

use log::{debug, info};

use crate::{
    clients::{
        catalog::Catalog,
        entities::{Playlist, Track},
        errors::Result,
    },
    playlist_id::PlaylistRef,
};

/// Walks a playlist's paged track listing and flattens it into export rows.
pub struct PlaylistFetcher {
    catalog: Arc<dyn Catalog>,
}

impl PlaylistFetcher {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        PlaylistFetcher { catalog }
    }

    // Any failing page aborts the whole fetch, so callers never see a partial listing
    pub async fn fetch(&self, id: &PlaylistRef) -> Result<Playlist> {
        debug!("Fetching playlist {id} ...");
        let first = self.catalog.playlist(id).await?;
        let name = first.name;
        let mut page = first.tracks;
        let mut tracks: Vec<Track> = Vec::new();
        let mut skipped = 0usize;
        let mut pages = 1usize;

        loop {
            let before = tracks.len();
            let entries = page.items.len();
            tracks.extend(page.items.into_iter().flatten());
            skipped += entries - (tracks.len() - before);

            let Some(cursor) = page.next else {
                break;
            };
            debug!("Fetching next page of {id} at offset {}", cursor.offset);
            page = self.catalog.next_page(&cursor).await?;
            pages += 1;
        }

        info!(
            "Fetched {} tracks from playlist {name:?} ({id}) in {pages} page(s), {skipped} unavailable entries skipped",
            tracks.len()
        );
        Ok(Playlist { name, tracks })
    }
}
