use async_trait::async_trait;
use log::debug;
use rspotify::{
    ClientCredsSpotify, Config, Credentials,
    model::{Page, PlayableItem, PlaylistId, PlaylistItem},
    prelude::*,
};

use crate::{
    clients::{
        catalog::{Catalog, PageCursor, PlaylistPage, TrackPage},
        entities::Track,
        errors::{Error, Result},
    },
    playlist_id::PlaylistRef,
};

const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";

fn playable_to_track(item: PlaylistItem) -> Option<Track> {
    match item.track? {
        PlayableItem::Track(track) => Some(Track::from(track)),
        PlayableItem::Episode(episode) => Some(Track::from(episode)),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

fn page_to_tracks(playlist: &PlaylistRef, page: Page<PlaylistItem>) -> TrackPage {
    let next = page.next.as_ref().map(|_| PageCursor {
        playlist: playlist.clone(),
        offset: page.offset + page.limit,
        limit: page.limit,
    });
    TrackPage {
        items: page.items.into_iter().map(playable_to_track).collect(),
        next,
    }
}

fn playlist_id(id: &PlaylistRef) -> Result<PlaylistId<'_>> {
    PlaylistId::from_id(id.as_str())
        .map_err(|e| Error::SpotifyApi(format!("invalid playlist id {id}: {e}")))
}

pub struct SpotifyClient {
    pub spotify: ClientCredsSpotify,
}

impl SpotifyClient {
    pub fn new(spotify: ClientCredsSpotify) -> Self {
        SpotifyClient { spotify }
    }

    // Request the app token. Refreshing afterwards is handled by rspotify.
    pub async fn authorize_client(&self) -> Result<()> {
        debug!("Requesting Spotify client credentials token ...");
        self.spotify.request_token().await?;
        debug!("Spotify client credentials token obtained");
        Ok(())
    }

    // Create a SpotifyClient from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        let client_id = required_var(CLIENT_ID_VAR)?;
        let client_secret = required_var(CLIENT_SECRET_VAR)?;

        let spotify = ClientCredsSpotify::with_config(
            Credentials::new(&client_id, &client_secret),
            Config {
                token_refreshing: true,
                ..Default::default()
            },
        );

        Ok(Self::new(spotify))
    }
}

fn required_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) | Err(std::env::VarError::NotPresent) => Err(Error::ConfigurationError(format!(
            "Spotify API credentials are missing. Set {CLIENT_ID_VAR} and {CLIENT_SECRET_VAR} ({name} is not set)."
        ))),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn playlist(&self, id: &PlaylistRef) -> Result<PlaylistPage> {
        let playlist = self.spotify.playlist(playlist_id(id)?, None, None).await?;
        debug!(
            "Fetched playlist {:?} with {} tracks in total",
            playlist.name, playlist.tracks.total
        );
        Ok(PlaylistPage {
            tracks: page_to_tracks(id, playlist.tracks),
            name: playlist.name,
        })
    }

    async fn next_page(&self, cursor: &PageCursor) -> Result<TrackPage> {
        let page = self
            .spotify
            .playlist_items_manual(
                playlist_id(&cursor.playlist)?,
                None,
                None,
                Some(cursor.limit),
                Some(cursor.offset),
            )
            .await?;
        Ok(page_to_tracks(&cursor.playlist, page))
    }
}
