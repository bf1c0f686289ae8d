use rspotify::model::{FullEpisode, FullTrack};
use serde::{Deserialize, Serialize};

/// One export row. Field renames are the CSV column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "Name")]
    pub name: String,
    // all contributing artists, comma separated, in source order
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Album")]
    pub album: Option<String>,
    #[serde(rename = "Duration (ms)")]
    pub duration_ms: Option<i64>,
}

#[derive(Debug)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl From<FullTrack> for Track {
    fn from(f: FullTrack) -> Track {
        Track {
            artist: f
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            name: f.name,
            album: Some(f.album.name),
            duration_ms: Some(f.duration.num_milliseconds()),
        }
    }
}

// Podcast episodes have no artists or album, but still get a row
impl From<FullEpisode> for Track {
    fn from(f: FullEpisode) -> Track {
        Track {
            name: f.name,
            artist: String::new(),
            album: None,
            duration_ms: Some(f.duration.num_milliseconds()),
        }
    }
}
