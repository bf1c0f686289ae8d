//! CSV rendering of a playlist and the download filename derived from its name.

use csv::WriterBuilder;

use crate::clients::{
    entities::Track,
    errors::{Error, Result},
};

/// Header row of every exported file.
pub const CSV_HEADER: [&str; 4] = ["Name", "Artist", "Album", "Duration (ms)"];

const FILE_EXTENSION: &str = ".csv";
const FALLBACK_BASE_NAME: &str = "playlist";
const MAX_BASE_NAME_CHARS: usize = 150;
const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Render tracks as UTF-8 CSV. The header is written even when there are no tracks.
pub fn tracks_to_csv(tracks: &[Track]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for track in tracks {
        writer.serialize(track)?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::CsvError(csv::Error::from(e.into_error())))
}

/// Filesystem safe base name (no extension) for a playlist display name.
pub fn sanitize_base_name(name: &str) -> String {
    let base: String = name
        .trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_BASE_NAME_CHARS)
        .collect();
    if base.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        base
    }
}

/// Download filename for a playlist display name, always ending in a single `.csv`.
pub fn sanitize_filename(name: &str) -> String {
    format!("{}{FILE_EXTENSION}", sanitize_base_name(name))
}
