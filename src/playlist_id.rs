//! Playlist identifier extraction from user supplied links.
//!
//! Two shapes are recognised, tried in order, first match wins:
//!
//! - an `open.spotify.com` link with a `playlist/<id>` path segment, possibly
//!   below further segments, e.g.
//!   `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=...` or
//!   `https://open.spotify.com/user/spotify/playlist/37i9dQZF1DXcBWIGoYBM5M`
//! - a URI of the form `spotify:playlist:<id>`
//!
//! Only substring presence is checked; the rest of the URL is not validated
//! and the input is matched as given (no trimming, no case folding).

use std::{fmt, sync::LazyLock};

use log::debug;
use regex::Regex;

/// Opaque catalog key of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistRef(String);

impl PlaylistRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlaylistRef {
    fn from(id: &str) -> Self {
        PlaylistRef(id.to_string())
    }
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which accepted input shape produced an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlShape {
    WebUrl,
    Uri,
}

struct Rule {
    shape: UrlShape,
    pattern: Regex,
}

impl Rule {
    fn new(shape: UrlShape, pattern: &str) -> Self {
        Rule {
            shape,
            pattern: Regex::new(pattern).expect("playlist id pattern must compile"),
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            UrlShape::WebUrl,
            r"open\.spotify\.com/(?:[^?#]*/)?playlist/([a-zA-Z0-9]+)",
        ),
        Rule::new(UrlShape::Uri, r"spotify:playlist:([a-zA-Z0-9]+)"),
    ]
});

/// Find the playlist identifier in `input` and report the shape it was found in.
pub fn detect(input: &str) -> Option<(UrlShape, PlaylistRef)> {
    RULES.iter().find_map(|rule| {
        rule.pattern
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|id| (rule.shape, PlaylistRef::from(id.as_str())))
    })
}

/// Extract the playlist identifier, or `None` when `input` has no accepted shape.
pub fn extract_playlist_id(input: &str) -> Option<PlaylistRef> {
    let (shape, id) = detect(input)?;
    debug!("Found playlist id {id} in {shape:?} input");
    Some(id)
}
