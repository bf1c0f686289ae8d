//! Single page web form: `GET /` shows the form, `POST /` turns the submitted
//! playlist link into a CSV download or re-renders the form with a message.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    http::{HeaderValue, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::{debug, error, info, warn};
use serde::Deserialize;

use crate::{
    clients::{catalog::Catalog, errors::Result},
    export::{sanitize_filename, tracks_to_csv},
    fetcher::PlaylistFetcher,
    playlist_id::extract_playlist_id,
};

pub const MISSING_URL_MESSAGE: &str = "Please enter a Spotify playlist URL.";
pub const INVALID_URL_MESSAGE: &str = "Invalid Spotify playlist URL.";
pub const SPOTIFY_API_MESSAGE: &str = "An error occurred with the Spotify API.";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing the playlist.";

const FALLBACK_DISPOSITION: &str = "attachment; filename=playlist.csv";

/// Shared state handed to every request. Only holds read-only collaborators.
#[derive(Clone)]
pub struct AppState {
    fetcher: Arc<PlaylistFetcher>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            fetcher: Arc::new(PlaylistFetcher::new(catalog)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExportForm {
    playlist_url: Option<String>,
}

struct Flash {
    category: &'static str,
    message: &'static str,
}

impl Flash {
    fn danger(message: &'static str) -> Self {
        Flash {
            category: "danger",
            message,
        }
    }
}

pub fn router(catalog: Arc<dyn Catalog>) -> Router {
    Router::new()
        .route("/", get(index).post(export))
        .with_state(AppState::new(catalog))
}

pub async fn serve(addr: SocketAddr, catalog: Arc<dyn Catalog>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Server started. Go to http://localhost:{}/ in your browser.",
        addr.port()
    );
    axum::serve(listener, router(catalog))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

async fn index() -> Html<String> {
    render_page(None)
}

// A body that is not a urlencoded form counts as an empty submission
async fn export(
    State(state): State<AppState>,
    form: std::result::Result<Form<ExportForm>, FormRejection>,
) -> Response {
    let playlist_url = match form {
        Ok(Form(form)) => form.playlist_url.unwrap_or_default(),
        Err(rejection) => {
            debug!("Unreadable export form: {rejection}");
            String::new()
        }
    };
    if playlist_url.is_empty() {
        return render_page(Some(&Flash::danger(MISSING_URL_MESSAGE))).into_response();
    }

    let Some(playlist_id) = extract_playlist_id(&playlist_url) else {
        info!("Rejected playlist URL {playlist_url:?}");
        return render_page(Some(&Flash::danger(INVALID_URL_MESSAGE))).into_response();
    };

    let result = match state.fetcher.fetch(&playlist_id).await {
        Ok(playlist) => tracks_to_csv(&playlist.tracks).map(|body| (playlist.name, body)),
        Err(e) => Err(e),
    };

    match result {
        Ok((name, body)) => csv_download(&name, body),
        Err(e) if e.is_upstream_rejection() => {
            warn!("Spotify API error for playlist {playlist_id}: {e}");
            render_page(Some(&Flash::danger(SPOTIFY_API_MESSAGE))).into_response()
        }
        Err(e) => {
            error!("Error processing playlist {playlist_id}: {e:?}");
            render_page(Some(&Flash::danger(GENERIC_ERROR_MESSAGE))).into_response()
        }
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// `Content-Disposition` value for a download. Plain tokens stay unquoted,
/// other ASCII names are quoted, and non-ASCII names get an ASCII fallback
/// plus an RFC 5987 `filename*` parameter.
fn content_disposition(filename: &str) -> String {
    if !filename.is_empty() && filename.chars().all(is_token_char) {
        return format!("attachment; filename={filename}");
    }
    if filename.is_ascii() {
        return format!("attachment; filename={}", quoted(filename));
    }
    let ascii: String = filename.chars().filter(char::is_ascii).collect();
    let fallback = match ascii.strip_suffix(".csv") {
        Some(stem) if stem.chars().any(|c| c.is_ascii_alphanumeric()) => ascii.clone(),
        _ => "playlist.csv".to_string(),
    };
    format!(
        "attachment; filename={}; filename*=UTF-8''{}",
        quoted(&fallback),
        urlencoding::encode(filename)
    )
}

fn csv_download(playlist_name: &str, body: Vec<u8>) -> Response {
    let filename = sanitize_filename(playlist_name);
    let disposition = HeaderValue::from_str(&content_disposition(&filename))
        .unwrap_or_else(|e| {
            warn!("Cannot use {filename:?} as download name ({e}), falling back to playlist.csv");
            HeaderValue::from_static(FALLBACK_DISPOSITION)
        });
    info!("Sending {filename} ({} bytes)", body.len());
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn render_page(flash: Option<&Flash>) -> Html<String> {
    let flash_html = flash
        .map(|f| {
            format!(
                r#"<div class="alert alert-{}" role="alert">{}</div>"#,
                f.category, f.message
            )
        })
        .unwrap_or_default();
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Spotify Playlist Exporter</title>
</head>
<body>
  <main>
    <h1>Spotify Playlist Exporter</h1>
    {flash_html}
    <form method="post" action="/">
      <label for="playlist_url">Playlist URL</label>
      <input type="text" id="playlist_url" name="playlist_url"
             placeholder="https://open.spotify.com/playlist/..." required>
      <button type="submit">Export to CSV</button>
    </form>
  </main>
</body>
</html>
"#
    ))
}
