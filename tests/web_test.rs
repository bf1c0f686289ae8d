use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use playlist_export::{
    clients::{
        catalog::{Catalog, PageCursor, PlaylistPage, TrackPage},
        entities::Track,
        errors::{Error, Result},
    },
    playlist_id::PlaylistRef,
    web::{self, GENERIC_ERROR_MESSAGE, INVALID_URL_MESSAGE, MISSING_URL_MESSAGE, SPOTIFY_API_MESSAGE},
};
use tower::ServiceExt; // for oneshot()

// Helper function to create a test track
fn create_test_track(name: &str, artist: &str, album: &str, duration_ms: i64) -> Track {
    Track {
        name: name.to_string(),
        artist: artist.to_string(),
        album: Some(album.to_string()),
        duration_ms: Some(duration_ms),
    }
}

enum Behavior {
    Pages(String, Vec<Vec<Option<Track>>>),
    Reject,
    FailOnSecondPage,
}

struct MockCatalog {
    behavior: Behavior,
    lookups: Mutex<Vec<String>>,
}

impl MockCatalog {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(MockCatalog {
            behavior,
            lookups: Mutex::new(Vec::new()),
        })
    }

    fn page(&self, id: &PlaylistRef, index: u32) -> TrackPage {
        let pages = match &self.behavior {
            Behavior::Pages(_, pages) => pages.clone(),
            _ => vec![vec![Some(create_test_track("x", "y", "z", 1))], vec![]],
        };
        let next = ((index as usize) + 1 < pages.len()).then(|| PageCursor {
            playlist: id.clone(),
            offset: index + 1,
            limit: 1,
        });
        TrackPage {
            items: pages[index as usize].clone(),
            next,
        }
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn playlist(&self, id: &PlaylistRef) -> Result<PlaylistPage> {
        self.lookups.lock().unwrap().push(id.to_string());
        match &self.behavior {
            Behavior::Reject => Err(Error::SpotifyApi("status code 404 Not Found".to_string())),
            Behavior::Pages(name, _) => Ok(PlaylistPage {
                name: name.clone(),
                tracks: self.page(id, 0),
            }),
            Behavior::FailOnSecondPage => Ok(PlaylistPage {
                name: "Broken".to_string(),
                tracks: self.page(id, 0),
            }),
        }
    }

    async fn next_page(&self, cursor: &PageCursor) -> Result<TrackPage> {
        match self.behavior {
            Behavior::FailOnSecondPage => Err(Error::IoError(std::io::Error::other(
                "connection reset by peer",
            ))),
            _ => Ok(self.page(&cursor.playlist, cursor.offset)),
        }
    }
}

fn app(catalog: Arc<MockCatalog>) -> Router {
    web::router(catalog)
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn test_playlist() -> Behavior {
    Behavior::Pages(
        "Test Playlist".to_string(),
        vec![vec![
            Some(create_test_track("Song 1", "Artist A", "Album X", 180_000)),
            Some(create_test_track("Song 2", "Artist B", "Album Y", 240_000)),
        ]],
    )
}

#[tokio::test]
async fn test_index_get() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app(MockCatalog::new(test_playlist()))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Spotify Playlist Exporter"));
}

#[tokio::test]
async fn test_post_valid_playlist() {
    let catalog = MockCatalog::new(test_playlist());
    let response = app(catalog.clone())
        .oneshot(form_post(
            "playlist_url=https%3A%2F%2Fopen.spotify.com%2Fplaylist%2F37i9dQZF1DXcBWIGoYBM5M%3Fsi%3Dx",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=Test_Playlist.csv"
    );
    assert_eq!(*catalog.lookups.lock().unwrap(), ["37i9dQZF1DXcBWIGoYBM5M"]);

    let csv_data = body_text(response).await;
    assert!(csv_data.contains("Song 1,Artist A,Album X,180000"));
    assert!(csv_data.contains("Song 2,Artist B,Album Y,240000"));
    assert_eq!(csv_data.matches("Name,Artist,Album,Duration (ms)").count(), 1);
    assert_eq!(csv_data.lines().count(), 3);
}

#[tokio::test]
async fn test_post_paginated_playlist_with_missing_tracks() {
    let catalog = MockCatalog::new(Behavior::Pages(
        "Long Mix".to_string(),
        vec![
            vec![Some(create_test_track("a", "A, B", "X", 1)), None],
            vec![None],
            vec![Some(create_test_track("b", "C", "Y", 2))],
        ],
    ));
    let response = app(catalog)
        .oneshot(form_post("playlist_url=spotify%3Aplaylist%3Aabc123"))
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=Long_Mix.csv"
    );
    let csv_data = body_text(response).await;
    let rows: Vec<&str> = csv_data.lines().collect();
    assert_eq!(
        rows,
        [
            "Name,Artist,Album,Duration (ms)",
            "a,\"A, B\",X,1",
            "b,C,Y,2"
        ]
    );
}

#[tokio::test]
async fn test_post_invalid_playlist_url() {
    let catalog = MockCatalog::new(test_playlist());
    let response = app(catalog.clone())
        .oneshot(form_post("playlist_url=https%3A%2F%2Fgoogle.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(INVALID_URL_MESSAGE));
    assert!(catalog.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_empty_playlist_url() {
    let catalog = MockCatalog::new(test_playlist());

    for body in ["playlist_url=", ""] {
        let response = app(catalog.clone()).oneshot(form_post(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(MISSING_URL_MESSAGE));
    }
    assert!(catalog.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_spotify_api_error() {
    let response = app(MockCatalog::new(Behavior::Reject))
        .oneshot(form_post(
            "playlist_url=https%3A%2F%2Fopen.spotify.com%2Fplaylist%2FnotFoundId",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    let page = body_text(response).await;
    assert!(page.contains(SPOTIFY_API_MESSAGE));
}

#[tokio::test]
async fn test_post_unexpected_failure_returns_no_partial_file() {
    let response = app(MockCatalog::new(Behavior::FailOnSecondPage))
        .oneshot(form_post("playlist_url=spotify%3Aplaylist%3Aabc123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    let page = body_text(response).await;
    assert!(page.contains(GENERIC_ERROR_MESSAGE));
    assert!(!page.contains(SPOTIFY_API_MESSAGE));
}

#[tokio::test]
async fn test_post_non_spotify_host_is_invalid() {
    let catalog = MockCatalog::new(test_playlist());
    let response = app(catalog.clone())
        .oneshot(form_post(
            "playlist_url=https%3A%2F%2Fnot-spotify.com%2Fplaylist%2Finvalid",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(INVALID_URL_MESSAGE));
    assert!(catalog.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_without_form_content_type_rerenders_form() {
    let catalog = MockCatalog::new(test_playlist());

    let bare = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let multipart = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=x")
        .body(Body::from("--x--\r\n"))
        .unwrap();

    for request in [bare, multipart] {
        let response = app(catalog.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
        assert!(body_text(response).await.contains(MISSING_URL_MESSAGE));
    }
    assert!(catalog.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_non_ascii_playlist_name() {
    let catalog = MockCatalog::new(Behavior::Pages(
        "Café Niño".to_string(),
        vec![vec![Some(create_test_track("Canción", "Niño", "Álbum", 1))]],
    ));
    let response = app(catalog)
        .oneshot(form_post("playlist_url=spotify%3Aplaylist%3Aabc123"))
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Caf_Nio.csv\"; filename*=UTF-8''Caf%C3%A9_Ni%C3%B1o.csv"
    );
    assert!(body_text(response).await.contains("Canción,Niño,Álbum,1"));
}
