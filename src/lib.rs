//! Playlist Export - download a Spotify playlist's track listing as CSV
//!
//! A single web form takes a playlist link, the playlist is read page by page
//! from the Spotify Web API and the flattened track list is returned as a
//! `.csv` download named after the playlist.

/// Client modules for interacting with the music catalog
pub mod clients;
/// Service configuration
pub mod config;
/// CSV rendering and download filenames
pub mod export;
/// Paginated playlist retrieval
pub mod fetcher;
/// Playlist identifier extraction from links and URIs
pub mod playlist_id;
/// HTTP form and download endpoint
pub mod web;
