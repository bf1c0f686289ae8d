/// Catalog abstraction used by the fetcher
pub mod catalog;
/// Data entities for tracks and playlists
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Spotify API client
pub mod spotify;

pub use catalog::Catalog;
pub use spotify::SpotifyClient;
