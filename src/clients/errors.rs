use rspotify::{ClientError, http::HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // The Web API answered, but refused the request (unknown, private or malformed playlist, rate limit, ...)
    #[error("Spotify API rejected the request: {0}")]
    SpotifyApi(String),

    #[error("Spotify error: {0}")]
    SpotifyError(ClientError),

    #[error("Failed to write CSV data, error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl Error {
    /// True when the catalog API itself refused the request, as opposed to a transport or local failure.
    pub fn is_upstream_rejection(&self) -> bool {
        matches!(self, Error::SpotifyApi(_))
    }
}

impl From<ClientError> for Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(http) => match *http {
                HttpError::StatusCode(response) => {
                    Error::SpotifyApi(format!("status code {}", response.status()))
                }
                other => Error::SpotifyError(ClientError::Http(Box::new(other))),
            },
            other => Error::SpotifyError(other),
        }
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}
