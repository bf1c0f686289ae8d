use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::clients::{errors::Result, spotify::SpotifyClient};

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 5000;

// Runtime configuration of the web service
pub struct Config {
    pub spotify: SpotifyClient,
    pub addr: SocketAddr,
}

pub struct ConfigBuilder {
    spotify: Option<SpotifyClient>,
    host: Option<IpAddr>,
    port: Option<u16>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            spotify: None,
            host: None, // Listen on all interfaces unless told otherwise
            port: None,
        }
    }

    #[must_use]
    pub fn spotify(mut self, spotify: SpotifyClient) -> Self {
        self.spotify = Some(spotify);
        self
    }

    #[must_use]
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = Some(host);
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    // Missing Spotify credentials fail here, before the server starts accepting requests
    pub fn build(self) -> Result<Config> {
        let spotify = match self.spotify {
            Some(s) => s,
            None => SpotifyClient::try_default()?,
        };
        Ok(Config {
            spotify,
            addr: SocketAddr::new(
                self.host.unwrap_or(DEFAULT_HOST),
                self.port.unwrap_or(DEFAULT_PORT),
            ),
        })
    }
}
