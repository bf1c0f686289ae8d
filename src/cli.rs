use std::{net::IpAddr, sync::Arc};

use clap::Parser;
use log::info;
use playlist_export::{
    clients::errors::Result,
    config::{ConfigBuilder, DEFAULT_HOST, DEFAULT_PORT},
    web,
};

#[derive(Parser)]
#[command(name = "playlist-export")]
#[command(version, about = "Export Spotify playlists as CSV through a web form", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value_t = DEFAULT_HOST)]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    info!("Building config ...");
    let config = ConfigBuilder::new().host(cli.host).port(cli.port).build()?;
    info!("Authorizing Spotify client ...");
    config.spotify.authorize_client().await?;

    web::serve(config.addr, Arc::new(config.spotify)).await
}
