use std::path::PathBuf;

use clap::Parser;

/// Lector document-to-audio server
#[derive(Debug, Parser)]
#[command(name = "lector", about = "Convert uploaded documents to speech audio")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lector.toml", env = "LECTOR_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "LECTOR_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
