//! Server configuration from command-line flags and environment variables.

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "stickers")]
#[command(about = "Sticker notes REST service with an in-memory store")]
pub struct ServerConfig {
    /// Interface to bind the HTTP listener to
    #[arg(long, env = "STICKERS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "STICKERS_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    /// Bind address, e.g. `127.0.0.1:5000`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
