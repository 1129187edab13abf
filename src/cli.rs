use clap::Parser;

use tokgrab::core::config;

#[derive(Parser)]
#[command(name = "tokgrab")]
#[command(author, version, about = "HTTP service for downloading TikTok videos and audio", long_about = None)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = config::server::DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = config::server::DEFAULT_PORT)]
    pub port: u16,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
