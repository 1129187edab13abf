mod cli;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use tokgrab::core::{config, logging};
use tokgrab::download::{artifact, ytdlp, YtDlpExtractor};
use tokgrab::server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse_args();

    logging::init_logger(cli.log_file.as_deref())?;
    logging::log_startup_configuration();

    fs_err::create_dir_all(&*config::DOWNLOAD_DIR)?;

    // Remove leftover files from previous runs
    let purged = artifact::purge_download_dir(&config::DOWNLOAD_DIR);
    if purged > 0 {
        log::info!("Purged {} stale download file(s)", purged);
    }

    // Non-fatal: the host may still be installing yt-dlp
    if let Err(e) = ytdlp::print_ytdlp_version().await {
        log::warn!("yt-dlp probe failed: {}. Downloads will fail until it is installed.", e);
    }
    if !tokgrab::conversion::check_ffmpeg().await {
        log::warn!("ffmpeg not found; mp3 downloads will fail until it is installed");
    }

    let state = AppState::new(Arc::new(YtDlpExtractor::new()));
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(&addr).await?;

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /              - Status banner");
    log::info!("  /health        - Health check");
    log::info!("  /api/info      - Video metadata (JSON)");
    log::info!("  /api/download  - Media file stream");

    axum::serve(listener, app).await?;

    Ok(())
}
