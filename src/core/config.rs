use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration constants for the service

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Cached ffmpeg binary path
/// Read once at startup from FFMPEG_BIN environment variable or defaults to "ffmpeg",
/// which resolves through the process PATH
pub static FFMPEG_BIN: Lazy<String> = Lazy::new(|| env::var("FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()));

/// Directory where per-request temporary artifacts are written
/// Read from DOWNLOAD_DIR environment variable, supports tilde (~) expansion.
/// Defaults to a service-owned folder under the system temp directory.
pub static DOWNLOAD_DIR: Lazy<PathBuf> = Lazy::new(|| match env::var("DOWNLOAD_DIR") {
    Ok(dir) if !dir.trim().is_empty() => PathBuf::from(shellexpand::tilde(dir.trim()).to_string()),
    _ => env::temp_dir().join("tokgrab-downloads"),
});

/// Browser-like headers sent to TikTok on every yt-dlp invocation.
/// TikTok serves different (sometimes watermark-free) streams depending on
/// the requesting client, so these stay pinned to a desktop Chrome profile.
pub mod tiktok {
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
    pub const REFERER: &str = "https://www.tiktok.com/";
}

/// Download configuration
pub mod download {
    use super::Duration;

    /// Timeout for yt-dlp commands (in seconds)
    pub const YTDLP_TIMEOUT_SECS: u64 = 180; // 3 minutes

    /// Timeout for ffmpeg transcodes (in seconds)
    pub const FFMPEG_TIMEOUT_SECS: u64 = 120; // 2 minutes

    /// Target bitrate for extracted MP3 audio
    pub const AUDIO_BITRATE: &str = "192k";

    /// yt-dlp command timeout duration
    pub fn ytdlp_timeout() -> Duration {
        Duration::from_secs(YTDLP_TIMEOUT_SECS)
    }

    /// ffmpeg command timeout duration
    pub fn ffmpeg_timeout() -> Duration {
        Duration::from_secs(FFMPEG_TIMEOUT_SECS)
    }
}

/// Validation configuration
pub mod validation {
    /// Maximum URL length (RFC 7230 recommends 8000, but we use 2048 for safety)
    pub const MAX_URL_LENGTH: usize = 2048;
}

/// HTTP server configuration
pub mod server {
    /// Default bind host
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default listen port
    pub const DEFAULT_PORT: u16 = 3000;
}
