use std::fmt;

/// Structured error type for download operations.
///
/// Categorized variants drive both the HTTP status classification and
/// the per-subcategory log lines.
#[derive(Debug)]
pub enum DownloadError {
    /// yt-dlp specific failures (binary not found, bad exit code, etc.)
    YtDlp(String),
    /// The source video is private, deleted or region-locked
    Unavailable(String),
    /// FFmpeg transcode failures (audio extraction to MP3)
    Ffmpeg(String),
    /// Expected file not found after processing
    FileNotFound(String),
    /// Download or processing timed out
    Timeout(String),
    /// Process execution failure (spawn, exit code)
    Process(String),
    /// Catch-all for uncategorized errors
    Other(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::YtDlp(msg) => write!(f, "{}", msg),
            DownloadError::Unavailable(msg) => write!(f, "{}", msg),
            DownloadError::Ffmpeg(msg) => write!(f, "{}", msg),
            DownloadError::FileNotFound(msg) => write!(f, "{}", msg),
            DownloadError::Timeout(msg) => write!(f, "{}", msg),
            DownloadError::Process(msg) => write!(f, "{}", msg),
            DownloadError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DownloadError {}

impl DownloadError {
    /// Returns subcategory for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            DownloadError::YtDlp(_) => "ytdlp",
            DownloadError::Unavailable(_) => "unavailable",
            DownloadError::Ffmpeg(_) => "ffmpeg",
            DownloadError::FileNotFound(_) => "file_not_found",
            DownloadError::Timeout(_) => "timeout",
            DownloadError::Process(_) => "process",
            DownloadError::Other(_) => "other",
        }
    }

    /// Returns the inner message
    pub fn message(&self) -> &str {
        match self {
            DownloadError::YtDlp(msg)
            | DownloadError::Unavailable(msg)
            | DownloadError::Ffmpeg(msg)
            | DownloadError::FileNotFound(msg)
            | DownloadError::Timeout(msg)
            | DownloadError::Process(msg)
            | DownloadError::Other(msg) => msg,
        }
    }
}

/// Plain strings become `DownloadError::Other`
impl From<String> for DownloadError {
    fn from(s: String) -> Self {
        DownloadError::Other(s)
    }
}

impl From<&str> for DownloadError {
    fn from(s: &str) -> Self {
        DownloadError::Other(s.to_string())
    }
}
