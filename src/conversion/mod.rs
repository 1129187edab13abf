//! Media transcoding through the ffmpeg binary
//!
//! The only conversion this service performs is audio extraction to MP3
//! for the audio download format.

pub mod audio;

use thiserror::Error;

/// Errors that can occur during conversion
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Conversion timed out: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type ConversionResult<T> = Result<T, ConversionError>;

/// Check if ffmpeg is available
pub async fn check_ffmpeg() -> bool {
    tokio::process::Command::new(&*crate::core::config::FFMPEG_BIN)
        .arg("-version")
        .output()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}
