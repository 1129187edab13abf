//! Tokgrab - HTTP service for downloading TikTok videos and audio
//!
//! Wraps the yt-dlp and ffmpeg binaries behind a small API: validate the
//! incoming URL, resolve the requested format, run the external tools, and
//! stream the finished file back while guaranteeing temp-file cleanup.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, validation, process helpers
//! - `download`: format resolution, yt-dlp extraction, artifact lifecycle
//! - `conversion`: ffmpeg transcoding (MP3 extraction)
//! - `server`: axum routes and response mapping

pub mod conversion;
pub mod core;
pub mod download;
pub mod server;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use download::{DownloadArtifact, DownloadFormat, MediaExtractor, VideoMetadata, YtDlpExtractor};
pub use server::{router, AppState};
