//! The extraction seam between HTTP handlers and yt-dlp
//!
//! Handlers only ever talk to `MediaExtractor`, so tests can swap in a stub
//! and the production wiring stays in one place.

use async_trait::async_trait;
use url::Url;

use crate::download::artifact::DownloadArtifact;
use crate::download::error::DownloadError;
use crate::download::format::FormatOptions;
use crate::download::metadata::VideoMetadata;

/// Retrieves metadata and media files for a validated TikTok URL.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Fetch metadata without downloading the media itself.
    async fn fetch_metadata(&self, url: &Url) -> Result<VideoMetadata, DownloadError>;

    /// Download the media described by `options` and hand over the owned
    /// temporary file.
    async fn download(&self, url: &Url, options: &FormatOptions) -> Result<DownloadArtifact, DownloadError>;
}
