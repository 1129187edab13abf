//! Video metadata model and parsing of yt-dlp --dump-json output
//!
//! yt-dlp prints one JSON object per video. Only the fields the info
//! endpoint serves are deserialized; everything else in the dump is ignored.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::download::error::DownloadError;

/// Metadata served by the info endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoMetadata {
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    /// The URL the client asked about, echoed back
    pub video_url: String,
}

/// Subset of the yt-dlp info dump we care about.
#[derive(Debug, Deserialize)]
struct InfoDump {
    title: Option<String>,
    uploader: Option<String>,
    creator: Option<String>,
    uploader_url: Option<String>,
    channel_url: Option<String>,
    thumbnail: Option<String>,
    #[serde(default)]
    thumbnails: Vec<ThumbnailEntry>,
    duration: Option<f64>,
    view_count: Option<u64>,
    like_count: Option<u64>,
    comment_count: Option<u64>,
    description: Option<String>,
    upload_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailEntry {
    url: Option<String>,
}

/// Format seconds as M:SS or H:MM:SS.
pub fn format_duration(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Parse a yt-dlp --dump-json line into the metadata the API serves.
///
/// Missing title/author fall back the way the platform page does: a generic
/// title and "Unknown". The thumbnail falls back to the last entry of the
/// thumbnails list, which yt-dlp orders worst to best.
pub fn parse_info_json(raw: &str, requested_url: &Url) -> Result<VideoMetadata, DownloadError> {
    let dump: InfoDump = serde_json::from_str(raw)
        .map_err(|e| DownloadError::YtDlp(format!("could not parse yt-dlp metadata output: {}", e)))?;

    let thumbnail = dump
        .thumbnail
        .or_else(|| dump.thumbnails.into_iter().rev().find_map(|t| t.url));

    let duration = dump.duration.map(|d| d.round() as u64);

    Ok(VideoMetadata {
        title: dump.title.unwrap_or_else(|| "TikTok Video".to_string()),
        author: dump
            .uploader
            .or(dump.creator)
            .unwrap_or_else(|| "Unknown".to_string()),
        author_url: dump.uploader_url.or(dump.channel_url),
        thumbnail,
        duration,
        duration_string: duration.map(format_duration),
        view_count: dump.view_count,
        like_count: dump.like_count,
        comment_count: dump.comment_count,
        description: dump.description,
        upload_date: dump.upload_date,
        video_url: requested_url.to_string(),
    })
}
