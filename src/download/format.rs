//! Download format tokens and their extraction option sets
//!
//! Maps the three user-facing format tokens to the concrete options the
//! extraction pipeline needs: yt-dlp format selector, container, MIME type
//! and the filename suggested to the client.

use serde::Deserialize;

use crate::core::error::AppError;

/// User-facing download format token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadFormat {
    /// Best available MP4 without the platform watermark overlay
    HdNoWatermark,
    /// The watermarked stream as served by the platform player
    WithWatermark,
    /// Audio track only, transcoded to MP3
    Mp3,
}

/// Concrete option set derived from a format token.
///
/// Everything downstream of the resolver (yt-dlp invocation, transcode step,
/// response headers) reads from this struct only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// yt-dlp --format selector string
    pub selector: &'static str,
    /// Target container extension ("mp4" or "mp3")
    pub container: &'static str,
    /// Prefer streams without the platform watermark
    pub strip_watermark: bool,
    /// Extract the audio track only (implies an ffmpeg transcode)
    pub audio_only: bool,
    /// Target audio bitrate for the transcode step
    pub audio_bitrate: Option<&'static str>,
    /// Content-Type header value for the response
    pub mime_type: &'static str,
    /// Filename suggested to the client via Content-Disposition
    pub suggested_filename: &'static str,
}

impl Default for DownloadFormat {
    fn default() -> Self {
        DownloadFormat::HdNoWatermark
    }
}

impl DownloadFormat {
    /// Parse a user-supplied token. Unknown tokens are an error, they do not
    /// silently fall back to a default.
    pub fn from_token(token: &str) -> Result<Self, AppError> {
        match token {
            "hd_no_watermark" => Ok(DownloadFormat::HdNoWatermark),
            "with_watermark" => Ok(DownloadFormat::WithWatermark),
            "mp3" => Ok(DownloadFormat::Mp3),
            other => Err(AppError::InvalidFormat(other.to_string())),
        }
    }

    /// The canonical token string.
    pub fn token(&self) -> &'static str {
        match self {
            DownloadFormat::HdNoWatermark => "hd_no_watermark",
            DownloadFormat::WithWatermark => "with_watermark",
            DownloadFormat::Mp3 => "mp3",
        }
    }

    /// Resolve the token into the concrete extraction option set.
    ///
    /// Pure and deterministic: the same token always yields the same options.
    /// TikTok exposes its watermarked renditions with "watermark" in the
    /// format id, which is what the selectors key on.
    pub fn options(&self) -> FormatOptions {
        match self {
            DownloadFormat::HdNoWatermark => FormatOptions {
                selector: "best[ext=mp4][format_id!*=watermark]/best[ext=mp4]/best",
                container: "mp4",
                strip_watermark: true,
                audio_only: false,
                audio_bitrate: None,
                mime_type: "video/mp4",
                suggested_filename: "tiktok_video.mp4",
            },
            DownloadFormat::WithWatermark => FormatOptions {
                selector: "best[format_id*=watermark]/best[ext=mp4]/best",
                container: "mp4",
                strip_watermark: false,
                audio_only: false,
                audio_bitrate: None,
                mime_type: "video/mp4",
                suggested_filename: "tiktok_video.mp4",
            },
            DownloadFormat::Mp3 => FormatOptions {
                selector: "bestaudio/best",
                container: "mp3",
                strip_watermark: false,
                audio_only: true,
                audio_bitrate: Some(crate::core::config::download::AUDIO_BITRATE),
                mime_type: "audio/mpeg",
                suggested_filename: "tiktok_audio.mp3",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_known() {
        assert_eq!(
            DownloadFormat::from_token("hd_no_watermark").unwrap(),
            DownloadFormat::HdNoWatermark
        );
        assert_eq!(
            DownloadFormat::from_token("with_watermark").unwrap(),
            DownloadFormat::WithWatermark
        );
        assert_eq!(DownloadFormat::from_token("mp3").unwrap(), DownloadFormat::Mp3);
    }

    #[test]
    fn test_from_token_unknown_is_an_error() {
        for token in ["webm", "HD_NO_WATERMARK", "mp4", "", "best"] {
            let err = DownloadFormat::from_token(token).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidFormat(_)),
                "expected InvalidFormat for {:?}",
                token
            );
        }
    }

    #[test]
    fn test_default_is_hd_no_watermark() {
        assert_eq!(DownloadFormat::default(), DownloadFormat::HdNoWatermark);
    }

    #[test]
    fn test_token_roundtrip() {
        for fmt in [
            DownloadFormat::HdNoWatermark,
            DownloadFormat::WithWatermark,
            DownloadFormat::Mp3,
        ] {
            assert_eq!(DownloadFormat::from_token(fmt.token()).unwrap(), fmt);
        }
    }

    #[test]
    fn test_options_are_distinct_and_deterministic() {
        let hd = DownloadFormat::HdNoWatermark.options();
        let wm = DownloadFormat::WithWatermark.options();
        let mp3 = DownloadFormat::Mp3.options();

        assert_ne!(hd, wm);
        assert_ne!(hd, mp3);
        assert_ne!(wm, mp3);

        // Deterministic: resolving twice yields identical options
        assert_eq!(hd, DownloadFormat::HdNoWatermark.options());
        assert_eq!(mp3, DownloadFormat::Mp3.options());
    }

    #[test]
    fn test_video_options() {
        let hd = DownloadFormat::HdNoWatermark.options();
        assert!(hd.strip_watermark);
        assert!(!hd.audio_only);
        assert_eq!(hd.container, "mp4");
        assert_eq!(hd.mime_type, "video/mp4");
        assert_eq!(hd.suggested_filename, "tiktok_video.mp4");

        let wm = DownloadFormat::WithWatermark.options();
        assert!(!wm.strip_watermark);
        assert_eq!(wm.mime_type, "video/mp4");
    }

    #[test]
    fn test_mp3_options() {
        let mp3 = DownloadFormat::Mp3.options();
        assert!(mp3.audio_only);
        assert_eq!(mp3.container, "mp3");
        assert_eq!(mp3.audio_bitrate, Some("192k"));
        assert_eq!(mp3.mime_type, "audio/mpeg");
        assert_eq!(mp3.suggested_filename, "tiktok_audio.mp3");
    }
}
