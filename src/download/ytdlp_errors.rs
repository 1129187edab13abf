//! Classification of yt-dlp failures
//!
//! Inspects yt-dlp stderr to decide whether a failure is the caller's
//! problem (video gone or private) or ours (network, extractor breakage).
//! The distinction drives the HTTP status: unavailable videos map to 404,
//! everything else to a 5xx.

use crate::download::error::DownloadError;

/// Failure classes recognized in yt-dlp stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YtDlpErrorType {
    /// Video is private, deleted, region-locked or simply does not exist
    VideoUnavailable,
    /// Network-level trouble between us and the platform
    NetworkError,
    /// Anything else, including extractor breakage
    Unknown,
}

/// Analyze yt-dlp stderr and determine the error class
pub fn analyze_ytdlp_error(stderr: &str) -> YtDlpErrorType {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("video unavailable")
        || stderr_lower.contains("private video")
        || stderr_lower.contains("video is private")
        || stderr_lower.contains("account is private")
        || stderr_lower.contains("has been removed")
        || stderr_lower.contains("video does not exist")
        || stderr_lower.contains("video is not available")
        || stderr_lower.contains("http error 404")
        || stderr_lower.contains("unable to find video")
        || stderr_lower.contains("not available in your")
    {
        return YtDlpErrorType::VideoUnavailable;
    }

    if stderr_lower.contains("timed out")
        || stderr_lower.contains("timeout")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("network")
        || stderr_lower.contains("socket")
        || stderr_lower.contains("dns")
        || stderr_lower.contains("failed to connect")
    {
        return YtDlpErrorType::NetworkError;
    }

    YtDlpErrorType::Unknown
}

/// Generic, client-safe message for an error class.
///
/// Internal stderr detail stays in the server logs only.
pub fn client_message(error_type: YtDlpErrorType) -> &'static str {
    match error_type {
        YtDlpErrorType::VideoUnavailable => "Video unavailable. It might be private, deleted or region-locked.",
        YtDlpErrorType::NetworkError => "Could not reach TikTok. Please try again later.",
        YtDlpErrorType::Unknown => "Could not extract the video. Please check the link and try again.",
    }
}

/// Turn a failed yt-dlp run into a categorized DownloadError.
///
/// The full stderr is logged here; only the generic class message travels up.
pub fn classify_failure(context: &str, stderr: &str) -> DownloadError {
    let error_type = analyze_ytdlp_error(stderr);
    let detail: String = stderr.trim().chars().take(500).collect();
    log::error!("yt-dlp {} failed ({:?}): {}", context, error_type, detail);

    match error_type {
        YtDlpErrorType::VideoUnavailable => DownloadError::Unavailable(client_message(error_type).to_string()),
        YtDlpErrorType::NetworkError | YtDlpErrorType::Unknown => {
            DownloadError::YtDlp(client_message(error_type).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_unavailable() {
        let cases = [
            "ERROR: [TikTok] 724: Video unavailable",
            "ERROR: Private video. Sign in if you've been granted access",
            "ERROR: This video has been removed by the uploader",
            "ERROR: HTTP Error 404: Not Found",
            "ERROR: [TikTok] The author's account is private",
        ];
        for stderr in cases {
            assert_eq!(
                analyze_ytdlp_error(stderr),
                YtDlpErrorType::VideoUnavailable,
                "failed for: {}",
                stderr
            );
        }
    }

    #[test]
    fn test_analyze_network() {
        let cases = [
            "ERROR: Unable to download webpage: The read operation timed out",
            "ERROR: Unable to download webpage: <urlopen error [Errno 111] Connection refused>",
            "ERROR: DNS lookup failed",
        ];
        for stderr in cases {
            assert_eq!(
                analyze_ytdlp_error(stderr),
                YtDlpErrorType::NetworkError,
                "failed for: {}",
                stderr
            );
        }
    }

    #[test]
    fn test_analyze_unknown() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: Unsupported URL: https://example.com"),
            YtDlpErrorType::Unknown
        );
        assert_eq!(analyze_ytdlp_error(""), YtDlpErrorType::Unknown);
    }

    #[test]
    fn test_classify_failure_maps_unavailable() {
        let err = classify_failure("download", "ERROR: Video unavailable");
        assert!(matches!(err, DownloadError::Unavailable(_)));
    }

    #[test]
    fn test_classify_failure_maps_other_to_ytdlp() {
        let err = classify_failure("download", "ERROR: something exploded");
        assert!(matches!(err, DownloadError::YtDlp(_)));
    }

    #[test]
    fn test_client_messages_hide_internals() {
        // No class message should ever leak stderr content or tool names
        for t in [
            YtDlpErrorType::VideoUnavailable,
            YtDlpErrorType::NetworkError,
            YtDlpErrorType::Unknown,
        ] {
            let msg = client_message(t);
            assert!(!msg.contains("yt-dlp"));
            assert!(!msg.contains("ERROR"));
        }
    }
}
