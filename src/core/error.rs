use thiserror::Error;

use crate::core::validation::ValidationError;
use crate::download::error::DownloadError;

/// Centralized error types for the application
///
/// All errors in the application are converted to this enum for consistent error handling.
/// Uses `thiserror` for automatic error conversion and display formatting.
#[derive(Error, Debug)]
pub enum AppError {
    /// User input validation errors (bad or missing URL)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Unrecognized download format token
    #[error("Unknown format: {0}")]
    InvalidFormat(String),

    /// Download pipeline errors (yt-dlp, ffmpeg, temp files)
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: AppError = ValidationError::EmptyUrl.into();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("URL is required"));
    }

    #[test]
    fn test_download_error_converts() {
        let err: AppError = DownloadError::YtDlp("exit code 1".into()).into();
        assert!(matches!(err, AppError::Download(_)));
    }

    #[test]
    fn test_invalid_format_display() {
        let err = AppError::InvalidFormat("webm".into());
        assert_eq!(err.to_string(), "Unknown format: webm");
    }
}
