//! Download pipeline: format resolution, extraction, artifacts

pub mod artifact;
pub mod error;
pub mod extractor;
pub mod format;
pub mod metadata;
pub mod ytdlp;
pub mod ytdlp_errors;

// Re-exports for convenience
pub use artifact::DownloadArtifact;
pub use error::DownloadError;
pub use extractor::MediaExtractor;
pub use format::{DownloadFormat, FormatOptions};
pub use metadata::VideoMetadata;
pub use ytdlp::YtDlpExtractor;
