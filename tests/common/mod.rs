//! Shared test helpers: a scriptable stand-in for the yt-dlp extractor.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use url::Url;

use tokgrab::download::artifact::new_job_id;
use tokgrab::download::{DownloadArtifact, DownloadError, FormatOptions, MediaExtractor, VideoMetadata};

/// Payload written into stub artifacts.
pub const STUB_PAYLOAD: &[u8] = b"tokgrab stub media payload";

/// What the stub should do when asked to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubMode {
    /// Produce a real temp file and hand it over as the artifact
    Succeed,
    /// Fail as if the video were private or deleted
    FailUnavailable,
    /// Fail as if yt-dlp broke mid-extraction
    FailExtraction,
    /// Create the temp file, then fail after it is already wrapped in an
    /// artifact. Exercises the cleanup-on-error path.
    CreateThenFail,
}

/// Scriptable MediaExtractor with call accounting.
pub struct StubExtractor {
    pub dir: PathBuf,
    pub mode: StubMode,
    pub metadata_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
    /// Every artifact path the stub produced, in order
    pub produced: Mutex<Vec<PathBuf>>,
}

impl StubExtractor {
    pub fn new(dir: PathBuf, mode: StubMode) -> Self {
        Self {
            dir,
            mode,
            metadata_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            produced: Mutex::new(Vec::new()),
        }
    }

    pub fn metadata_call_count(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub fn download_call_count(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    pub fn produced_paths(&self) -> Vec<PathBuf> {
        self.produced.lock().unwrap().clone()
    }

    fn write_artifact_file(&self, options: &FormatOptions) -> PathBuf {
        let path = self.dir.join(format!("{}.{}", new_job_id(), options.container));
        std::fs::write(&path, STUB_PAYLOAD).unwrap();
        self.produced.lock().unwrap().push(path.clone());
        path
    }
}

/// The fixed metadata every successful stub lookup returns.
pub fn fixed_metadata(url: &Url) -> VideoMetadata {
    VideoMetadata {
        title: "T".to_string(),
        author: "A".to_string(),
        author_url: Some("https://www.tiktok.com/@a".to_string()),
        thumbnail: Some("https://cdn.example/thumb.jpg".to_string()),
        duration: Some(15),
        duration_string: Some("0:15".to_string()),
        view_count: Some(1000),
        like_count: Some(100),
        comment_count: Some(10),
        description: Some("stub".to_string()),
        upload_date: Some("20240101".to_string()),
        video_url: url.to_string(),
    }
}

#[async_trait]
impl MediaExtractor for StubExtractor {
    async fn fetch_metadata(&self, url: &Url) -> Result<VideoMetadata, DownloadError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            StubMode::FailUnavailable => Err(DownloadError::Unavailable("Video unavailable.".to_string())),
            StubMode::FailExtraction => Err(DownloadError::YtDlp("Could not extract the video.".to_string())),
            _ => Ok(fixed_metadata(url)),
        }
    }

    async fn download(&self, _url: &Url, options: &FormatOptions) -> Result<DownloadArtifact, DownloadError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            StubMode::Succeed => {
                let path = self.write_artifact_file(options);
                Ok(DownloadArtifact::new(path, options.mime_type, options.suggested_filename))
            }
            StubMode::FailUnavailable => Err(DownloadError::Unavailable("Video unavailable.".to_string())),
            StubMode::FailExtraction => Err(DownloadError::YtDlp("Could not extract the video.".to_string())),
            StubMode::CreateThenFail => {
                let path = self.write_artifact_file(options);
                let artifact = DownloadArtifact::new(path, options.mime_type, options.suggested_filename);
                drop(artifact);
                Err(DownloadError::YtDlp("Could not extract the video.".to_string()))
            }
        }
    }
}
