//! yt-dlp invocation: the production MediaExtractor
//!
//! Shells out to the yt-dlp binary for both metadata dumps and media
//! downloads. Audio requests fetch the best audio stream first and then
//! transcode to MP3 through ffmpeg.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use url::Url;

use crate::conversion;
use crate::core::config;
use crate::core::process::run_with_timeout;
use crate::download::artifact::{cleanup_partial, new_job_id, DownloadArtifact};
use crate::download::error::DownloadError;
use crate::download::extractor::MediaExtractor;
use crate::download::format::FormatOptions;
use crate::download::metadata::{parse_info_json, VideoMetadata};
use crate::download::ytdlp_errors::classify_failure;

/// MediaExtractor implementation backed by the yt-dlp binary.
pub struct YtDlpExtractor {
    download_dir: PathBuf,
}

impl YtDlpExtractor {
    /// Extractor writing into the configured download directory.
    pub fn new() -> Self {
        Self {
            download_dir: config::DOWNLOAD_DIR.clone(),
        }
    }

    /// Extractor writing into an explicit directory.
    pub fn with_download_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: dir.into(),
        }
    }

    async fn run_ytdlp(&self, args: &[String]) -> Result<Output, DownloadError> {
        let ytdl_bin = &*config::YTDL_BIN;
        let mut cmd = Command::new(ytdl_bin);
        cmd.args(args);
        log::debug!("yt-dlp command: {} {}", ytdl_bin, args.join(" "));
        run_with_timeout(&mut cmd, config::download::ytdlp_timeout()).await
    }

    /// Download the best audio stream and transcode it to MP3.
    async fn download_audio(&self, url: &Url, options: &FormatOptions, job_id: &str) -> Result<PathBuf, DownloadError> {
        // yt-dlp picks the extension of whatever stream it gets, so the
        // output template keeps %(ext)s and the real file is located by
        // scanning for the job id afterwards.
        let template = self.download_dir.join(format!("{}.source.%(ext)s", job_id));

        let mut args = base_args();
        args.extend([
            "-o".to_string(),
            template.to_string_lossy().into_owned(),
            "--format".to_string(),
            options.selector.to_string(),
            url.to_string(),
        ]);

        let output = self.run_ytdlp(&args).await?;
        if !output.status.success() {
            return Err(classify_failure("audio download", &String::from_utf8_lossy(&output.stderr)));
        }

        let source = find_downloaded_file(&self.download_dir, &format!("{}.source", job_id)).ok_or_else(|| {
            DownloadError::FileNotFound(format!("no audio file produced for job {}", job_id))
        })?;

        let target = self.download_dir.join(format!("{}.mp3", job_id));
        let bitrate = options.audio_bitrate.unwrap_or(config::download::AUDIO_BITRATE);
        let result = conversion::audio::transcode_to_mp3(&source, &target, bitrate).await;

        // The intermediate stream is never served; drop it on both paths.
        if let Err(e) = fs_err::remove_file(&source) {
            log::warn!("Failed to remove intermediate audio file {}: {}", source.display(), e);
        }

        result.map_err(|e| DownloadError::Ffmpeg(e.to_string()))?;
        Ok(target)
    }

    /// Download a video rendition straight into its final MP4 path.
    async fn download_video(&self, url: &Url, options: &FormatOptions, job_id: &str) -> Result<PathBuf, DownloadError> {
        let target = self.download_dir.join(format!("{}.{}", job_id, options.container));

        let mut args = base_args();
        args.extend([
            "-o".to_string(),
            target.to_string_lossy().into_owned(),
            "--format".to_string(),
            options.selector.to_string(),
            "--merge-output-format".to_string(),
            options.container.to_string(),
            "--force-overwrites".to_string(),
            url.to_string(),
        ]);

        let output = self.run_ytdlp(&args).await?;
        if !output.status.success() {
            return Err(classify_failure("video download", &String::from_utf8_lossy(&output.stderr)));
        }

        if target.exists() {
            return Ok(target);
        }

        // Fallback: yt-dlp occasionally appends its own extension anyway.
        find_downloaded_file(&self.download_dir, job_id)
            .ok_or_else(|| DownloadError::FileNotFound(format!("no video file produced for job {}", job_id)))
    }
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn fetch_metadata(&self, url: &Url) -> Result<VideoMetadata, DownloadError> {
        let mut args = base_args();
        args.push("--dump-json".to_string());
        args.push(url.to_string());

        let output = self.run_ytdlp(&args).await?;
        if !output.status.success() {
            return Err(classify_failure("metadata dump", &String::from_utf8_lossy(&output.stderr)));
        }

        parse_info_json(&String::from_utf8_lossy(&output.stdout), url)
    }

    async fn download(&self, url: &Url, options: &FormatOptions) -> Result<DownloadArtifact, DownloadError> {
        let job_id = new_job_id();
        log::info!("Downloading [{}] job {}: {}", options.container, job_id, url);

        let result = if options.audio_only {
            self.download_audio(url, options, &job_id).await
        } else {
            self.download_video(url, options, &job_id).await
        };

        match result {
            Ok(path) => Ok(DownloadArtifact::new(path, options.mime_type, options.suggested_filename)),
            Err(e) => {
                cleanup_partial(&self.download_dir, &job_id);
                Err(e)
            }
        }
    }
}

/// Arguments common to every yt-dlp invocation against TikTok.
/// The URL goes last, after all per-call flags.
fn base_args() -> Vec<String> {
    vec![
        "--no-playlist".to_string(),
        "--no-warnings".to_string(),
        "--no-check-certificate".to_string(),
        "--user-agent".to_string(),
        config::tiktok::USER_AGENT.to_string(),
        "--referer".to_string(),
        config::tiktok::REFERER.to_string(),
        "--add-headers".to_string(),
        format!("Accept:{}", config::tiktok::ACCEPT),
        "--add-headers".to_string(),
        format!("Accept-Language:{}", config::tiktok::ACCEPT_LANGUAGE),
    ]
}

/// Find the file yt-dlp actually produced for a job id prefix.
///
/// Skips yt-dlp working files (.part, .ytdl) so a half-written fragment is
/// never mistaken for the finished download.
fn find_downloaded_file(dir: &Path, prefix: &str) -> Option<PathBuf> {
    let entries = fs_err::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name_str = name.to_string_lossy();
        if name_str.starts_with(prefix) && !name_str.ends_with(".part") && !name_str.ends_with(".ytdl") {
            return Some(entry.path());
        }
    }
    None
}

/// Log the yt-dlp version at startup.
///
/// A missing binary is reported but not fatal: the service can still come
/// up and answer health checks while the host is being fixed.
pub async fn print_ytdlp_version() -> Result<(), DownloadError> {
    let ytdl_bin = &*config::YTDL_BIN;

    let mut cmd = Command::new(ytdl_bin);
    cmd.arg("--version");

    let output = run_with_timeout(&mut cmd, std::time::Duration::from_secs(10)).await?;
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if version.is_empty() {
        return Err(DownloadError::YtDlp(
            "yt-dlp is not installed or --version produced no output".to_string(),
        ));
    }

    log::info!("yt-dlp version: {}", version);
    Ok(())
}
