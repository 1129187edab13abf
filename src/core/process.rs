//! Process execution utilities with timeout support
//!
//! Provides helpers for running external processes (yt-dlp, ffmpeg)
//! with configurable timeouts to prevent hung processes from blocking requests.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::download::error::DownloadError;

/// Run an async Command with a timeout.
///
/// Returns the process Output on success, or a DownloadError on timeout/IO failure.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, DownloadError> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(DownloadError::Process(format!("failed to execute process: {}", e))),
        Err(_) => Err(DownloadError::Timeout(format!(
            "process timed out after {}s",
            timeout.as_secs()
        ))),
    }
}
