//! Audio transcoding to MP3 via FFmpeg

use super::{ConversionError, ConversionResult};
use std::path::Path;
use tokio::process::Command;

use crate::core::config;
use crate::core::process::run_with_timeout;
use crate::download::error::DownloadError;

/// Transcode an audio file to MP3 at the given bitrate.
///
/// # Arguments
/// * `input_path` - Path to the source audio stream (any container ffmpeg reads)
/// * `output_path` - Path the MP3 is written to
/// * `bitrate` - Target bitrate, e.g. "192k"
pub async fn transcode_to_mp3<P: AsRef<Path>>(input_path: P, output_path: P, bitrate: &str) -> ConversionResult<()> {
    let input = input_path.as_ref();
    let output = output_path.as_ref();

    if !input.exists() {
        return Err(ConversionError::InputNotFound(input.display().to_string()));
    }

    let mut cmd = Command::new(&*config::FFMPEG_BIN);
    cmd.arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-y")
        .arg("-i")
        .arg(input)
        .arg("-vn")
        .arg("-acodec")
        .arg("libmp3lame")
        .arg("-b:a")
        .arg(bitrate)
        .arg(output);

    let result = run_with_timeout(&mut cmd, config::download::ffmpeg_timeout()).await;

    let process_output = match result {
        Ok(o) => o,
        Err(DownloadError::Timeout(msg)) => return Err(ConversionError::Timeout(msg)),
        Err(e) => return Err(ConversionError::FfmpegError(e.to_string())),
    };

    if !process_output.status.success() {
        let stderr = String::from_utf8_lossy(&process_output.stderr);
        log::error!("FFmpeg MP3 transcode error: {}", stderr);
        return Err(ConversionError::FfmpegError(stderr.to_string()));
    }

    Ok(())
}
