//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console, optionally plus file)
//! - Startup diagnostics for the external binaries and the download directory

use anyhow::Result;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;

use crate::core::config;

/// Initialize logger for console output, plus file output when a path is given
///
/// # Arguments
/// * `log_file_path` - Optional path to a log file
pub fn init_logger(log_file_path: Option<&str>) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file_path {
        let log_file = File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file {}: {}", path, e))?;
        loggers.push(WriteLogger::new(LevelFilter::Info, Config::default(), log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the resolved external tool configuration at application startup
///
/// Reports:
/// - YTDL_BIN and FFMPEG_BIN paths as resolved from the environment
/// - The temporary download directory in use
pub fn log_startup_configuration() {
    log::info!("yt-dlp binary: {}", &*config::YTDL_BIN);
    log::info!("ffmpeg binary: {}", &*config::FFMPEG_BIN);
    log::info!("download directory: {}", config::DOWNLOAD_DIR.display());

    if config::DOWNLOAD_DIR.exists() {
        log::info!("✅ Download directory exists");
    } else {
        log::info!("Download directory will be created on startup");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::NamedTempFile;

    #[test]
    fn test_init_logger_accepts_file_path() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        // Note: This test might fail if logger is already initialized
        // elsewhere in the same test binary, so only check it can be called.
        let result = init_logger(Some(path));
        assert!(result.is_ok() || result.is_err());
    }
}
