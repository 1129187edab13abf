//! Temporary download artifacts and their cleanup
//!
//! A `DownloadArtifact` owns exactly one temporary file. Removal happens in
//! `Drop`, so every exit path of a request (success, error, client
//! disconnect) releases the file without per-branch cleanup code. The
//! response stream holds the artifact until the last byte is written.

use std::path::{Path, PathBuf};

/// A downloaded media file owned by a single in-flight request.
#[derive(Debug)]
pub struct DownloadArtifact {
    path: PathBuf,
    mime_type: &'static str,
    suggested_filename: String,
}

impl DownloadArtifact {
    pub fn new(path: PathBuf, mime_type: &'static str, suggested_filename: impl Into<String>) -> Self {
        Self {
            path,
            mime_type,
            suggested_filename: suggested_filename.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn suggested_filename(&self) -> &str {
        &self.suggested_filename
    }
}

impl Drop for DownloadArtifact {
    fn drop(&mut self) {
        if let Err(e) = fs_err::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to remove temp file {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Generate a request-scoped job id used as the temp filename stem.
///
/// 12 hex characters of a v4 UUID, unique per request so concurrent
/// downloads never collide in the shared download directory.
pub fn new_job_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..12].to_string()
}

/// Remove every file whose name starts with the given job id.
///
/// Used after a failed run: yt-dlp leaves .part/.ytdl droppings next to
/// the target path.
pub fn cleanup_partial(dir: &Path, job_id: &str) {
    let entries = match fs_err::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Could not scan {} for partial files: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(job_id) {
            if let Err(e) = fs_err::remove_file(entry.path()) {
                log::warn!("Failed to remove partial file {:?}: {}", name, e);
            }
        }
    }
}

/// Remove leftover files from previous runs. Returns how many were purged.
///
/// Called once at startup; any file still present belongs to a request
/// that never finished cleanly (crash, power loss).
pub fn purge_download_dir(dir: &Path) -> usize {
    let entries = match fs_err::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return 0, // directory may not exist yet
    };

    let mut purged = 0;
    for entry in entries.flatten() {
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            match fs_err::remove_file(entry.path()) {
                Ok(()) => purged += 1,
                Err(e) => log::warn!("Failed to purge stale file {:?}: {}", entry.file_name(), e),
            }
        }
    }
    purged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    #[test]
    fn test_artifact_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc123def456.mp4");
        fs::write(&path, b"data").unwrap();

        {
            let artifact = DownloadArtifact::new(path.clone(), "video/mp4", "tiktok_video.mp4");
            assert!(artifact.path().exists());
        }

        assert!(!path.exists(), "artifact file must be removed on drop");
    }

    #[test]
    fn test_artifact_drop_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-created.mp4");
        // Dropping must not panic even though the file does not exist
        let artifact = DownloadArtifact::new(path, "video/mp4", "tiktok_video.mp4");
        drop(artifact);
    }

    #[test]
    fn test_artifact_accessors() {
        let artifact = DownloadArtifact::new(PathBuf::from("/tmp/x.mp3"), "audio/mpeg", "tiktok_audio.mp3");
        assert_eq!(artifact.mime_type(), "audio/mpeg");
        assert_eq!(artifact.suggested_filename(), "tiktok_audio.mp3");
        assert_eq!(artifact.path(), Path::new("/tmp/x.mp3"));
    }

    #[test]
    fn test_new_job_id_shape_and_uniqueness() {
        let ids: HashSet<String> = (0..256).map(|_| new_job_id()).collect();
        assert_eq!(ids.len(), 256, "job ids must be unique");
        for id in &ids {
            assert_eq!(id.len(), 12);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_cleanup_partial_removes_only_matching() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("job1.mp4.part"), b"x").unwrap();
        fs::write(dir.path().join("job1.mp4.ytdl"), b"x").unwrap();
        fs::write(dir.path().join("job2.mp4"), b"x").unwrap();

        cleanup_partial(dir.path(), "job1");

        assert!(!dir.path().join("job1.mp4.part").exists());
        assert!(!dir.path().join("job1.mp4.ytdl").exists());
        assert!(dir.path().join("job2.mp4").exists());
    }

    #[test]
    fn test_purge_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stale1.mp4"), b"x").unwrap();
        fs::write(dir.path().join("stale2.mp3"), b"x").unwrap();

        assert_eq!(purge_download_dir(dir.path()), 2);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_purge_download_dir_missing_dir() {
        assert_eq!(purge_download_dir(Path::new("/definitely/not/here")), 0);
    }
}
