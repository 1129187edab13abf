//! URL and filename validation utilities
//!
//! Provides security-focused validation for user inputs:
//! - TikTok URL validation (whitelist-based)
//! - Filename sanitization (remove filesystem-unsafe characters)
//!
//! Validation runs before any subprocess is spawned, so a rejected URL
//! never reaches yt-dlp.

use thiserror::Error;
use url::Url;

use crate::core::config;

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Missing or empty URL parameter
    #[error("URL is required")]
    EmptyUrl,

    /// URL exceeds the configured length limit
    #[error("URL is too long ({len} > {max} characters)")]
    UrlTooLong { len: usize, max: usize },

    /// Invalid URL format or non-TikTok domain
    #[error("Invalid TikTok URL: {0}")]
    InvalidUrl(String),
}

/// Validates that a URL is a valid TikTok link and returns the parsed form.
///
/// # Security
/// Uses whitelist approach:
/// - Only HTTP/HTTPS schemes allowed
/// - Only tiktok.com and its subdomains (www, m, vm, vt share links)
///
/// # Examples
/// ```
/// use tokgrab::core::validation::validate_tiktok_url;
///
/// assert!(validate_tiktok_url("https://www.tiktok.com/@user/video/724").is_ok());
/// assert!(validate_tiktok_url("https://vm.tiktok.com/ZMabc123/").is_ok());
/// assert!(validate_tiktok_url("https://evil.com/@user/video/724").is_err());
/// assert!(validate_tiktok_url("").is_err());
/// ```
pub fn validate_tiktok_url(url: &str) -> Result<Url, ValidationError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    if trimmed.len() > config::validation::MAX_URL_LENGTH {
        return Err(ValidationError::UrlTooLong {
            len: trimmed.len(),
            max: config::validation::MAX_URL_LENGTH,
        });
    }

    let parsed = Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl(trimmed.to_string()))?;

    // Only HTTP and HTTPS are allowed
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::InvalidUrl(format!(
            "{} (invalid scheme: {})",
            trimmed,
            parsed.scheme()
        )));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| ValidationError::InvalidUrl(format!("{} (no host)", trimmed)))?;

    // Covers www.tiktok.com, m.tiktok.com and the vm/vt short-link hosts
    let is_tiktok = host == "tiktok.com" || host.ends_with(".tiktok.com");

    if !is_tiktok {
        return Err(ValidationError::InvalidUrl(format!(
            "{} (not a TikTok domain: {})",
            trimmed, host
        )));
    }

    Ok(parsed)
}

/// Sanitizes a filename by removing filesystem-unsafe characters.
///
/// Removes path separators (`/`, `\`), reserved characters
/// (`:`, `*`, `?`, `"`, `<`, `>`, `|`) and ASCII control characters.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !['/', '\\', ':', '*', '?', '"', '<', '>', '|'].contains(c))
        .filter(|c| !c.is_control())
        .collect()
}
