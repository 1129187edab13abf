//! HTTP surface of the service.
//!
//! A status banner at /, a liveness probe at /health, metadata at /api/info
//! and the media stream at /api/download. Each download request walks a
//! fixed sequence of states (validate, resolve format, extract, respond)
//! and the artifact guard makes cleanup unconditional on every exit path.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use futures_util::Stream;
use serde::Deserialize;
use serde_json::json;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio_util::io::ReaderStream;
use tower_http::cors::CorsLayer;
use url::Url;

use crate::core::error::AppError;
use crate::core::validation::{sanitize_filename, validate_tiktok_url};
use crate::download::artifact::DownloadArtifact;
use crate::download::error::DownloadError;
use crate::download::extractor::MediaExtractor;
use crate::download::format::DownloadFormat;
use crate::download::metadata::VideoMetadata;

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn MediaExtractor>,
}

impl AppState {
    pub fn new(extractor: Arc<dyn MediaExtractor>) -> Self {
        Self { extractor }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/info", get(info_get).post(info_post))
        .route("/api/download", get(download_get).post(download_post))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

#[derive(Debug, Deserialize)]
struct InfoParams {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DownloadParams {
    url: Option<String>,
    format: Option<String>,
}

/// Error wrapper that renders as a JSON body with the classified status.
pub struct ApiError(AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

/// HTTP status classification.
///
/// Invalid input is the caller's fault (400). A video that is private,
/// deleted or region-locked is 404. Extraction trouble on the platform side
/// is 502, a timeout 504, and everything that points at this host (ffmpeg
/// missing, file juggling) is 500.
fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::Validation(_) | AppError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
        AppError::Download(d) => match d {
            DownloadError::Unavailable(_) => StatusCode::NOT_FOUND,
            DownloadError::YtDlp(_) => StatusCode::BAD_GATEWAY,
            DownloadError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            DownloadError::Ffmpeg(_) | DownloadError::FileNotFound(_) | DownloadError::Process(_) | DownloadError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
        AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message surfaced to the client. Never contains subprocess output.
fn client_message(err: &AppError) -> String {
    match err {
        AppError::Validation(e) => e.to_string(),
        AppError::InvalidFormat(token) => format!(
            "Unknown format: {}. Valid formats: hd_no_watermark, with_watermark, mp3",
            token
        ),
        AppError::Download(d) => match d {
            // Already generic, produced by the stderr classifier
            DownloadError::Unavailable(msg) | DownloadError::YtDlp(msg) => msg.clone(),
            DownloadError::Timeout(_) => "The download timed out. Please try again.".to_string(),
            DownloadError::Ffmpeg(_) => "Audio conversion failed.".to_string(),
            DownloadError::FileNotFound(_) | DownloadError::Process(_) | DownloadError::Other(_) => {
                "Download failed. Please try again later.".to_string()
            }
        },
        AppError::Io(_) => "Internal server error".to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            log::error!("Request failed ({}): {}", status, self.0);
        } else {
            log::info!("Request rejected ({}): {}", status, self.0);
        }
        (status, Json(json!({ "error": client_message(&self.0) }))).into_response()
    }
}

/// GET /: status banner.
async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": format!("tokgrab v{}", env!("CARGO_PKG_VERSION")),
    }))
}

/// GET /health: liveness probe.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn info_get(State(state): State<AppState>, Query(params): Query<InfoParams>) -> Result<Json<VideoMetadata>, ApiError> {
    handle_info(&state, params.url).await
}

async fn info_post(State(state): State<AppState>, Json(params): Json<InfoParams>) -> Result<Json<VideoMetadata>, ApiError> {
    handle_info(&state, params.url).await
}

async fn download_get(State(state): State<AppState>, Query(params): Query<DownloadParams>) -> Result<Response, ApiError> {
    handle_download(&state, params.url, params.format).await
}

async fn download_post(State(state): State<AppState>, Json(params): Json<DownloadParams>) -> Result<Response, ApiError> {
    handle_download(&state, params.url, params.format).await
}

/// Validate the raw URL parameter. Runs before anything touches the network.
fn validate(raw_url: Option<String>) -> Result<Url, ApiError> {
    Ok(validate_tiktok_url(raw_url.as_deref().unwrap_or(""))?)
}

async fn handle_info(state: &AppState, raw_url: Option<String>) -> Result<Json<VideoMetadata>, ApiError> {
    let url = validate(raw_url)?;
    let metadata = state.extractor.fetch_metadata(&url).await?;
    Ok(Json(metadata))
}

async fn handle_download(
    state: &AppState,
    raw_url: Option<String>,
    raw_format: Option<String>,
) -> Result<Response, ApiError> {
    let url = validate(raw_url)?;

    let format = match raw_format.as_deref() {
        None | Some("") => DownloadFormat::default(),
        Some(token) => DownloadFormat::from_token(token)?,
    };

    let options = format.options();
    let artifact = state.extractor.download(&url, &options).await?;

    stream_artifact(artifact).await
}

/// Stream the artifact file back to the client.
///
/// The artifact rides inside the body stream, so its Drop (and the file
/// removal) fires once the stream is done or abandoned.
async fn stream_artifact(artifact: DownloadArtifact) -> Result<Response, ApiError> {
    let file = fs_err::tokio::File::open(artifact.path()).await.map_err(AppError::Io)?;

    // Header values must stay quotable; the filename goes through the same
    // sanitizer as everything user-adjacent.
    let filename = sanitize_filename(artifact.suggested_filename());
    let headers = [
        (header::CONTENT_TYPE, artifact.mime_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    let stream = GuardedStream {
        inner: ReaderStream::new(file),
        _artifact: artifact,
    };

    Ok((headers, Body::from_stream(stream)).into_response())
}

/// A byte stream that keeps the artifact alive until the stream is dropped.
struct GuardedStream<S> {
    inner: S,
    _artifact: DownloadArtifact,
}

impl<S> Stream for GuardedStream<S>
where
    S: Stream + Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}
