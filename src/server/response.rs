//! HTTP responses for the export endpoint.

use crate::error::ExportError;
use axum::Json;
use axum::body::Body;
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_lite::Stream;
use serde::Serialize;
use std::io;

/// Error body returned for every failed export.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Stable machine-readable code
    pub code: &'static str,
}

impl From<&ExportError> for ErrorBody {
    fn from(error: &ExportError) -> Self {
        Self {
            error: error.public_message(),
            code: error.code(),
        }
    }
}

impl IntoResponse for ExportError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Export failed ({}): {:?}", self.code(), self);
        } else {
            log::warn!("Export rejected ({}): {}", self.code(), self);
        }
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

/// Successful export: the archive body with download headers.
pub fn zip_response<S>(stream: S, filename: &str) -> Result<Response, ExportError>
where
    S: Stream<Item = io::Result<Bytes>> + Send + 'static,
{
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| ExportError::Internal(format!("invalid download filename: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/zip")),
            (header::CONTENT_DISPOSITION, disposition),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store, must-revalidate"),
            ),
            (header::PRAGMA, HeaderValue::from_static("no-cache")),
            (header::EXPIRES, HeaderValue::from_static("0")),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// CORS preflight answer.
pub fn preflight_response() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (header::ACCESS_CONTROL_MAX_AGE, "86400"),
        ],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[tokio::test]
    async fn test_error_response_body() {
        let response = ExportError::from(ValidationError::NoPlatforms).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "NO_PLATFORMS");
        assert_eq!(json["error"], "At least one platform must be selected");
    }

    #[test]
    fn test_zip_headers() {
        let stream = futures_lite::stream::once(Ok(Bytes::from_static(b"PK")));
        let response = zip_response(stream, "logoforge-icons-20260101.zip").unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/zip");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"logoforge-icons-20260101.zip\""
        );
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
        assert_eq!(headers[header::PRAGMA], "no-cache");
        assert_eq!(headers[header::EXPIRES], "0");
    }

    #[test]
    fn test_preflight() {
        let response = preflight_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }
}
